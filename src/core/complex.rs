// src/core/complex.rs

//! Complex arithmetic on amplitudes.
//!
//! Amplitudes are `num_complex::Complex<f64>`; the free functions below are the
//! small arithmetic surface the rest of the simulator is written against.

/// A complex amplitude (real part, imaginary part).
pub type Complex = num_complex::Complex<f64>;

/// Component-wise sum.
#[inline]
pub fn add(a: Complex, b: Complex) -> Complex {
    Complex::new(a.re + b.re, a.im + b.im)
}

/// Complex product: `(a.re*b.re - a.im*b.im) + i(a.re*b.im + a.im*b.re)`.
#[inline]
pub fn multiply(a: Complex, b: Complex) -> Complex {
    Complex::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// Euclidean norm `sqrt(re² + im²)`. Never negative.
#[inline]
pub fn magnitude(c: Complex) -> f64 {
    c.re.hypot(c.im)
}

/// Angle of `c` in `(-π, π]`, via `atan2(im, re)`. The zero vector maps to 0.
#[inline]
pub fn phase(c: Complex) -> f64 {
    c.im.atan2(c.re)
}
