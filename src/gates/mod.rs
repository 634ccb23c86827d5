// src/gates/mod.rs

//! Single-qubit gates: the named built-in set and the 2×2 matrix value they resolve to.

use crate::core::{Complex, QsimError, Result, UNITARY_TOLERANCE};
use crate::validation::is_unitary;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

/// A 2×2 complex matrix, row-major: `matrix[row][col]`.
pub type Matrix2 = [[Complex; 2]; 2];

/// A finite rotation angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Angle(f64);

impl Angle {
    /// Rejects NaN and infinite angles.
    pub fn new(radians: f64) -> Result<Self> {
        if !radians.is_finite() {
            return Err(QsimError::invalid(format!(
                "Rotation angle must be finite, got {}",
                radians
            )));
        }
        Ok(Self(radians))
    }

    pub fn radians(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Angle {
    type Error = QsimError;

    fn try_from(radians: f64) -> Result<Self> {
        Angle::new(radians)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> f64 {
        angle.0
    }
}

/// Named single-qubit gates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// No-op.
    Identity,
    /// Bit flip.
    PauliX,
    /// Bit and phase flip.
    PauliY,
    /// Phase flip.
    PauliZ,
    /// Maps `|0⟩` and `|1⟩` to equal superpositions.
    Hadamard,
    /// Phase by π/2.
    S,
    /// Phase by π/4.
    T,
    /// `diag(1, e^(iθ))`. Build with [`Gate::phase`].
    Phase(Angle),
}

impl Gate {
    /// The gate's 2×2 unitary.
    pub fn matrix(&self) -> Matrix2 {
        let one = Complex::one();
        let zero = Complex::zero();
        let i = Complex::i();
        match self {
            Gate::Identity => [[one, zero], [zero, one]],
            Gate::PauliX => [[zero, one], [one, zero]],
            Gate::PauliY => [[zero, -i], [i, zero]],
            Gate::PauliZ => [[one, zero], [zero, -one]],
            Gate::Hadamard => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            Gate::S => phase_matrix(FRAC_PI_2),
            Gate::T => phase_matrix(FRAC_PI_4),
            Gate::Phase(theta) => phase_matrix(theta.radians()),
        }
    }

    /// Short display name (`"H"`, `"X"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Identity => "I",
            Gate::PauliX => "X",
            Gate::PauliY => "Y",
            Gate::PauliZ => "Z",
            Gate::Hadamard => "H",
            Gate::S => "S",
            Gate::T => "T",
            Gate::Phase(_) => "P",
        }
    }

    /// Phase gate by `theta` radians. Fails if `theta` is not finite.
    pub fn phase(theta: f64) -> Result<Self> {
        Ok(Gate::Phase(Angle::new(theta)?))
    }

    /// Looks up a built-in gate by name, case-insensitively.
    /// Parameterised gates cannot be resolved by name alone.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "i" | "id" | "identity" => Ok(Gate::Identity),
            "x" | "paulix" | "pauli-x" | "not" => Ok(Gate::PauliX),
            "y" | "pauliy" | "pauli-y" => Ok(Gate::PauliY),
            "z" | "pauliz" | "pauli-z" => Ok(Gate::PauliZ),
            "h" | "hadamard" => Ok(Gate::Hadamard),
            "s" => Ok(Gate::S),
            "t" => Ok(Gate::T),
            _ => Err(QsimError::UnknownGate { name: name.to_string() }),
        }
    }
}

impl FromStr for Gate {
    type Err = QsimError;

    fn from_str(s: &str) -> Result<Self> {
        Gate::by_name(s)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Phase(theta) => write!(f, "P({:.4})", theta.radians()),
            other => f.write_str(other.name()),
        }
    }
}

fn phase_matrix(theta: f64) -> Matrix2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::from_polar(1.0, theta)],
    ]
}

/// A single-qubit gate as plain matrix data.
///
/// Built from a named [`Gate`] or from a caller-supplied matrix that passes
/// the unitarity check. Deserialized gates go through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGate")]
pub struct QuantumGate {
    matrix: Matrix2,
}

#[derive(Deserialize)]
struct RawGate {
    matrix: Matrix2,
}

impl TryFrom<RawGate> for QuantumGate {
    type Error = QsimError;

    fn try_from(raw: RawGate) -> Result<Self> {
        QuantumGate::custom(raw.matrix)
    }
}

impl QuantumGate {
    /// Accepts `matrix` only if every entry is finite and `U†U ≈ I`.
    pub fn custom(matrix: Matrix2) -> Result<Self> {
        if !is_unitary(&matrix, UNITARY_TOLERANCE) {
            return Err(QsimError::invalid("Gate matrix is not unitary"));
        }
        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &Matrix2 {
        &self.matrix
    }

    /// Conjugate transpose. The inverse of a unitary gate.
    pub fn adjoint(&self) -> Self {
        let m = &self.matrix;
        Self {
            matrix: [
                [m[0][0].conj(), m[1][0].conj()],
                [m[0][1].conj(), m[1][1].conj()],
            ],
        }
    }
}

impl From<Gate> for QuantumGate {
    fn from(gate: Gate) -> Self {
        Self { matrix: gate.matrix() }
    }
}
