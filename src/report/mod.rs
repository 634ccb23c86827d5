// src/report/mod.rs

//! Read-only views of a state: probability distributions and a
//! human-readable superposition expression.

use crate::core::{Complex, QuantumState, Result, SIGNIFICANCE_THRESHOLD};

/// Born-rule probability of every basis index, in index order.
pub fn probabilities(state: &QuantumState) -> Vec<f64> {
    state.amplitudes().iter().map(|c| c.norm_sqr()).collect()
}

/// Probability that `qubit` reads 0 and 1, as `(p0, p1)`.
pub fn marginal_probability(state: &QuantumState, qubit: usize) -> Result<(f64, f64)> {
    state.check_qubit(qubit)?;
    let mask = state.bit_mask(qubit);
    let (mut p0, mut p1) = (0.0, 0.0);
    for (index, amp) in state.amplitudes().iter().enumerate() {
        if index & mask == 0 {
            p0 += amp.norm_sqr();
        } else {
            p1 += amp.norm_sqr();
        }
    }
    Ok((p0, p1))
}

/// Ket label for basis index `index`, e.g. `|01⟩`.
pub fn ket_label(index: usize, num_qubits: usize) -> String {
    format!("|{:0width$b}⟩", index, width = num_qubits)
}

/// Renders the state as a superposition such as `0.7071|00⟩ + 0.7071|11⟩`.
///
/// A term is dropped unless its real or imaginary part reaches
/// [`SIGNIFICANCE_THRESHOLD`], so its magnitude is never below the threshold
/// and the printed coefficient is never all zero. Only significant parts are
/// printed. A coefficient of exactly 1 is elided, so a basis state prints as
/// its bare ket. If nothing survives, the all-zero ket is returned.
pub fn format_state(state: &QuantumState) -> String {
    let n = state.num_qubits();
    let mut out = String::new();
    for (index, amp) in state.amplitudes().iter().enumerate() {
        let Some(coeff) = format_coefficient(*amp) else {
            continue;
        };
        let (sign, body) = match coeff.strip_prefix('-') {
            Some(rest) => ("-", rest.to_string()),
            None => ("+", coeff),
        };
        if out.is_empty() {
            if sign == "-" {
                out.push('-');
            }
        } else {
            out.push_str(&format!(" {} ", sign));
        }
        out.push_str(&body);
        out.push_str(&ket_label(index, n));
    }
    if out.is_empty() {
        return ket_label(0, n);
    }
    out
}

/// `None` when neither part is significant.
fn format_coefficient(c: Complex) -> Option<String> {
    let re_sig = c.re.abs() >= SIGNIFICANCE_THRESHOLD;
    let im_sig = c.im.abs() >= SIGNIFICANCE_THRESHOLD;
    let text = match (re_sig, im_sig) {
        (false, false) => return None,
        (true, false) if (c.re - 1.0).abs() < SIGNIFICANCE_THRESHOLD => String::new(),
        (true, false) if (c.re + 1.0).abs() < SIGNIFICANCE_THRESHOLD => "-".to_string(),
        (true, false) => format_part(c.re, false),
        (false, true) => format!("{}i", format_part(c.im, false)),
        (true, true) => format!("({}{}i)", format_part(c.re, false), format_part(c.im, true)),
    };
    Some(text)
}

/// Four decimals, or scientific notation for parts that would round to zero.
fn format_part(x: f64, signed: bool) -> String {
    match (x.abs() >= 5e-5, signed) {
        (true, false) => format!("{:.4}", x),
        (true, true) => format!("{:+.4}", x),
        (false, false) => format!("{:.2e}", x),
        (false, true) => format!("{:+.2e}", x),
    }
}
