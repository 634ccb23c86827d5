// src/validation/mod.rs

//! Checks on the invariants the engine relies on: unit total probability and unitary gates.

use crate::core::{Complex, DEFAULT_NORM_TOLERANCE, QsimError, QuantumState, Result};
use crate::gates::Matrix2;
use num_traits::Zero;

/// Sum of squared magnitudes over all amplitudes.
pub fn total_probability(state: &QuantumState) -> f64 {
    state.amplitudes().iter().map(|c| c.norm_sqr()).sum()
}

/// Checks if the state vector is normalized (sum of squared magnitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `QuantumState` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QsimError::NormalizationDrift)` otherwise.
pub fn check_normalization(state: &QuantumState, tolerance: Option<f64>) -> Result<()> {
    let tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let total = total_probability(state);
    if (total - 1.0).abs() > tolerance {
        Err(QsimError::NormalizationDrift { total, tolerance })
    } else {
        Ok(())
    }
}

/// Rescales the state to unit norm.
///
/// Never called by the engine itself: accumulated drift is surfaced through
/// [`check_normalization`] instead of being silently corrected.
pub fn renormalize(state: &QuantumState) -> Result<QuantumState> {
    let norm = total_probability(state).sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Err(QsimError::invalid(format!(
            "Cannot renormalize a state with norm {}",
            norm
        )));
    }
    let amplitudes = state.amplitudes().iter().map(|c| *c / norm).collect();
    Ok(QuantumState::from_parts(state.num_qubits(), amplitudes))
}

/// Returns `true` if every entry is finite and `U†U` is the identity to
/// within `tolerance` in every entry.
pub fn is_unitary(matrix: &Matrix2, tolerance: f64) -> bool {
    if !matrix.iter().flatten().all(|c| c.is_finite()) {
        return false;
    }
    for row in 0..2 {
        for col in 0..2 {
            // (U†U)[row][col] = sum_k conj(U[k][row]) * U[k][col]
            let mut entry = Complex::zero();
            for k in 0..2 {
                entry += matrix[k][row].conj() * matrix[k][col];
            }
            let expected = if row == col { 1.0 } else { 0.0 };
            let deviation = (entry - Complex::new(expected, 0.0)).norm();
            // NaN fails this comparison too.
            if !(deviation <= tolerance) {
                return false;
            }
        }
    }
    true
}

/// Performs the basic validation checks on a state. Currently only normalization.
pub fn validate_state(state: &QuantumState, norm_tolerance: Option<f64>) -> Result<()> {
    check_normalization(state, norm_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_initial_state_is_normalized() -> Result<()> {
        let state = QuantumState::new(4)?;
        check_normalization(&state, None)?;
        validate_state(&state, Some(1e-12))?;
        Ok(())
    }

    #[test]
    fn test_drift_is_reported() -> Result<()> {
        let amps = vec![Complex::new(0.8, 0.0), Complex::new(0.8, 0.0)];
        let state = QuantumState::from_amplitudes(1, amps)?;
        match check_normalization(&state, None) {
            Err(QsimError::NormalizationDrift { total, .. }) => {
                assert!((total - 1.28).abs() < 1e-12)
            }
            other => panic!("Expected NormalizationDrift, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_renormalize() -> Result<()> {
        let amps = vec![Complex::new(2.0, 0.0), Complex::new(0.0, 2.0)];
        let state = renormalize(&QuantumState::from_amplitudes(1, amps)?)?;
        check_normalization(&state, None)?;
        assert!((state.amplitudes()[0].re - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((state.amplitudes()[1].im - FRAC_1_SQRT_2).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_renormalize_zero_state_fails() -> Result<()> {
        let state = QuantumState::from_amplitudes(1, vec![Complex::zero(); 2])?;
        assert!(matches!(renormalize(&state), Err(QsimError::InvalidArgument { .. })));
        Ok(())
    }

    #[test]
    fn test_is_unitary() {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        assert!(is_unitary(&[[one, zero], [zero, one]], 1e-12));
        assert!(!is_unitary(&[[one, one], [zero, one]], 1e-12));
        assert!(!is_unitary(&[[one * 2.0, zero], [zero, one]], 1e-12));
    }

    #[test]
    fn test_non_finite_matrix_is_not_unitary() {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        let nan = Complex::new(f64::NAN, f64::NAN);
        assert!(!is_unitary(&[[nan; 2]; 2], 1e-9));
        assert!(!is_unitary(&[[one, zero], [zero, Complex::new(f64::INFINITY, 0.0)]], 1e-9));
        // A NaN tolerance accepts nothing.
        assert!(!is_unitary(&[[one, zero], [zero, one]], f64::NAN));
    }
}
