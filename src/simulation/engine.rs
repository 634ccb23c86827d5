// src/simulation/engine.rs

//! Pure state-vector transformations.
//!
//! Every function takes the current state by reference and returns a freshly
//! allocated one; inputs are never mutated. Argument checks happen before any
//! output is built.

use crate::core::{DEFAULT_MAX_QUBITS, QsimError, QuantumState, Result, add, multiply};
use crate::gates::QuantumGate;
use crate::report::marginal_probability;
use crate::simulation::results::MeasurementResult;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use tracing::{debug, trace};

/// Builds `|0...0⟩` over `num_qubits` qubits, capped at the default maximum.
pub fn initialize_state(num_qubits: usize) -> Result<QuantumState> {
    initialize_state_bounded(num_qubits, DEFAULT_MAX_QUBITS)
}

/// Builds `|0...0⟩` over `num_qubits` qubits, rejecting counts above `max_qubits`.
pub fn initialize_state_bounded(num_qubits: usize, max_qubits: usize) -> Result<QuantumState> {
    if num_qubits > max_qubits {
        return Err(QsimError::QubitLimitExceeded {
            requested: num_qubits,
            max: max_qubits,
        });
    }
    QuantumState::new(num_qubits)
}

/// Applies a 2×2 gate to `target`.
///
/// For each basis index `i` with target bit `b`, the new amplitude is
/// `g[b][0]·ψ(i with bit 0) + g[b][1]·ψ(i with bit 1)`: the two pre-images of
/// `i` weighted by row `b` of the matrix. Unitary gates preserve the norm.
pub fn apply_single_qubit_gate(
    state: &QuantumState,
    gate: &QuantumGate,
    target: usize,
) -> Result<QuantumState> {
    state.check_qubit(target)?;
    let mask = state.bit_mask(target);
    let m = gate.matrix();
    let input = state.amplitudes();

    let output: Vec<Complex<f64>> = (0..state.dim())
        .map(|i| {
            let bit = usize::from(i & mask != 0);
            let (i0, i1) = (i & !mask, i | mask);
            add(multiply(m[bit][0], input[i0]), multiply(m[bit][1], input[i1]))
        })
        .collect();

    trace!(target_qubit = target, num_qubits = state.num_qubits(), "applied single-qubit gate");
    Ok(QuantumState::from_parts(state.num_qubits(), output))
}

/// Applies CNOT: on every basis state whose `control` bit is 1, the `target`
/// bit is flipped.
///
/// Each affected pair `(i, i ^ target_mask)` is written exactly once, from the
/// lower index, reading only from the untouched input.
pub fn apply_cnot(state: &QuantumState, control: usize, target: usize) -> Result<QuantumState> {
    state.check_qubit(control)?;
    state.check_qubit(target)?;
    if control == target {
        return Err(QsimError::invalid(format!(
            "CNOT control and target must differ (both are {})",
            control
        )));
    }
    let control_mask = state.bit_mask(control);
    let target_mask = state.bit_mask(target);
    let input = state.amplitudes();
    let mut output = input.to_vec();

    for i in 0..state.dim() {
        // Only the lower index of each pair (target bit 0) does the swap.
        if i & control_mask != 0 && i & target_mask == 0 {
            let j = i | target_mask;
            output[i] = input[j];
            output[j] = input[i];
        }
    }

    trace!(control_qubit = control, target_qubit = target, "applied CNOT");
    Ok(QuantumState::from_parts(state.num_qubits(), output))
}

/// Measures `qubit` using a uniform sample drawn from `rng`.
pub fn measure_qubit<R: Rng>(
    state: &QuantumState,
    qubit: usize,
    rng: &mut R,
) -> Result<MeasurementResult> {
    state.check_qubit(qubit)?;
    let sample: f64 = rng.random();
    measure_qubit_with_sample(state, qubit, sample)
}

/// Measures `qubit` with an explicit uniform sample in `[0, 1)`.
///
/// The outcome is 0 when `sample < P(0)`, else 1. Amplitudes that disagree
/// with the outcome are zeroed and the survivors divided by `sqrt(P(outcome))`.
pub fn measure_qubit_with_sample(
    state: &QuantumState,
    qubit: usize,
    sample: f64,
) -> Result<MeasurementResult> {
    state.check_qubit(qubit)?;
    if !(0.0..1.0).contains(&sample) {
        return Err(QsimError::invalid(format!(
            "Measurement sample {} outside [0, 1)",
            sample
        )));
    }

    let (prob0, prob1) = marginal_probability(state, qubit)?;
    let outcome: u8 = if sample < prob0 { 0 } else { 1 };
    let probability = if outcome == 0 { prob0 } else { prob1 };

    if probability <= 0.0 || !probability.is_finite() {
        return Err(QsimError::ZeroProbabilityMeasurement { qubit, outcome });
    }

    let mask = state.bit_mask(qubit);
    let keep_set = outcome == 1;
    let scale = probability.sqrt();
    let collapsed = state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, amp)| {
            if (i & mask != 0) == keep_set {
                *amp / scale
            } else {
                Complex::zero()
            }
        })
        .collect();

    debug!(qubit, outcome, prob0, prob1, "measured qubit");
    Ok(MeasurementResult {
        qubit,
        outcome,
        probability,
        new_state: QuantumState::from_parts(state.num_qubits(), collapsed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::Gate;
    use crate::report::probabilities;
    use crate::validation::check_normalization;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    /// Asserts two amplitude vectors agree component-wise within `tolerance`.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        tolerance: f64,
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < tolerance * tolerance,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i, actual[i], expected[i], context
            );
        }
    }

    fn gate(g: Gate) -> QuantumGate {
        QuantumGate::from(g)
    }

    #[test]
    fn test_initialize_respects_limit() {
        assert!(initialize_state(8).is_ok());
        assert_eq!(
            initialize_state(9),
            Err(QsimError::QubitLimitExceeded { requested: 9, max: 8 })
        );
        assert!(initialize_state_bounded(12, 12).is_ok());
        // A generous caller cap still stops at the supported ceiling.
        assert!(matches!(
            initialize_state_bounded(60, 60),
            Err(QsimError::QubitLimitExceeded { requested: 60, .. })
        ));
        assert!(matches!(initialize_state(0), Err(QsimError::InvalidArgument { .. })));
    }

    #[test]
    fn test_x_on_msb_qubit() -> Result<()> {
        // X on qubit 0 of |00⟩ gives |10⟩, index 2
        let state = apply_single_qubit_gate(&initialize_state(2)?, &gate(Gate::PauliX), 0)?;
        assert_eq!(probabilities(&state), vec![0.0, 0.0, 1.0, 0.0]);
        // X on qubit 1 of |00⟩ gives |01⟩, index 1
        let state = apply_single_qubit_gate(&initialize_state(2)?, &gate(Gate::PauliX), 1)?;
        assert_eq!(probabilities(&state), vec![0.0, 1.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_hadamard_on_middle_qubit() -> Result<()> {
        let state = apply_single_qubit_gate(&initialize_state(3)?, &gate(Gate::Hadamard), 1)?;
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let z = Complex::zero();
        assert_complex_vec_approx_equal(
            state.amplitudes(),
            &[h, z, h, z, z, z, z, z],
            TEST_TOLERANCE,
            "H on qubit 1 of |000>",
        );
        Ok(())
    }

    #[test]
    fn test_y_phases() -> Result<()> {
        // Y|0⟩ = i|1⟩
        let state = apply_single_qubit_gate(&initialize_state(1)?, &gate(Gate::PauliY), 0)?;
        assert_complex_vec_approx_equal(
            state.amplitudes(),
            &[Complex::zero(), Complex::i()],
            TEST_TOLERANCE,
            "Y|0>",
        );
        Ok(())
    }

    #[test]
    fn test_gate_does_not_mutate_input() -> Result<()> {
        let before = initialize_state(2)?;
        let copy = before.clone();
        let _after = apply_single_qubit_gate(&before, &gate(Gate::Hadamard), 0)?;
        assert_eq!(before, copy);
        Ok(())
    }

    #[test]
    fn test_gate_target_out_of_range() -> Result<()> {
        let state = initialize_state(2)?;
        assert!(matches!(
            apply_single_qubit_gate(&state, &gate(Gate::PauliX), 2),
            Err(QsimError::InvalidArgument { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_cnot_swaps_each_pair_once() -> Result<()> {
        // Three qubits, control 0, target 2, starting from a state with distinct
        // amplitudes everywhere so any double swap would show.
        let amps: Vec<Complex<f64>> = (0..8).map(|k| Complex::new(k as f64, 0.0)).collect();
        let state = QuantumState::from_amplitudes(3, amps)?;
        let out = apply_cnot(&state, 0, 2)?;
        let expected: Vec<Complex<f64>> = [0.0, 1.0, 2.0, 3.0, 5.0, 4.0, 7.0, 6.0]
            .iter()
            .map(|re| Complex::new(*re, 0.0))
            .collect();
        assert_eq!(out.amplitudes(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn test_cnot_lower_qubit_controls_higher() -> Result<()> {
        // Control qubit 1 (LSB), target qubit 0 (MSB): |01⟩ -> |11⟩
        let state = QuantumState::basis(2, 0b01)?;
        let out = apply_cnot(&state, 1, 0)?;
        assert_eq!(probabilities(&out), vec![0.0, 0.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_cnot_argument_checks() -> Result<()> {
        let state = initialize_state(2)?;
        assert!(matches!(apply_cnot(&state, 1, 1), Err(QsimError::InvalidArgument { .. })));
        assert!(matches!(apply_cnot(&state, 0, 5), Err(QsimError::InvalidArgument { .. })));
        Ok(())
    }

    #[test]
    fn test_measure_with_sample_picks_branch() -> Result<()> {
        let plus = apply_single_qubit_gate(&initialize_state(1)?, &gate(Gate::Hadamard), 0)?;

        let low = measure_qubit_with_sample(&plus, 0, 0.25)?;
        assert_eq!(low.outcome, 0);
        assert!((low.probability - 0.5).abs() < TEST_TOLERANCE);
        assert_complex_vec_approx_equal(
            low.new_state.amplitudes(),
            &[Complex::new(1.0, 0.0), Complex::zero()],
            TEST_TOLERANCE,
            "collapse to |0>",
        );

        let high = measure_qubit_with_sample(&plus, 0, 0.75)?;
        assert_eq!(high.outcome, 1);
        check_normalization(&high.new_state, None)?;
        Ok(())
    }

    #[test]
    fn test_measure_preserves_relative_phase_of_survivors() -> Result<()> {
        // (|00⟩ + i|01⟩ + |10⟩ + |11⟩)/2, measure qubit 0 -> 0
        let amps = vec![
            Complex::new(0.5, 0.0),
            Complex::new(0.0, 0.5),
            Complex::new(0.5, 0.0),
            Complex::new(0.5, 0.0),
        ];
        let state = QuantumState::from_amplitudes(2, amps)?;
        let m = measure_qubit_with_sample(&state, 0, 0.1)?;
        assert_eq!(m.outcome, 0);
        assert_complex_vec_approx_equal(
            m.new_state.amplitudes(),
            &[
                Complex::new(FRAC_1_SQRT_2, 0.0),
                Complex::new(0.0, FRAC_1_SQRT_2),
                Complex::zero(),
                Complex::zero(),
            ],
            TEST_TOLERANCE,
            "collapsed superposition keeps phase",
        );
        Ok(())
    }

    #[test]
    fn test_measure_zero_probability_branch() -> Result<()> {
        // Unnormalized state with all weight on qubit=0 but total < 1,
        // so a sample above P(0) lands on an empty branch.
        let amps = vec![Complex::new(0.5, 0.0), Complex::zero()];
        let state = QuantumState::from_amplitudes(1, amps)?;
        assert_eq!(
            measure_qubit_with_sample(&state, 0, 0.9),
            Err(QsimError::ZeroProbabilityMeasurement { qubit: 0, outcome: 1 })
        );
        Ok(())
    }

    #[test]
    fn test_measure_rejects_bad_sample() -> Result<()> {
        let state = initialize_state(1)?;
        assert!(measure_qubit_with_sample(&state, 0, 1.0).is_err());
        assert!(measure_qubit_with_sample(&state, 0, -0.1).is_err());
        assert!(measure_qubit_with_sample(&state, 0, f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn test_measure_basis_state_is_certain() -> Result<()> {
        let state = QuantumState::basis(3, 0b101)?;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(measure_qubit(&state, 0, &mut rng)?.outcome, 1);
            assert_eq!(measure_qubit(&state, 1, &mut rng)?.outcome, 0);
            assert_eq!(measure_qubit(&state, 2, &mut rng)?.outcome, 1);
        }
        Ok(())
    }
}
