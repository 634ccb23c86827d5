// src/lib.rs

//! `qplay` - dense state-vector simulation of small quantum circuits
//!
//! A register of `N` qubits is held as `2^N` complex amplitudes, qubit 0 being
//! the most significant bit of a basis index. The engine applies single-qubit
//! gates, CNOT and projective measurement as pure functions from state to
//! state; measurement randomness is always supplied by the caller.

pub mod config;
pub mod core;
pub mod gates;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod report;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{Complex, QsimError, QuantumState};
pub use crate::config::SimulatorConfig;
pub use crate::gates::{Angle, Gate, QuantumGate};
pub use crate::operations::Operation;
pub use crate::circuits::{Circuit, CircuitBuilder};
pub use crate::simulation::{
    MeasurementResult, SimulationResult, Simulator, apply_cnot, apply_single_qubit_gate,
    initialize_state, measure_qubit, measure_qubit_with_sample,
};
pub use crate::report::{format_state, probabilities};
pub use crate::validation::{check_normalization, validate_state};

// Example 1: Bell pair, step by step
// Drives the pure engine functions directly, the way an interactive front end
// holding the current state would.
/// ```
/// use qplay::{Gate, QuantumGate, QsimError, apply_cnot, apply_single_qubit_gate,
///             format_state, initialize_state, measure_qubit, probabilities};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// # fn main() -> Result<(), QsimError> {
/// let state = initialize_state(2)?;
/// let state = apply_single_qubit_gate(&state, &QuantumGate::from(Gate::Hadamard), 0)?;
/// let state = apply_cnot(&state, 0, 1)?;
///
/// assert_eq!(format_state(&state), "0.7071|00⟩ + 0.7071|11⟩");
/// let p = probabilities(&state);
/// assert!((p[0] - 0.5).abs() < 1e-9 && (p[3] - 0.5).abs() < 1e-9);
///
/// // Measuring one half of the pair fixes the other.
/// let mut rng = StdRng::seed_from_u64(42);
/// let m = measure_qubit(&state, 0, &mut rng)?;
/// let expected = if m.outcome == 0 { "|00⟩" } else { "|11⟩" };
/// assert_eq!(format_state(&m.new_state), expected);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Circuit through the Simulator
// Builds a circuit, runs it with a seeded config, and checks the correlated record.
/// ```
/// use qplay::{CircuitBuilder, Gate, Simulator, SimulatorConfig, QsimError};
///
/// # fn main() -> Result<(), QsimError> {
/// let circuit = CircuitBuilder::new(2)
///     .gate(Gate::Hadamard, 0)
///     .cnot(0, 1)
///     .measure_all()
///     .build();
/// println!("{}", circuit);
///
/// let simulator = Simulator::with_config(SimulatorConfig::seeded(7))?;
/// let result = simulator.run(&circuit)?;
/// println!("{}", result);
///
/// let bits = result.bitstring();
/// assert!(bits == "00" || bits == "11");
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
