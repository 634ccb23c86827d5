// src/simulation/mod.rs

//! Runs [`Circuit`]s against the pure transformations in [`engine`].
//!
//! The engine functions are usable on their own by callers that drive a state
//! step by step; the [`Simulator`] adds qubit limits, seeded randomness and a
//! record of measurement outcomes.

mod results;
pub mod engine;

pub use engine::{
    apply_cnot, apply_single_qubit_gate, initialize_state, initialize_state_bounded,
    measure_qubit, measure_qubit_with_sample,
};
pub use results::{Counts, MeasurementResult, SimulationResult};

use crate::circuits::Circuit;
use crate::config::SimulatorConfig;
use crate::core::{QsimError, QuantumState, Result};
use crate::operations::Operation;
use crate::validation::check_normalization;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Executes circuits under a [`SimulatorConfig`].
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator after validating `config`.
    pub fn with_config(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// `|0...0⟩` over `num_qubits`, subject to the configured maximum.
    pub fn initialize(&self, num_qubits: usize) -> Result<QuantumState> {
        initialize_state_bounded(num_qubits, self.config.max_qubits)
    }

    /// Runs `circuit` from `|0...0⟩`, sampling measurements from an RNG
    /// seeded by the config.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let mut rng = self.make_rng();
        self.run_with_rng(circuit, &mut rng)
    }

    /// Runs `circuit` from `|0...0⟩` with caller-supplied randomness.
    pub fn run_with_rng<R: Rng>(&self, circuit: &Circuit, rng: &mut R) -> Result<SimulationResult> {
        let initial = self.initialize(circuit.num_qubits())?;
        self.run_from(circuit, initial, rng)
    }

    /// Runs `circuit` starting from `initial`, whose qubit count must match.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the measurement record and final state.
    /// * `Err(QsimError)` if the circuit is invalid for the register, or a
    ///   measurement lands on a zero-probability branch. Circuit validation
    ///   happens before any operation runs.
    pub fn run_from<R: Rng>(
        &self,
        circuit: &Circuit,
        initial: QuantumState,
        rng: &mut R,
    ) -> Result<SimulationResult> {
        circuit.validate()?;
        if initial.num_qubits() != circuit.num_qubits() {
            return Err(QsimError::invalid(format!(
                "Initial state has {} qubits but circuit expects {}",
                initial.num_qubits(),
                circuit.num_qubits()
            )));
        }
        if initial.num_qubits() > self.config.max_qubits {
            return Err(QsimError::QubitLimitExceeded {
                requested: initial.num_qubits(),
                max: self.config.max_qubits,
            });
        }

        debug!(
            num_qubits = circuit.num_qubits(),
            operations = circuit.len(),
            seed = ?self.config.seed,
            "running circuit"
        );

        let mut state = initial;
        let mut record = Vec::with_capacity(circuit.measurement_count());
        for (step, op) in circuit.operations().iter().enumerate() {
            state = match op {
                Operation::Gate { gate, target, .. } => apply_single_qubit_gate(&state, gate, *target)?,
                Operation::Cnot { control, target } => apply_cnot(&state, *control, *target)?,
                Operation::Measure { qubit } => {
                    let measured = measure_qubit(&state, *qubit, rng)?;
                    record.push((*qubit, measured.outcome));
                    measured.new_state
                }
            };
            if self.config.check_normalization {
                if let Err(QsimError::NormalizationDrift { total, tolerance }) =
                    check_normalization(&state, Some(self.config.norm_tolerance))
                {
                    warn!(step, %op, total, tolerance, "normalization drift");
                }
            }
        }

        let mut result = SimulationResult::new(state);
        for (qubit, outcome) in record {
            result.record_measurement(qubit, outcome);
        }
        Ok(result)
    }

    /// Runs `circuit` `shots` times and tallies the measurement bitstrings.
    pub fn sample_counts(&self, circuit: &Circuit, shots: usize) -> Result<Counts> {
        let mut rng = self.make_rng();
        let mut counts = Counts::new();
        for _ in 0..shots {
            let result = self.run_with_rng(circuit, &mut rng)?;
            *counts.entry(result.bitstring()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn make_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
