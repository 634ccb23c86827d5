// src/simulation/results.rs
use crate::core::QuantumState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of measuring one qubit, with the state conditioned on it.
///
/// The caller replaces its state with `new_state`; the pre-measurement state
/// has no further meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Measured qubit.
    pub qubit: usize,
    /// 0 or 1.
    pub outcome: u8,
    /// Probability the outcome had before collapse.
    pub probability: f64,
    /// Collapsed, renormalized state.
    pub new_state: QuantumState,
}

/// Results of one simulator run: the classical record and the final state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// `(qubit, outcome)` for every measurement, in circuit order.
    measurements: Vec<(usize, u8)>,
    final_state: QuantumState,
}

impl SimulationResult {
    pub(crate) fn new(final_state: QuantumState) -> Self {
        Self {
            measurements: Vec::new(),
            final_state,
        }
    }

    pub(crate) fn record_measurement(&mut self, qubit: usize, outcome: u8) {
        self.measurements.push((qubit, outcome));
    }

    /// Every measurement in circuit order.
    pub fn measurements(&self) -> &[(usize, u8)] {
        &self.measurements
    }

    /// Most recent outcome recorded for `qubit`, if it was measured.
    pub fn last_outcome(&self, qubit: usize) -> Option<u8> {
        self.measurements
            .iter()
            .rev()
            .find(|(q, _)| *q == qubit)
            .map(|(_, outcome)| *outcome)
    }

    /// Outcomes concatenated in measurement order, e.g. `"011"`.
    pub fn bitstring(&self) -> String {
        self.measurements
            .iter()
            .map(|(_, outcome)| if *outcome == 0 { '0' } else { '1' })
            .collect()
    }

    pub fn final_state(&self) -> &QuantumState {
        &self.final_state
    }

    pub fn into_final_state(self) -> QuantumState {
        self.final_state
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.measurements.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            writeln!(f, "  Measurements:")?;
            for (qubit, outcome) in &self.measurements {
                writeln!(f, "    q{}: {}", qubit, outcome)?;
            }
        }
        writeln!(f, "  Final state: {}", self.final_state)
    }
}

/// Histogram of measurement bitstrings over repeated runs.
pub type Counts = BTreeMap<String, usize>;
