// src/operations/mod.rs

//! The operations a circuit is made of.

use crate::gates::QuantumGate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Applies a 2×2 unitary to `target`.
    Gate {
        /// The gate matrix.
        gate: QuantumGate,
        /// Qubit acted on.
        target: usize,
        /// Label kept for display; the matrix alone defines the action.
        label: String,
    },

    /// Flips `target` on the basis states where `control` is 1.
    Cnot {
        control: usize,
        target: usize,
    },

    /// Measures `qubit` in the computational basis and collapses the state.
    Measure {
        qubit: usize,
    },
}

impl Operation {
    /// Qubit indices this operation names, in parameter order.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::Cnot { control, target } => vec![*control, *target],
            Operation::Measure { qubit } => vec![*qubit],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate { label, target, .. } => write!(f, "{} q{}", label, target),
            Operation::Cnot { control, target } => write!(f, "CNOT q{} -> q{}", control, target),
            Operation::Measure { qubit } => write!(f, "MEASURE q{}", qubit),
        }
    }
}
