// src/core/mod.rs

//! Core data structures and types

pub mod complex;
pub mod error;
pub mod state;

pub use complex::{Complex, add, magnitude, multiply, phase};
pub use error::{QsimError, Result};
pub use state::QuantumState;

pub mod constants;
pub use constants::qplay_constants::{
    DEFAULT_MAX_QUBITS, DEFAULT_NORM_TOLERANCE, MAX_SUPPORTED_QUBITS, SIGNIFICANCE_THRESHOLD,
    UNITARY_TOLERANCE,
};
