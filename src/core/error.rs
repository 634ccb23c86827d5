//! Error handling logic

use thiserror::Error;

/// Failures reported by the simulator.
///
/// Every variant is raised at call entry, before any new state is built, so a
/// failed call never leaves a partially transformed state behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QsimError {
    /// A qubit index, qubit count, amplitude vector or sample was rejected.
    #[error("Invalid Argument: {message}")]
    InvalidArgument {
        /// InvalidArgument failure message
        message: String,
    },

    /// Requested qubit count is above the configured or supported maximum.
    #[error("Qubit Limit Exceeded: requested {requested} qubits, maximum is {max}")]
    QubitLimitExceeded {
        /// Qubit count asked for
        requested: usize,
        /// Ceiling that applied
        max: usize,
    },

    /// The sampled measurement branch carries no probability mass.
    #[error("Zero-Probability Measurement: qubit {qubit} has no support for outcome {outcome}")]
    ZeroProbabilityMeasurement {
        /// Measured qubit
        qubit: usize,
        /// Outcome that was drawn
        outcome: u8,
    },

    /// Total probability moved away from 1 by more than the tolerance.
    /// Advisory: only the validation helpers return it.
    #[error("Normalization Drift: total probability {total} deviates from 1 by more than {tolerance}")]
    NormalizationDrift {
        /// Sum of squared magnitudes
        total: f64,
        /// Tolerance that was exceeded
        tolerance: f64,
    },

    /// No built-in gate goes by this name.
    #[error("Unknown Gate: '{name}'")]
    UnknownGate {
        /// Name that failed to resolve
        name: String,
    },

    /// Simulator configuration could not be parsed or is out of range.
    #[error("Configuration Error: {message}")]
    Config {
        /// Config failure message
        message: String,
    },
}

impl QsimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QsimError::InvalidArgument { message: message.into() }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QsimError>;
