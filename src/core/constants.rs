//! Numeric constants shared by the simulator.

/// Tolerances and limits used across the simulator.
pub mod qplay_constants {
    /// Amplitudes with magnitude below this are left out of formatted output.
    pub const SIGNIFICANCE_THRESHOLD: f64 = 1e-10;
    /// Default allowed deviation of total probability from 1.
    pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
    /// Tolerance used when checking `U†U ≈ I` for custom gates.
    pub const UNITARY_TOLERANCE: f64 = 1e-9;
    /// Qubit count the interactive product allows by default.
    pub const DEFAULT_MAX_QUBITS: usize = 8;
    /// Largest register any state may hold: `2^24` amplitudes, 256 MiB.
    pub const MAX_SUPPORTED_QUBITS: usize = 24;
}
