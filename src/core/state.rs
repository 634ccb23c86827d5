// src/core/state.rs

use super::complex::Complex;
use super::constants::qplay_constants::MAX_SUPPORTED_QUBITS;
use super::error::{QsimError, Result};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense state vector of an `N`-qubit register.
///
/// Holds exactly `2^N` amplitudes. Index `i` is the basis state whose binary
/// expansion, zero-padded to `N` digits, lists the qubits most-significant
/// first: qubit `q` is bit `N - 1 - q` of `i`. So for two qubits index 2 is
/// `|10⟩`, i.e. qubit 0 = 1 and qubit 1 = 0.
///
/// The qubit count is fixed for the lifetime of a vector. Operations never
/// mutate a state in place; they return a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct QuantumState {
    num_qubits: usize,
    amplitudes: Vec<Complex>,
}

#[derive(Deserialize)]
struct RawState {
    num_qubits: usize,
    amplitudes: Vec<Complex>,
}

impl TryFrom<RawState> for QuantumState {
    type Error = QsimError;

    fn try_from(raw: RawState) -> Result<Self> {
        QuantumState::from_amplitudes(raw.num_qubits, raw.amplitudes)
    }
}

/// Returns `2^num_qubits`, rejecting zero qubits and registers above
/// [`MAX_SUPPORTED_QUBITS`] before anything is allocated.
pub(crate) fn dimension_for(num_qubits: usize) -> Result<usize> {
    if num_qubits == 0 {
        return Err(QsimError::invalid("Number of qubits must be at least 1"));
    }
    if num_qubits > MAX_SUPPORTED_QUBITS {
        return Err(QsimError::QubitLimitExceeded {
            requested: num_qubits,
            max: MAX_SUPPORTED_QUBITS,
        });
    }
    Ok(1usize << num_qubits)
}

impl QuantumState {
    /// The all-zero basis state `|0...0⟩`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::basis(num_qubits, 0)
    }

    /// The computational basis state with amplitude 1 at `index`.
    pub fn basis(num_qubits: usize, index: usize) -> Result<Self> {
        let dim = dimension_for(num_qubits)?;
        if index >= dim {
            return Err(QsimError::invalid(format!(
                "Basis index {} out of range for {} qubits (dimension {})",
                index, num_qubits, dim
            )));
        }
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[index] = Complex::one();
        Ok(Self { num_qubits, amplitudes })
    }

    /// Wraps an existing amplitude vector. Its length must be `2^num_qubits`.
    /// Normalization is not enforced here; see `validation::check_normalization`.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex>) -> Result<Self> {
        let dim = dimension_for(num_qubits)?;
        if amplitudes.len() != dim {
            return Err(QsimError::invalid(format!(
                "Expected {} amplitudes for {} qubits, got {}",
                dim,
                num_qubits,
                amplitudes.len()
            )));
        }
        Ok(Self { num_qubits, amplitudes })
    }

    /// Crate-internal constructor for vectors already known to have the right length.
    pub(crate) fn from_parts(num_qubits: usize, amplitudes: Vec<Complex>) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { num_qubits, amplitudes }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitudes(&self) -> &[Complex] {
        &self.amplitudes
    }

    /// Amplitude at basis index `index`, if in range.
    pub fn amplitude(&self, index: usize) -> Option<Complex> {
        self.amplitudes.get(index).copied()
    }

    /// Consumes the state, handing back its amplitude vector.
    pub fn into_amplitudes(self) -> Vec<Complex> {
        self.amplitudes
    }

    /// Fails unless `qubit` addresses one of this state's qubits.
    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(QsimError::invalid(format!(
                "Qubit index {} out of range [0, {})",
                qubit, self.num_qubits
            )));
        }
        Ok(())
    }

    /// Mask selecting `qubit`'s bit within a basis index. Caller checks range.
    #[inline]
    pub(crate) fn bit_mask(&self, qubit: usize) -> usize {
        1 << (self.num_qubits - 1 - qubit)
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::report::format_state(self))
    }
}
