// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s over a fixed-size qubit register,
//! and a builder for putting them together.

use crate::core::{QsimError, Result};
use crate::gates::{Gate, QuantumGate};
use crate::operations::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered list of operations over `num_qubits` qubits.
///
/// Qubit indices are checked against `num_qubits` by [`Circuit::validate`],
/// which the simulator calls before touching any state.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Appends a single operation.
    pub fn add_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Appends every operation from `ops`, in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of `Measure` operations, i.e. the length of the classical record.
    pub fn measurement_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Measure { .. }))
            .count()
    }

    /// Checks every qubit index against the register size and that no CNOT
    /// uses the same qubit as control and target.
    pub fn validate(&self) -> Result<()> {
        if self.num_qubits == 0 {
            return Err(QsimError::invalid("Circuit must act on at least 1 qubit"));
        }
        for (step, op) in self.operations.iter().enumerate() {
            for qubit in op.involved_qubits() {
                if qubit >= self.num_qubits {
                    return Err(QsimError::invalid(format!(
                        "Operation {} ({}) references qubit {} outside [0, {})",
                        step, op, qubit, self.num_qubits
                    )));
                }
            }
            if let Operation::Cnot { control, target } = op {
                if control == target {
                    return Err(QsimError::invalid(format!(
                        "Operation {} ({}): control and target must differ",
                        step, op
                    )));
                }
            }
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chaining builder for [`Circuit`].
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Appends a named gate on `target`.
    pub fn gate(self, gate: Gate, target: usize) -> Self {
        let label = gate.to_string();
        self.add_op(Operation::Gate {
            gate: QuantumGate::from(gate),
            target,
            label,
        })
    }

    /// Appends an arbitrary (already validated) gate on `target`.
    pub fn custom_gate(self, gate: QuantumGate, label: &str, target: usize) -> Self {
        self.add_op(Operation::Gate {
            gate,
            target,
            label: label.to_string(),
        })
    }

    pub fn cnot(self, control: usize, target: usize) -> Self {
        self.add_op(Operation::Cnot { control, target })
    }

    pub fn measure(self, qubit: usize) -> Self {
        self.add_op(Operation::Measure { qubit })
    }

    /// Measures every qubit in index order.
    pub fn measure_all(mut self) -> Self {
        for qubit in 0..self.circuit.num_qubits {
            self = self.measure(qubit);
        }
        self
    }

    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_ops = self.operations.len();
        let rows = self.num_qubits;
        writeln!(f, "qplay::Circuit[{} operations on {} qubits]", num_ops, rows)?;
        if num_ops == 0 || rows == 0 {
            return Ok(());
        }

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                let post = total - pre;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre),
                    symbol,
                    H_WIRE.to_string().repeat(post)
                )
            }
        }

        // op_grid[row][time]; v_connect[row][time] is the connector below `row`
        let mut op_grid = vec![vec![WIRE.to_string(); num_ops]; rows];
        let mut v_connect = vec![vec![' '; num_ops]; rows];

        for (t, op) in self.operations.iter().enumerate() {
            match op {
                Operation::Gate { label, target, .. } => {
                    if *target < rows && label != "I" {
                        op_grid[*target][t] = format_gate(label);
                    }
                }
                Operation::Cnot { control, target } => {
                    if *control < rows && *target < rows {
                        op_grid[*control][t] = format_gate("@");
                        op_grid[*target][t] = format_gate("X");
                        let r_min = (*control).min(*target);
                        let r_max = (*control).max(*target);
                        for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row[t] = V_WIRE;
                        }
                    }
                }
                Operation::Measure { qubit } => {
                    if *qubit < rows {
                        op_grid[*qubit][t] = format_gate("M");
                    }
                }
            }
        }

        let label_width = format!("q{}: ", rows - 1).len();
        for r in 0..rows {
            write!(f, "{:<width$}", format!("q{}: ", r), width = label_width)?;
            writeln!(f, "{}", op_grid[r].join(""))?;
            if r < rows - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_ops {
                    let pad = GATE_WIDTH - 1;
                    let pre = pad / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(pad - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
