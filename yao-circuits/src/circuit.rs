use serde::{Deserialize, Serialize};
use yao_core::hash::Hash;

use crate::components::{Gate, GateType};

/// An error that can occur when constructing or evaluating a circuit.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CircuitError {
    #[error("gate {gate} references wire {wire} but the circuit only has {wire_count} wires")]
    WireOutOfRange {
        gate: usize,
        wire: usize,
        wire_count: usize,
    },
    #[error("gate {gate} reads wire {wire} before it is defined")]
    UndefinedWire { gate: usize, wire: usize },
    #[error("gate {gate} reads wire {input} which is not smaller than its output wire {output}")]
    NotTopological {
        gate: usize,
        input: usize,
        output: usize,
    },
    #[error("gate {gate} writes wire {wire} which is already defined")]
    DuplicateDefinition { gate: usize, wire: usize },
    #[error("circuit declares {wire_count} wires but its inputs and gates define only {defined}")]
    UndefinedWires { wire_count: usize, defined: usize },
    #[error("circuit declares {declared} input or output wires but only has {wire_count} wires")]
    SizeTooLarge { declared: usize, wire_count: usize },
    #[error("declared input or output sizes overflow")]
    SizeOverflow,
    #[error("Invalid number of inputs: expected {0}, got {1}")]
    InvalidInputCount(usize, usize),
}

/// A digest identifying a circuit by its header and gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitId(Hash);

impl std::fmt::Display for CircuitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A two-party binary circuit.
///
/// Wires `[0, garbler_input_size)` are the Garbler's inputs, the next
/// `evaluator_input_size` wires are the Evaluator's inputs and the last
/// `output_size` wires are the circuit outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    wire_count: usize,
    garbler_input_size: usize,
    evaluator_input_size: usize,
    output_sizes: Vec<usize>,
    gates: Vec<Gate>,
    and_count: usize,
    xor_count: usize,
}

impl Circuit {
    /// Creates a new circuit, checking that the gates are well formed and in
    /// topological order.
    ///
    /// # Arguments
    ///
    /// * `wire_count` - The total number of wires.
    /// * `garbler_input_size` - Number of Garbler input wires.
    /// * `evaluator_input_size` - Number of Evaluator input wires.
    /// * `output_sizes` - Sizes of the output values, in order.
    /// * `gates` - The gates, in evaluation order.
    pub fn new(
        wire_count: usize,
        garbler_input_size: usize,
        evaluator_input_size: usize,
        output_sizes: Vec<usize>,
        gates: Vec<Gate>,
    ) -> Result<Self, CircuitError> {
        let input_size = garbler_input_size
            .checked_add(evaluator_input_size)
            .ok_or(CircuitError::SizeOverflow)?;
        let output_size = output_sizes
            .iter()
            .try_fold(0usize, |acc, size| acc.checked_add(*size))
            .ok_or(CircuitError::SizeOverflow)?;
        for declared in [input_size, output_size] {
            if declared > wire_count {
                return Err(CircuitError::SizeTooLarge {
                    declared,
                    wire_count,
                });
            }
        }

        for gate in &gates {
            if let Some(wire) = gate.inputs().chain([gate.z()]).find(|w| *w >= wire_count) {
                return Err(CircuitError::WireOutOfRange {
                    gate: gate.id(),
                    wire,
                    wire_count,
                });
            }
        }

        // Every wire past the inputs is written by exactly one gate.
        if wire_count - input_size > gates.len() {
            return Err(CircuitError::UndefinedWires {
                wire_count,
                defined: input_size + gates.len(),
            });
        }

        // Input wires are always defined, only gate outputs are tracked.
        let mut defined = vec![false; wire_count - input_size];

        let mut and_count = 0;
        let mut xor_count = 0;
        for gate in &gates {
            let id = gate.id();
            let z = gate.z();

            for wire in gate.inputs() {
                if wire >= input_size && !defined[wire - input_size] {
                    return Err(CircuitError::UndefinedWire { gate: id, wire });
                }
                if wire >= z {
                    return Err(CircuitError::NotTopological {
                        gate: id,
                        input: wire,
                        output: z,
                    });
                }
            }

            if z < input_size || defined[z - input_size] {
                return Err(CircuitError::DuplicateDefinition { gate: id, wire: z });
            }
            defined[z - input_size] = true;

            match gate.gate_type() {
                GateType::And | GateType::Or => and_count += 1,
                GateType::Xor | GateType::Xnor => xor_count += 1,
                GateType::Inv | GateType::Eqw => {}
            }
        }

        Ok(Self {
            wire_count,
            garbler_input_size,
            evaluator_input_size,
            output_sizes,
            gates,
            and_count,
            xor_count,
        })
    }

    /// Returns the number of wires in the circuit.
    pub fn wire_count(&self) -> usize {
        self.wire_count
    }

    /// Returns the number of Garbler input wires.
    pub fn garbler_input_size(&self) -> usize {
        self.garbler_input_size
    }

    /// Returns the number of Evaluator input wires.
    pub fn evaluator_input_size(&self) -> usize {
        self.evaluator_input_size
    }

    /// Returns the total number of input wires.
    pub fn input_size(&self) -> usize {
        self.garbler_input_size + self.evaluator_input_size
    }

    /// Returns the sizes of the output values.
    pub fn output_sizes(&self) -> &[usize] {
        &self.output_sizes
    }

    /// Returns the total number of output wires.
    pub fn output_size(&self) -> usize {
        self.output_sizes.iter().sum()
    }

    /// Returns the indices of the output wires, in order.
    pub fn output_wires(&self) -> std::ops::Range<usize> {
        self.wire_count - self.output_size()..self.wire_count
    }

    /// Returns the gates of the circuit.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Returns the number of gates.
    pub fn gates_count(&self) -> usize {
        self.gates.len()
    }

    /// Returns the number of gates which require a garbled table (AND, OR).
    pub fn and_count(&self) -> usize {
        self.and_count
    }

    /// Returns the number of XOR and XNOR gates in the circuit.
    pub fn xor_count(&self) -> usize {
        self.xor_count
    }

    /// Returns the identifier of this circuit.
    pub fn id(&self) -> CircuitId {
        let mut bytes = Vec::with_capacity(32 + self.gates.len() * 25);
        for n in [
            self.wire_count,
            self.garbler_input_size,
            self.evaluator_input_size,
            self.output_sizes.len(),
        ]
        .into_iter()
        .chain(self.output_sizes.iter().copied())
        {
            bytes.extend_from_slice(&(n as u64).to_le_bytes());
        }

        for gate in &self.gates {
            bytes.push(gate.gate_type().tag());
            bytes.extend_from_slice(&(gate.x() as u64).to_le_bytes());
            bytes.extend_from_slice(&(gate.y().unwrap_or(gate.x()) as u64).to_le_bytes());
            bytes.extend_from_slice(&(gate.z() as u64).to_le_bytes());
        }

        CircuitId(Hash::digest(&bytes))
    }

    /// Evaluates the circuit on plaintext inputs.
    ///
    /// # Arguments
    ///
    /// * `garbler` - The Garbler's input bits.
    /// * `evaluator` - The Evaluator's input bits.
    ///
    /// # Returns
    ///
    /// The output bits of the circuit.
    pub fn evaluate(&self, garbler: &[bool], evaluator: &[bool]) -> Result<Vec<bool>, CircuitError> {
        if garbler.len() != self.garbler_input_size {
            return Err(CircuitError::InvalidInputCount(
                self.garbler_input_size,
                garbler.len(),
            ));
        }
        if evaluator.len() != self.evaluator_input_size {
            return Err(CircuitError::InvalidInputCount(
                self.evaluator_input_size,
                evaluator.len(),
            ));
        }

        let mut wires = vec![false; self.wire_count];
        wires[..self.garbler_input_size].copy_from_slice(garbler);
        wires[self.garbler_input_size..self.input_size()].copy_from_slice(evaluator);

        for gate in &self.gates {
            let x = wires[gate.x()];
            let y = gate.y().map(|y| wires[y]).unwrap_or(false);
            wires[gate.z()] = gate.gate_type().eval(x, y);
        }

        Ok(wires[self.output_wires()].to_vec())
    }
}
