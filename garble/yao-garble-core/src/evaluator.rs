use std::sync::Arc;

use yao_circuits::{Circuit, Gate};
use yao_core::aes::{FixedKeyAes, FIXED_KEY_AES};

use crate::{
    decoding::Decoding,
    encoding::Label,
    table::{row_index, table_key, GarbledTable},
    IntegrityError,
};

/// Errors that can occur during garbled circuit evaluation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum EvaluatorError {
    #[error("invalid assignment length: expected {expected}, got {actual}")]
    AssignmentLength { expected: usize, actual: usize },
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error("evaluator not finished")]
    NotFinished,
}

/// Evaluates a garbled non-linear gate.
///
/// The permute bits of the two labels select the single row to decrypt.
#[inline]
pub(crate) fn table_gate(
    cipher: &FixedKeyAes,
    x: &Label,
    y: &Label,
    table: &GarbledTable,
    gid: usize,
) -> Result<Label, IntegrityError> {
    if table.gate() != gid {
        return Err(IntegrityError::UnexpectedTable {
            expected: gid,
            actual: table.gate(),
        });
    }

    let key = table_key(cipher, x, y, gid);
    table.rows()[row_index(x, y)]
        .decrypt(&key)
        .ok_or(IntegrityError::InvalidRow { gate: gid })
}

/// Core evaluator type for evaluating a garbled circuit.
pub struct Evaluator {
    /// Cipher to use to decrypt the gates
    cipher: &'static FixedKeyAes,
    /// The circuit being evaluated
    circuit: Arc<Circuit>,
    /// Active label state
    active_labels: Vec<Option<Label>>,
    /// Whether the evaluator is finished
    complete: bool,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("circuit", &self.circuit.id())
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

impl Evaluator {
    /// Creates a new evaluator for the given circuit.
    ///
    /// # Arguments
    ///
    /// * `circuit` - The circuit to evaluate.
    /// * `assignment` - One label per input wire, Garbler inputs first.
    pub fn new(circuit: Arc<Circuit>, assignment: &[Label]) -> Result<Self, EvaluatorError> {
        if assignment.len() != circuit.input_size() {
            return Err(EvaluatorError::AssignmentLength {
                expected: circuit.input_size(),
                actual: assignment.len(),
            });
        }

        let mut active_labels: Vec<Option<Label>> = vec![None; circuit.wire_count()];
        active_labels
            .iter_mut()
            .zip(assignment)
            .for_each(|(slot, label)| *slot = Some(*label));

        Ok(Self {
            cipher: &(*FIXED_KEY_AES),
            circuit,
            active_labels,
            complete: false,
        })
    }

    /// Evaluates every gate of the circuit in order.
    ///
    /// `tables` must hold exactly one table per non-linear gate, in gate order.
    pub fn evaluate(&mut self, tables: &[GarbledTable]) -> Result<(), EvaluatorError> {
        if self.complete {
            return Ok(());
        }

        let labels = &mut self.active_labels;
        let mut tables_iter = tables.iter();
        for gate in self.circuit.gates() {
            let x = labels[gate.x()].expect("feed should be initialized");
            let z = match *gate {
                Gate::Xor { y, .. } | Gate::Xnor { y, .. } => {
                    x ^ labels[y].expect("feed should be initialized")
                }
                Gate::Inv { .. } | Gate::Eqw { .. } => x,
                Gate::And { id, y, .. } | Gate::Or { id, y, .. } => {
                    let table = tables_iter
                        .next()
                        .ok_or(IntegrityError::MissingTable { gate: id })?;
                    let y = labels[y].expect("feed should be initialized");
                    table_gate(self.cipher, &x, &y, table, id)?
                }
            };
            labels[gate.z()] = Some(z);
        }

        let extra = tables_iter.count();
        if extra > 0 {
            return Err(IntegrityError::ExtraTables(extra).into());
        }

        tracing::debug!(
            gates = self.circuit.gates_count(),
            tables = tables.len(),
            "evaluated circuit"
        );

        self.complete = true;
        Ok(())
    }

    /// Returns whether the evaluator has finished evaluating the circuit.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the active labels of the output wires.
    pub fn outputs(&self) -> Result<Vec<Label>, EvaluatorError> {
        if !self.is_complete() {
            return Err(EvaluatorError::NotFinished);
        }

        Ok(self
            .circuit
            .output_wires()
            .map(|wire| self.active_labels[wire].expect("feed should be initialized"))
            .collect())
    }

    /// Decodes the active output labels into bits.
    pub fn decode(&self, decoding: &Decoding) -> Result<Vec<bool>, EvaluatorError> {
        let outputs = self.outputs()?;
        Ok(decoding.decode(self.circuit.output_wires(), &outputs)?)
    }
}

/// Evaluates a garbled circuit in one call and decodes its output bits.
///
/// # Arguments
///
/// * `circuit` - The circuit to evaluate.
/// * `assignment` - One label per input wire, Garbler inputs first.
/// * `tables` - The garbled tables, in gate order.
/// * `decoding` - The output decoding table.
pub fn evaluate(
    circuit: Arc<Circuit>,
    assignment: &[Label],
    tables: &[GarbledTable],
    decoding: &Decoding,
) -> Result<Vec<bool>, EvaluatorError> {
    let mut ev = Evaluator::new(circuit, assignment)?;
    ev.evaluate(tables)?;
    ev.decode(decoding)
}
