use std::sync::Arc;

use serde::{Deserialize, Serialize};
use yao_circuits::Circuit;

use crate::{
    decoding::Decoding,
    encoding::{Label, LabelPair},
    table::GarbledTable,
};

/// Errors that can occur while encoding or decoding [`GarbledData`].
#[derive(Debug, thiserror::Error)]
#[error("garbled data serialization failed: {0}")]
pub struct SerializationError(#[from] bincode::Error);

/// The garbled circuit bundle produced by the Garbler.
///
/// The Evaluator label pairs are kept here until they are handed to the
/// oblivious transfer sender. They are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarbledData {
    circuit: Arc<Circuit>,
    garbler_labels: Vec<Label>,
    #[serde(skip)]
    evaluator_labels: Vec<LabelPair>,
    tables: Vec<GarbledTable>,
    decoding: Decoding,
}

impl GarbledData {
    pub(crate) fn new(
        circuit: Arc<Circuit>,
        garbler_labels: Vec<Label>,
        evaluator_labels: Vec<LabelPair>,
        tables: Vec<GarbledTable>,
        decoding: Decoding,
    ) -> Self {
        Self {
            circuit,
            garbler_labels,
            evaluator_labels,
            tables,
            decoding,
        }
    }

    /// Returns the garbled circuit.
    pub fn circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    /// Returns the Garbler's input labels, selected by its private input.
    pub fn garbler_labels(&self) -> &[Label] {
        &self.garbler_labels
    }

    /// Returns the label pairs of the Evaluator input wires.
    ///
    /// Empty once they have been taken or after deserialization.
    pub fn evaluator_labels(&self) -> &[LabelPair] {
        &self.evaluator_labels
    }

    /// Takes the Evaluator label pairs out of the bundle.
    pub fn take_evaluator_labels(&mut self) -> Vec<LabelPair> {
        std::mem::take(&mut self.evaluator_labels)
    }

    /// Returns the garbled tables, one per non-linear gate in gate order.
    pub fn tables(&self) -> &[GarbledTable] {
        &self.tables
    }

    /// Returns the output decoding table.
    pub fn decoding(&self) -> &Decoding {
        &self.decoding
    }

    /// Serializes the bundle into an opaque byte blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a bundle produced by [`GarbledData::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
