//! Core components used to implement Yao's garbled circuit protocol.
//!
//! Garbling uses the free-XOR technique for linear gates and full 4-row
//! point-and-permute tables for non-linear gates.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use yao_circuits::Circuit;
//! use yao_garble_core::{evaluate, Generator};
//!
//! let circuit = Arc::new(Circuit::parse("1 3\n2 1 1\n1 1\n\n2 1 0 1 2 AND\n").unwrap());
//! let mut rng = rand::thread_rng();
//!
//! let mut gen = Generator::new(circuit.clone(), &mut rng);
//! gen.generate(&mut rng);
//! let mut garbled = gen.finish(&[true]).unwrap();
//!
//! // The Evaluator would receive its label through oblivious transfer.
//! let evaluator_label = garbled.take_evaluator_labels()[0].select(true);
//!
//! let mut assignment = garbled.garbler_labels().to_vec();
//! assignment.push(evaluator_label);
//!
//! let output = evaluate(circuit, &assignment, garbled.tables(), garbled.decoding()).unwrap();
//! assert_eq!(output, vec![true]);
//! ```

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]

mod data;
mod decoding;
pub mod encoding;
mod evaluator;
mod generator;
mod table;

pub use data::{GarbledData, SerializationError};
pub use decoding::Decoding;
pub use encoding::{Delta, Label, LabelPair};
pub use evaluator::{evaluate, Evaluator, EvaluatorError};
pub use generator::{garble, Generator, GeneratorError};
pub use table::{table_key, EncryptedRow, GarbledTable, KeyMaterial};

/// Errors signalling a corrupted or incompatible garbling.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum IntegrityError {
    #[error("missing garbled table for gate {gate}")]
    MissingTable { gate: usize },
    #[error("expected garbled table for gate {expected}, got table for gate {actual}")]
    UnexpectedTable { expected: usize, actual: usize },
    #[error("{0} garbled tables left over after evaluation")]
    ExtraTables(usize),
    #[error("garbled table row of gate {gate} did not decrypt under the active labels")]
    InvalidRow { gate: usize },
    #[error("decoding table covers {actual} outputs, expected {expected}")]
    DecodingLength { expected: usize, actual: usize },
    #[error("label of output wire {wire} matches no decoding entry")]
    UnknownOutputLabel { wire: usize },
    #[error("garbled data was produced for a different circuit")]
    CircuitMismatch,
}
