//! Boolean circuits for two-party garbled circuit protocols.
//!
//! Circuits are read from the Bristol Fashion text format with [`Circuit::parse`]
//! and are immutable afterwards. Gates are stored in topological order: every
//! gate only reads wires with a smaller index than the wire it writes.
//!
//! # Example
//!
//! ```
//! use yao_circuits::Circuit;
//!
//! let text = "1 3\n2 1 1\n1 1\n\n2 1 0 1 2 AND\n";
//! let circuit = Circuit::parse(text).unwrap();
//!
//! assert_eq!(circuit.evaluate(&[true], &[true]).unwrap(), vec![true]);
//! assert_eq!(circuit.evaluate(&[true], &[false]).unwrap(), vec![false]);
//! ```

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]

mod circuit;
mod components;
mod parse;

pub use circuit::{Circuit, CircuitError, CircuitId};
pub use components::{Gate, GateType};
pub use parse::ParseError;
