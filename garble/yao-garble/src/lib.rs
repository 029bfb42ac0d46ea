//! Two-party computation sessions over Yao garbled circuits.
//!
//! A [`Session`] drives one party through the protocol. The Garbler garbles
//! the circuit and transfers the Evaluator's input labels through oblivious
//! transfer. The Evaluator evaluates the garbled circuit on its labels.
//!
//! ```
//! use rand::thread_rng;
//! use yao_garble::{Role, Session, SessionConfig};
//! use yao_garble_core::GarbledData;
//! use yao_ot_core::{
//!     ideal::{IdealReceiver, IdealSender},
//!     OtReceiver,
//! };
//!
//! const AND: &str = "1 3\n2 1 1\n1 1\n\n2 1 0 1 2 AND\n";
//!
//! let mut garbler = Session::load_circuit_text(Role::Garbler, AND, SessionConfig::default()).unwrap();
//! let mut evaluator = Session::load_circuit_text(Role::Evaluator, AND, SessionConfig::default()).unwrap();
//!
//! garbler.set_input(vec![true]).unwrap();
//! evaluator.set_input(vec![true]).unwrap();
//!
//! let mut garbled = garbler.generate_garbling(&mut thread_rng()).unwrap();
//!
//! let receiver = IdealReceiver::new(evaluator.choices().unwrap().to_vec());
//! let sender = IdealSender::new(receiver.commitment());
//! let msgs = garbler.send_evaluator_labels(&mut garbled, &sender).unwrap();
//!
//! // Only the data without the Evaluator label pairs crosses the wire.
//! let garbled = GarbledData::from_bytes(&garbled.to_bytes().unwrap()).unwrap();
//!
//! let mut assignment = garbled.garbler_labels().to_vec();
//! assignment.extend(evaluator.receive_evaluator_labels(&receiver, &msgs).unwrap());
//!
//! let output = evaluator.evaluate_circuit(&garbled, &assignment).unwrap();
//! assert_eq!(output, vec![true]);
//! ```

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
mod input;
mod ot;
mod session;

pub use config::{Role, SessionConfig, SessionConfigBuilder, SessionConfigBuilderError};
pub use error::SessionError;
pub use input::Input;
pub use session::Session;
