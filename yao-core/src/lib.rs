//! Core types and utilities shared by the garbling crates.
#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(clippy::all)]

pub mod aes;
pub mod block;
pub mod hash;
pub mod utils;

pub use block::Block;
