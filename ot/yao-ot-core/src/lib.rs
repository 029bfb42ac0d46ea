//! Boundary of the oblivious transfer (OT) subsystem.
//!
//! The garbling engine does not implement OT. It hands both candidate labels
//! of every Evaluator input wire to an [`OtSender`], and the Evaluator obtains
//! the label matching its private bit from an [`OtReceiver`]. Implementations
//! must guarantee that the sender learns nothing about the choice bits and that
//! the receiver learns nothing about the label it did not choose.
//!
//! A session starts with the receiver publishing [`OtReceiver::commitment`]
//! to its choice bits; the sender is constructed from that commitment.
//!
//! # ⚠️ Warning ⚠️
//!
//! The [`ideal`] module provides no security at all and exists for tests and
//! local simulation only.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

#[cfg(any(test, feature = "ideal"))]
pub mod ideal;

/// Size of an OT message in bytes.
pub const MSG_SIZE: usize = 16;

/// Errors that can occur during oblivious transfer.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum OtError {
    #[error("wire offset {offset} is out of range for {count} transfers")]
    OffsetOutOfRange { offset: usize, count: usize },
    #[error("malformed OT message: {0}")]
    MalformedMessage(String),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Sending side of an oblivious transfer of 16-byte messages.
///
/// Each offset is an independent transfer, so implementations must support
/// calls for different offsets from multiple threads.
pub trait OtSender: Sync {
    /// The opaque message delivered to the receiver.
    type Msg: Send + Sync;

    /// Prepares the transfer of `m0` or `m1` for the `offset`-th choice bit
    /// of the receiver.
    fn send(
        &self,
        offset: usize,
        m0: [u8; MSG_SIZE],
        m1: [u8; MSG_SIZE],
    ) -> Result<Self::Msg, OtError>;
}

/// Receiving side of an oblivious transfer of 16-byte messages.
pub trait OtReceiver: Sync {
    /// The opaque message produced by the sender.
    type Msg: Send + Sync;
    /// The opaque commitment to the choice bits.
    type Commitment;

    /// Returns the commitment to the receiver's choice bits.
    fn commitment(&self) -> Self::Commitment;

    /// Returns the number of choice bits.
    fn count(&self) -> usize;

    /// Opens the message for the `offset`-th choice bit.
    fn recv(&self, offset: usize, msg: &Self::Msg) -> Result<[u8; MSG_SIZE], OtError>;
}
