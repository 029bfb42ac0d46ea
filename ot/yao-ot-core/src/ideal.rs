//! Ideal oblivious transfer.
//!
//! The "messages" carry both plaintexts, so the receiver could read either.
//! This only models the interface and MUST NOT be used outside of tests and
//! local simulation.

use serde::{Deserialize, Serialize};
use yao_core::hash::Hash;

use crate::{OtError, OtReceiver, OtSender, MSG_SIZE};

/// Commitment of the ideal receiver: a digest of its choice bits plus their count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealCommitment {
    digest: Hash,
    count: usize,
}

/// Message of the ideal sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealMsg {
    offset: usize,
    msgs: [[u8; MSG_SIZE]; 2],
}

/// Ideal OT sender.
#[derive(Debug, Clone)]
pub struct IdealSender {
    commitment: IdealCommitment,
}

impl IdealSender {
    /// Creates a sender bound to a receiver commitment.
    pub fn new(commitment: IdealCommitment) -> Self {
        Self { commitment }
    }
}

impl OtSender for IdealSender {
    type Msg = IdealMsg;

    fn send(
        &self,
        offset: usize,
        m0: [u8; MSG_SIZE],
        m1: [u8; MSG_SIZE],
    ) -> Result<Self::Msg, OtError> {
        if offset >= self.commitment.count {
            return Err(OtError::OffsetOutOfRange {
                offset,
                count: self.commitment.count,
            });
        }

        Ok(IdealMsg {
            offset,
            msgs: [m0, m1],
        })
    }
}

/// Ideal OT receiver.
#[derive(Debug, Clone)]
pub struct IdealReceiver {
    choices: Vec<bool>,
}

impl IdealReceiver {
    /// Creates a receiver with the given choice bits.
    pub fn new(choices: Vec<bool>) -> Self {
        Self { choices }
    }
}

impl OtReceiver for IdealReceiver {
    type Msg = IdealMsg;
    type Commitment = IdealCommitment;

    fn commitment(&self) -> Self::Commitment {
        let bytes: Vec<u8> = self.choices.iter().map(|bit| *bit as u8).collect();
        IdealCommitment {
            digest: Hash::digest(&bytes),
            count: self.choices.len(),
        }
    }

    fn count(&self) -> usize {
        self.choices.len()
    }

    fn recv(&self, offset: usize, msg: &Self::Msg) -> Result<[u8; MSG_SIZE], OtError> {
        let choice = *self
            .choices
            .get(offset)
            .ok_or(OtError::OffsetOutOfRange {
                offset,
                count: self.choices.len(),
            })?;

        if msg.offset != offset {
            return Err(OtError::MalformedMessage(format!(
                "message for offset {} opened at offset {offset}",
                msg.offset
            )));
        }

        Ok(msg.msgs[choice as usize])
    }
}
