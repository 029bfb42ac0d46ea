//! Output decoding.
//!
//! For every output wire the Garbler publishes the hashes of both labels,
//! domain-separated by the wire index. The Evaluator hashes the label it holds
//! and looks it up. The hashes do not reveal the label it does not hold.

use serde::{Deserialize, Serialize};
use yao_core::{hash::hash_block, Block};

use crate::{
    encoding::{Label, LabelPair},
    IntegrityError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DecodingEntry {
    wire: usize,
    hashes: [Block; 2],
}

/// Output decoding table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoding(Vec<DecodingEntry>);

impl Decoding {
    pub(crate) fn new(outputs: impl IntoIterator<Item = (usize, LabelPair)>) -> Self {
        Self(
            outputs
                .into_iter()
                .map(|(wire, pair)| DecodingEntry {
                    wire,
                    hashes: [
                        hash_block(pair.low().to_inner(), wire as u64),
                        hash_block(pair.high().to_inner(), wire as u64),
                    ],
                })
                .collect(),
        )
    }

    /// Returns the number of output wires covered by this table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes output labels into bits.
    ///
    /// # Arguments
    ///
    /// * `wires` - The output wire indices, in output order.
    /// * `labels` - The labels held for those wires.
    pub fn decode(
        &self,
        wires: impl ExactSizeIterator<Item = usize>,
        labels: &[Label],
    ) -> Result<Vec<bool>, IntegrityError> {
        if wires.len() != self.0.len() {
            return Err(IntegrityError::DecodingLength {
                expected: wires.len(),
                actual: self.0.len(),
            });
        }
        if labels.len() != self.0.len() {
            return Err(IntegrityError::DecodingLength {
                expected: self.0.len(),
                actual: labels.len(),
            });
        }

        wires
            .zip(&self.0)
            .zip(labels)
            .map(|((wire, entry), label)| {
                if entry.wire != wire {
                    return Err(IntegrityError::UnknownOutputLabel { wire });
                }

                let hash = hash_block(label.to_inner(), wire as u64);
                if hash == entry.hashes[0] {
                    Ok(false)
                } else if hash == entry.hashes[1] {
                    Ok(true)
                } else {
                    Err(IntegrityError::UnknownOutputLabel { wire })
                }
            })
            .collect()
    }
}
