//! Transfer of Evaluator input labels via oblivious transfer.

use rayon::prelude::*;
use yao_garble_core::{Label, LabelPair};
use yao_ot_core::{OtError, OtReceiver, OtSender};

use crate::error::SessionError;

/// Runs `task` for every offset in `0..count`.
///
/// In parallel mode the tasks run on the rayon pool and complete in any
/// order. The indexed collect places each result at its offset and returns
/// only after every task has finished. The first error by offset is returned.
fn dispatch<T, F>(count: usize, parallel: bool, task: F) -> Result<Vec<T>, SessionError>
where
    T: Send,
    F: Fn(usize) -> Result<T, OtError> + Sync,
{
    let results: Vec<Result<T, OtError>> = if parallel {
        (0..count).into_par_iter().map(&task).collect()
    } else {
        (0..count).map(&task).collect()
    };

    results
        .into_iter()
        .collect::<Result<_, _>>()
        .map_err(SessionError::from)
}

/// Hands both labels of every Evaluator input wire to the sender.
///
/// Messages are returned in wire order.
pub(crate) fn send_labels<S: OtSender>(
    sender: &S,
    pairs: &[LabelPair],
    parallel: bool,
) -> Result<Vec<S::Msg>, SessionError> {
    dispatch(pairs.len(), parallel, |offset| {
        let pair = &pairs[offset];
        sender.send(offset, pair.low().to_bytes(), pair.high().to_bytes())
    })
}

/// Opens the label of every Evaluator input wire.
pub(crate) fn receive_labels<R: OtReceiver>(
    receiver: &R,
    msgs: &[R::Msg],
    parallel: bool,
) -> Result<Vec<Label>, SessionError> {
    if msgs.len() != receiver.count() {
        return Err(SessionError::LengthMismatch {
            what: "OT message",
            expected: receiver.count(),
            actual: msgs.len(),
        });
    }

    dispatch(msgs.len(), parallel, |offset| {
        receiver.recv(offset, &msgs[offset]).map(Label::from)
    })
}
