use core::{fmt, future::Future};
use std::sync::Arc;

use futures::{
    channel::oneshot,
    future::{BoxFuture, FutureExt as _},
};
use parking_lot::Mutex;
use tracing::trace;
use zeroize::Zeroizing;

use super::DataSink;
use crate::{Error, Result};

type Action<T> = Box<dyn FnOnce(Vec<u8>, Vec<u8>) -> BoxFuture<'static, Result<T>> + Send>;

struct Gate<T> {
    slots: [Option<Zeroizing<Vec<u8>>>; 2],
    action: Option<Action<T>>,
    sender: Option<oneshot::Sender<BoxFuture<'static, Result<T>>>>,
    fired: bool,
}

impl<T> Gate<T> {
    /// Takes the permit of sink `index`. The second permit fires the action.
    fn release(gate: &Mutex<Self>, index: usize, contents: &[u8]) {
        let (action, sender, first, second) = {
            let mut gate = gate.lock();
            if gate.fired {
                return;
            }
            gate.slots[index] = Some(Zeroizing::new(contents.to_vec()));

            let [Some(_), Some(_)] = &gate.slots else {
                return;
            };
            gate.fired = true;

            let [first, second] = [gate.slots[0].take(), gate.slots[1].take()];
            match (gate.action.take(), gate.sender.take(), first, second) {
                (Some(action), Some(sender), Some(first), Some(second)) => {
                    (action, sender, first, second)
                }
                _ => return,
            }
        };

        trace!("both sinks closed, firing");
        let future = action(first.to_vec(), second.to_vec());
        if sender.send(future).is_err() {
            trace!("pipeline dropped before it fired");
        }
    }
}

/// Joins two [`DataSink`]s and runs an action once both are closed.
///
/// The action receives the contents of the first and the second sink, in
/// that order. It runs at most once, however often the sinks are closed.
/// Its future is what [`finish`](Self::finish) awaits.
pub struct Accumulator<T> {
    receiver: oneshot::Receiver<BoxFuture<'static, Result<T>>>,
    gate: Arc<Mutex<Gate<T>>>,
}

impl<T: Send + 'static> Accumulator<T> {
    /// Attaches `action` to `first` and `second`.
    ///
    /// If both sinks are closed already, the action runs right here.
    pub fn new<F, Fut>(first: &DataSink, second: &DataSink, action: F) -> Self
    where
        F: FnOnce(Vec<u8>, Vec<u8>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let action: Action<T> = Box::new(move |first, second| action(first, second).boxed());
        let gate = Arc::new(Mutex::new(Gate {
            slots: [None, None],
            action: Some(action),
            sender: Some(sender),
            fired: false,
        }));

        for (index, sink) in [first, second].into_iter().enumerate() {
            let gate = Arc::clone(&gate);
            sink.on_close(move |contents| Gate::release(&gate, index, contents));
        }

        Self { receiver, gate }
    }
}

impl<T> Accumulator<T> {
    /// Whether both sinks closed and the action ran.
    pub fn has_fired(&self) -> bool {
        self.gate.lock().fired
    }

    /// Waits for both sinks to close and then for the action to complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PipelineAbandoned`] if every handle of a sink that
    /// was still open got dropped, and whatever the action returns
    /// otherwise.
    pub async fn finish(self) -> Result<T> {
        let Self { receiver, gate } = self;
        // only the sinks' listeners may keep the gate alive from here on
        drop(gate);

        let future = receiver.await.map_err(|_| Error::PipelineAbandoned)?;
        future.await
    }
}

impl<T> fmt::Debug for Accumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("fired", &self.has_fired())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::executor::block_on;

    use super::*;

    type Concat = futures::future::Ready<Result<Vec<u8>>>;

    fn concat(calls: &Arc<AtomicUsize>) -> impl FnOnce(Vec<u8>, Vec<u8>) -> Concat {
        let calls = Arc::clone(calls);
        move |mut first, second| {
            calls.fetch_add(1, Ordering::SeqCst);
            first.extend(second);
            futures::future::ready(Ok(first))
        }
    }

    #[test]
    fn fires_after_both_sinks_close() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (first, second) = (DataSink::new(), DataSink::new());
        let accumulator = Accumulator::new(&first, &second, concat(&calls));

        second.end("b").unwrap();
        assert!(!accumulator.has_fired());
        first.end("a").unwrap();
        assert!(accumulator.has_fired());

        assert_eq!(block_on(accumulator.finish()).unwrap(), b"ab");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeated_closes_fire_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (first, second) = (DataSink::new(), DataSink::new());
        let accumulator = Accumulator::new(&first, &second, concat(&calls));

        for _ in 0..2 {
            first.close();
            second.close();
        }

        assert!(block_on(accumulator.finish()).unwrap().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ready_sinks_fire_on_construction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let accumulator = Accumulator::new(
            &DataSink::ready("a"),
            &DataSink::ready("b"),
            concat(&calls),
        );

        assert!(accumulator.has_fired());
        assert_eq!(block_on(accumulator.finish()).unwrap(), b"ab");
    }

    #[test]
    fn dropped_sinks_abandon_the_pipeline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let accumulator = {
            let (first, second) = (DataSink::new(), DataSink::new());
            first.end("a").unwrap();
            Accumulator::new(&first, &second, concat(&calls))
        };

        assert!(matches!(block_on(accumulator.finish()), Err(Error::PipelineAbandoned)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
