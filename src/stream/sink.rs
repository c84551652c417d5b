use core::fmt;
use std::{mem, pin::pin, sync::Arc};

use futures::{Stream, StreamExt as _};
use parking_lot::Mutex;
use tracing::trace;
use zeroize::Zeroizing;

use crate::{Error, Result};

type Listener = Box<dyn FnOnce(&[u8]) + Send>;

/// Whether a [`DataSink`] still accepts data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkState {
    /// Accepting writes.
    Open,
    /// Complete. Further writes are rejected.
    Closed,
}

struct Inner {
    buffer: Zeroizing<Vec<u8>>,
    state: SinkState,
    listeners: Vec<Listener>,
}

/// An in-memory byte buffer that is filled incrementally and then closed.
///
/// Handles are cheap to clone and all refer to the same buffer. Since a sink
/// may carry key material, the buffer is zeroized once the last handle is
/// dropped.
#[derive(Clone)]
pub struct DataSink {
    inner: Arc<Mutex<Inner>>,
}

impl Default for DataSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSink {
    fn with_state(buffer: Vec<u8>, state: SinkState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                buffer: Zeroizing::new(buffer),
                state,
                listeners: Vec::new(),
            })),
        }
    }

    /// An empty, open sink.
    pub fn new() -> Self {
        Self::with_state(Vec::new(), SinkState::Open)
    }

    /// A sink that is already closed with `contents`.
    pub fn ready(contents: impl Into<Vec<u8>>) -> Self {
        Self::with_state(contents.into(), SinkState::Closed)
    }

    /// Appends `chunk`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkClosed`] if the sink was closed already.
    pub fn write(&self, chunk: impl AsRef<[u8]>) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.state == SinkState::Closed {
            return Err(Error::SinkClosed);
        }
        inner.buffer.extend_from_slice(chunk.as_ref());
        Ok(())
    }

    /// Closes the sink and notifies every close listener.
    ///
    /// Returns `false` if the sink was closed before, in which case nobody is
    /// notified again.
    pub fn close(&self) -> bool {
        let (listeners, contents) = {
            let mut inner = self.inner.lock();
            if inner.state == SinkState::Closed {
                return false;
            }
            inner.state = SinkState::Closed;
            (
                mem::take(&mut inner.listeners),
                Zeroizing::new(inner.buffer.to_vec()),
            )
        };

        trace!(len = contents.len(), listeners = listeners.len(), "sink closed");
        // listeners may touch this sink again, so the lock is released first
        for listener in listeners {
            listener(&contents);
        }
        true
    }

    /// Writes `chunk` and closes the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkClosed`] if the sink was closed already.
    pub fn end(&self, chunk: impl AsRef<[u8]>) -> Result<()> {
        self.write(chunk)?;
        self.close();
        Ok(())
    }

    /// Writes every item of `stream`, then closes the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkClosed`] if the sink gets closed by someone else
    /// while the stream is still producing.
    pub async fn pipe_from<S>(&self, stream: S) -> Result<()>
    where
        S: Stream,
        S::Item: AsRef<[u8]>,
    {
        let mut stream = pin!(stream);
        while let Some(chunk) = stream.next().await {
            self.write(chunk)?;
        }
        self.close();
        Ok(())
    }

    /// Runs `listener` with the complete contents once the sink is closed.
    ///
    /// On a sink that is closed already the listener runs right away.
    pub fn on_close(&self, listener: impl FnOnce(&[u8]) + Send + 'static) {
        let contents = {
            let mut inner = self.inner.lock();
            if inner.state == SinkState::Open {
                inner.listeners.push(Box::new(listener));
                return;
            }
            Zeroizing::new(inner.buffer.to_vec())
        };
        listener(&contents);
    }

    /// The current state.
    pub fn state(&self) -> SinkState {
        self.inner.lock().state
    }

    /// Whether the sink is closed.
    pub fn is_closed(&self) -> bool {
        self.state() == SinkState::Closed
    }

    /// A copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.inner.lock().buffer.to_vec()
    }
}

impl fmt::Debug for DataSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("DataSink")
            .field("state", &inner.state)
            .field("len", &inner.buffer.len())
            .finish_non_exhaustive()
    }
}
