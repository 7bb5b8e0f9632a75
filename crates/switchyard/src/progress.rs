//! Progress reporting channel handed to handler invocations.

use tokio::sync::mpsc;

use crate::envelope::StreamFrame;

/// Sends `Progress` frames on behalf of a running handler.
///
/// In one-shot dispatch the sink is inert: the same handler code runs, its
/// progress reports are dropped, and only the delivery schedule differs,
/// never the terminal value. A sink is also how a handler observes client
/// disconnection mid-stream.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: Option<mpsc::Sender<StreamFrame>>,
}

impl ProgressSink {
    pub(crate) fn live(tx: mpsc::Sender<StreamFrame>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A sink that drops every report; used for one-shot dispatch.
    pub fn inert() -> Self {
        Self { tx: None }
    }

    /// Report a human-readable progress message.
    ///
    /// Dropped silently when nobody is listening or the client has gone
    /// away; progress is never a correctness requirement.
    pub async fn report(&self, message: impl Into<String>) {
        if let Some(tx) = &self.tx {
            let _ = tx
                .send(StreamFrame::Progress {
                    message: message.into(),
                })
                .await;
        }
    }

    /// True once the receiving side has disconnected.
    ///
    /// The dispatcher aborts a streaming handler's task when the client
    /// disconnects, so most handlers never need this. It matters for
    /// handlers that offload work the abort cannot reach, such as
    /// `spawn_blocking` sections, which should poll it between chunks.
    pub fn is_cancelled(&self) -> bool {
        self.tx.as_ref().is_some_and(mpsc::Sender::is_closed)
    }

    /// Resolves when the receiving side disconnects. Never resolves for an
    /// inert sink.
    pub(crate) async fn closed(&self) {
        match &self.tx {
            Some(tx) => tx.closed().await,
            None => std::future::pending().await,
        }
    }
}
