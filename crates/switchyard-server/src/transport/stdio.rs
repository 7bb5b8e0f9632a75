//! Line-delimited JSON over stdin/stdout.
//!
//! One request per line. One-shot requests produce a single envelope line;
//! streaming requests produce one line per frame, terminal frame last.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use switchyard::Dispatcher;

use super::framing;

pub struct StdioTransport {
    dispatcher: Dispatcher,
}

impl StdioTransport {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve until stdin reaches end of file.
    pub async fn run(self) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        info!("serving on stdio");
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let request = match framing::parse_request(&line) {
                Ok(request) => request,
                Err(envelope) => {
                    stdout.write_all(framing::frame(&envelope).as_bytes()).await?;
                    stdout.flush().await?;
                    continue;
                }
            };

            debug!(method = %request.method, stream = request.stream, "request");
            if request.stream {
                let mut frames = self.dispatcher.dispatch_streaming(request);
                while let Some(frame) = frames.recv().await {
                    stdout.write_all(framing::frame(&frame).as_bytes()).await?;
                    stdout.flush().await?;
                }
            } else {
                let envelope = self.dispatcher.dispatch(request).await;
                stdout.write_all(framing::frame(&envelope).as_bytes()).await?;
                stdout.flush().await?;
            }
        }
        info!("stdin closed, shutting down");
        Ok(())
    }
}
