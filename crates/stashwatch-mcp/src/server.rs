//! Line-delimited JSON-RPC server loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use stashwatch_client::{ClientConfig, LogstashClient};
use stashwatch_core::Result;
use stashwatch_diag::DiagnosticEngine;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::protocol::{Response, parse_request};
use crate::session::Session;
use crate::tools::{self, LogstashTools};

/// Serves one [`Session`] over a byte stream.
///
/// Requests are handled strictly one at a time: a command, including its
/// upstream calls, completes before the next line is read.
pub struct McpServer {
    session: Session,
}

impl McpServer {
    /// Wrap an existing session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Build the production server: HTTP client, catalog and engine.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let client = LogstashClient::new(
            ClientConfig::new(config.logstash_url.clone())
                .with_probe_timeout(Duration::from_secs(config.probe_timeout_secs))
                .with_request_timeout(Duration::from_secs(config.request_timeout_secs)),
        )?;
        let tools = LogstashTools::new(
            Arc::new(client),
            DiagnosticEngine::new(config.thresholds.clone()),
        );
        Ok(Self::new(Session::new(tools::registry()?, tools)))
    }

    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.session.registry().tool_count()
    }

    /// Read requests from `reader` until EOF, writing one response line per
    /// request to `writer`.
    ///
    /// Lines are read as raw bytes, so input that is not UTF-8 is answered
    /// with a parse error like any other malformed line. Blank lines are
    /// skipped. Only I/O failures end the loop early.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }

            let response = match parse_request(line) {
                Ok(request) => self.session.handle(request).await,
                Err(error) => {
                    tracing::warn!(error = %error.message, "Unparseable request");
                    Some(Response::failure(None, error))
                }
            };

            if let Some(response) = response {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        tracing::debug!("Input closed");
        Ok(())
    }

    /// Serve on process stdin/stdout.
    pub async fn serve_stdio(&mut self) -> io::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}
