use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::http::handler::{ServeContext, build_response};
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// One client connection, carrying exactly one request and one response.
///
/// The stream is owned by the connection and closed when it is dropped, so
/// every exit from [`Connection::run`] releases it.
pub struct Connection<S> {
    stream: S,
    ctx: Arc<ServeContext>,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    Parsing,
    Responding(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<ServeContext>) -> Self {
        Self {
            stream,
            ctx,
            state: ConnectionState::Parsing,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Parsing => {
                    let request = self.read_request().await?;
                    self.state = ConnectionState::Responding(request);
                }

                ConnectionState::Responding(request) => {
                    let response = build_response(request, &self.ctx).await;
                    info!(
                        status = response.status.as_u16(),
                        path = %request.path,
                        "Response ready"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    debug!(bytes = writer.remaining(), "Writing response");
                    with_deadline(self.ctx.io_timeout, writer.write_to_stream(&mut self.stream))
                        .await
                        .context("failed to write response")?;

                    if let Err(e) = self.stream.shutdown().await {
                        debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<Request> {
        let mut reader = BufReader::new(&mut self.stream);
        let default_document = self.ctx.default_document.as_str();

        let request = with_deadline(self.ctx.io_timeout, async {
            Ok(parse_request(&mut reader, default_document).await?)
        })
        .await
        .context("failed to read request")?;

        debug!(path = %request.path, "Parsed request");
        Ok(request)
    }
}

async fn with_deadline<F, T>(limit: Option<Duration>, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| anyhow::anyhow!("timed out after {limit:?}"))?,
        None => fut.await,
    }
}
