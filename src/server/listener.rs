use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::{Config, validate_max_connections};
use crate::http::connection::Connection;
use crate::http::handler::ServeContext;

/// Pause after a failed `accept` so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Binds `cfg.listen_addr` and serves connections until the process exits.
///
/// Failing to bind is fatal and returned to the caller.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    let ctx = Arc::new(ServeContext::from_config(cfg));
    info!(
        "Serving {} (default document {})",
        ctx.root.path().display(),
        ctx.default_document
    );
    info!(
        "Supported file types: {}",
        ctx.content_types.extensions().join(", ")
    );

    serve(listener, ctx, cfg.max_connections).await
}

/// Accepts connections on `listener`, spawning one task per connection.
///
/// With `max_connections` set, accepting pauses while that many connections
/// are in flight. A failing connection is logged and never stops the loop.
pub async fn serve(
    listener: TcpListener,
    ctx: Arc<ServeContext>,
    max_connections: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(max) = max_connections {
        validate_max_connections(max).context("invalid connection limit")?;
    }
    let limit = max_connections.map(|n| Arc::new(Semaphore::new(n)));

    loop {
        let permit = match &limit {
            Some(sem) => Some(sem.clone().acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let ctx = ctx.clone();
        tokio::spawn(
            async move {
                let _permit = permit;
                let mut conn = Connection::new(socket, ctx);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}
