use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};

use crate::config::ServerConfig;
use crate::http::connection::{Connection, ConnectionSettings};
use crate::http::dispatch::Dispatcher;

/// Binds the configured address and serves until an accept error.
pub async fn run<H>(cfg: &ServerConfig, dispatcher: Arc<Dispatcher<H>>) -> anyhow::Result<()>
where
    H: Send + Sync + 'static,
{
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);
    serve(listener, dispatcher, ConnectionSettings::from(cfg)).await
}

/// Accept loop on an already bound listener; one task per connection.
pub async fn serve<H>(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher<H>>,
    settings: ConnectionSettings,
) -> anyhow::Result<()>
where
    H: Send + Sync + 'static,
{
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let conn = Connection::new(socket, Arc::clone(&dispatcher), settings.clone());
        tokio::spawn(
            async move {
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}
