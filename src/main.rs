use std::sync::Arc;

use todo_server::config::Config;
use todo_server::server;
use todo_server::todo::{TaskStore, TodoApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let store = Arc::new(TaskStore::new());
    let dispatcher = Arc::new(TodoApi::new(store).into_dispatcher()?);

    tracing::info!("Server started");

    tokio::select! {
        res = server::listener::run(&cfg.server, dispatcher) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Server stopped");
        }
    }

    Ok(())
}
