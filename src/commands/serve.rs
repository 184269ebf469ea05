use crate::commands::Out;
use crate::service::ReceiptService;
use crate::{server, Config, Result};
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Runs the HTTP service on the configured address until Ctrl-C is received.
///
/// # Errors
///
/// - Returns an error if the address cannot be bound.
pub async fn serve(config: Config) -> Result<Out<()>> {
    let bind = config.bind();
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Unable to listen on {bind}"))?;
    let service = ReceiptService::in_memory(config.policy());
    info!("Receipts are kept in memory and will be lost when the service stops");

    server::serve(listener, service, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Unable to listen for Ctrl-C, the service must be killed to stop: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await?;
    Ok("The service has stopped".into())
}
