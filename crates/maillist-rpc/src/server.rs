// ABOUTME: Runs the tonic gRPC server for the mailing-list service on a bound listener.
// ABOUTME: Stops accepting and drains in-flight calls once the shutdown future resolves.

use std::future::Future;

use maillist_store::EmailStore;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::service::MailServer;

/// Serve the gRPC API on an already-bound listener until `shutdown` completes.
pub async fn serve<F>(
    store: EmailStore,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("gRPC API server listening on {}", addr);
    }

    Server::builder()
        .add_service(MailServer::new(store).into_service())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
