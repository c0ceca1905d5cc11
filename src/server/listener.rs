use tokio::net::TcpListener;

use crate::server::connection::Connection;
use crate::server::handshake::Handshake;

/// TCP server implementing the PostgreSQL wire protocol.
///
/// Each accepted connection is served by its own task; connections share no
/// mutable state. Errors are terminal for the connection that hit them,
/// never for the listener.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Creates a new server with a given listener.
    pub fn new(listener: TcpListener) -> Self {
        Self { listener }
    }

    /// Starts accepting connections and serving clients.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let mut next_pid = 1;

        loop {
            let (socket, peer_addr) = self.listener.accept().await?;
            let pid = next_pid;
            next_pid += 1;

            tracing::info!(pid, %peer_addr, "accepted connection");

            tokio::spawn(async move {
                let framed = match Handshake::new(socket).run().await {
                    Ok(framed) => framed,
                    Err(e) => {
                        tracing::warn!(pid, error = %e, "handshake failed");
                        return;
                    }
                };

                let mut connection = Connection::new(framed, pid);
                if let Err(e) = connection.run().await {
                    tracing::warn!(pid, error = %e, "connection error");
                }
                tracing::info!(pid, "connection closed");
            });
        }
    }
}
