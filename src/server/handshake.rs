use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use crate::protocol::{
    BackendMessage, PostgresCodec, ProtocolError, StartupCodec, StartupFrame, TransactionStatus,
};
use crate::server::connection::ConnectionError;

/// A single client handshake.
///
/// The server never upgrades to SSL and never enforces authentication: the
/// SSLRequest frame is answered with a bare 'N', the StartupMessage is
/// consumed without being parsed, and the client is then told it is
/// authenticated and the server is idle.
pub struct Handshake {
    framed: Framed<TcpStream, StartupCodec>,
}

impl Handshake {
    pub fn new(socket: TcpStream) -> Self {
        Self {
            framed: Framed::new(socket, StartupCodec::new()),
        }
    }

    /// Runs the startup phase and hands back the socket framed for the
    /// query phase.
    pub async fn run(mut self) -> Result<Framed<TcpStream, PostgresCodec>, ConnectionError> {
        // SSLRequest: contents are discarded, SSL is denied with a bare 'N'
        let frame = self.read_frame().await?;
        tracing::trace!(len = frame.contents.len(), "discarded SSL request frame");
        self.framed.get_mut().write_all(b"N").await?;
        self.framed.get_mut().flush().await?;

        // StartupMessage: protocol version and parameters are not parsed
        let frame = self.read_frame().await?;
        tracing::trace!(len = frame.contents.len(), "discarded startup frame");

        // Tell the client it is in: no authentication, server idle
        let mut framed = self.framed.map_codec(StartupCodec::ready);
        framed.send(BackendMessage::AuthenticationOk).await?;
        framed
            .send(BackendMessage::ReadyForQuery {
                status: TransactionStatus::Idle,
            })
            .await?;
        framed.flush().await?;

        Ok(framed)
    }

    async fn read_frame(&mut self) -> Result<StartupFrame, ConnectionError> {
        match self.framed.next().await {
            Some(Ok(frame)) => Ok(frame),
            Some(Err(e)) => Err(e.into()),
            None => Err(ProtocolError::UnexpectedEof.into()),
        }
    }
}
