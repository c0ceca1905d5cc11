mod error;

pub use error::ConnectionError;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use crate::protocol::{BackendMessage, FrontendMessage, PostgresCodec, TransactionStatus};
use crate::table;

/// What a recognized query prefix dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    CreateTable,
    Insert,
    Select,
}

impl QueryKind {
    /// Classifies lower-cased SQL text by prefix. First match wins; no
    /// whitespace normalization is applied.
    fn classify(sql: &str) -> Option<QueryKind> {
        if sql.starts_with("create table") {
            Some(QueryKind::CreateTable)
        } else if sql.starts_with("insert") {
            Some(QueryKind::Insert)
        } else if sql.starts_with("select") {
            Some(QueryKind::Select)
        } else {
            None
        }
    }
}

/// A single client connection in the query phase.
///
/// Every response is built from the fixed dataset in [`table`]; no SQL is
/// actually parsed or executed.
pub struct Connection {
    framed: Framed<TcpStream, PostgresCodec>,
    pid: i32,
}

impl Connection {
    pub fn new(framed: Framed<TcpStream, PostgresCodec>, pid: i32) -> Self {
        Self { framed, pid }
    }

    /// Runs the simple query loop until the peer disconnects, terminates,
    /// or sends anything this server does not understand.
    pub async fn run(&mut self) -> Result<(), ConnectionError> {
        loop {
            let message = match self.framed.next().await {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()), // EOF - client disconnected
            };

            match message {
                FrontendMessage::Query(query) => {
                    if !self.handle_query(&query).await? {
                        return Ok(());
                    }
                }
                FrontendMessage::Terminate => return Ok(()),
            }
        }
    }

    /// Handle one simple query. Returns false when the text matched no
    /// known prefix; the session then ends without a reply.
    async fn handle_query(&mut self, query: &str) -> Result<bool, ConnectionError> {
        tracing::debug!(pid = self.pid, query, "query");

        let sql = query.to_lowercase();
        let Some(kind) = QueryKind::classify(&sql) else {
            return Ok(false);
        };

        match kind {
            QueryKind::CreateTable => {
                self.framed
                    .send(BackendMessage::CommandComplete {
                        tag: "CREATE TABLE".to_string(),
                    })
                    .await?;
            }
            QueryKind::Insert => {
                // Nothing is stored; the reported row count is the number of
                // value groups, approximated by counting '(' in the text.
                // The OID column is unsupported and always reported as 0.
                let rows = sql.matches('(').count();
                self.framed
                    .send(BackendMessage::CommandComplete {
                        tag: format!("INSERT 0 {rows}"),
                    })
                    .await?;
            }
            QueryKind::Select => {
                self.framed
                    .send(BackendMessage::RowDescription {
                        fields: table::columns(),
                    })
                    .await?;
                for values in table::data_rows() {
                    self.framed.send(BackendMessage::DataRow { values }).await?;
                }
                // Row count matches the fixed dataset, not the query
                self.framed
                    .send(BackendMessage::CommandComplete {
                        tag: "SELECT 2".to_string(),
                    })
                    .await?;
            }
        }

        // Always send ReadyForQuery after a response
        self.framed
            .send(BackendMessage::ReadyForQuery {
                status: TransactionStatus::Idle,
            })
            .await?;
        self.framed.flush().await?;
        Ok(true)
    }
}
