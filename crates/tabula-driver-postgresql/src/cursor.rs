use crate::{error::from_postgres, Value};

use std::{pin::Pin, sync::Arc};
use tabula_core::{async_trait, driver, Cursor, Error, Result};
use tokio::time::Instant;
use tokio_postgres::{CancelToken, NoTls, RowStream};
use tokio_stream::StreamExt;

/// Streams rows from a `tokio-postgres` portal.
pub(crate) struct PgCursor {
    stream: Pin<Box<RowStream>>,

    /// Column names, read from the first row and shared by the rest.
    columns: Option<Arc<[String]>>,

    /// When the query is cancelled on the server.
    deadline: Option<Instant>,

    guard: CancelGuard,
}

/// Cancels the running query on the server when dropped while armed.
///
/// A guard is armed from the moment a query is sent until its result has
/// been read to the end or has failed.
pub(crate) struct CancelGuard {
    token: Option<CancelToken>,
}

impl PgCursor {
    pub(crate) fn new(
        stream: RowStream,
        deadline: Option<Instant>,
        guard: CancelGuard,
    ) -> PgCursor {
        PgCursor {
            stream: Box::pin(stream),
            columns: None,
            deadline,
            guard,
        }
    }

    fn decode(&mut self, row: tokio_postgres::Row) -> Result<driver::Row> {
        let columns = self
            .columns
            .get_or_insert_with(|| {
                row.columns()
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect()
            })
            .clone();

        let mut values = Vec::with_capacity(row.len());
        for index in 0..row.len() {
            let value: Value = row.try_get(index).map_err(Error::driver)?;
            values.push(value.0);
        }

        Ok(driver::Row::new(columns, values))
    }
}

#[async_trait]
impl Cursor for PgCursor {
    async fn next(&mut self) -> Option<Result<driver::Row>> {
        let next = match self.deadline {
            Some(at) => match tokio::time::timeout_at(at, self.stream.next()).await {
                Ok(next) => next,
                Err(_) => return Some(Err(self.guard.cancel().await)),
            },
            None => self.stream.next().await,
        };

        match next {
            Some(Ok(row)) => Some(self.decode(row)),
            Some(Err(err)) => {
                self.guard.disarm();
                Some(Err(from_postgres(err)))
            }
            None => {
                self.guard.disarm();
                None
            }
        }
    }

    fn rows_affected(&self) -> Option<u64> {
        self.stream.rows_affected()
    }
}

impl CancelGuard {
    pub(crate) fn new(token: CancelToken) -> CancelGuard {
        CancelGuard { token: Some(token) }
    }

    /// The query finished on its own; nothing is left to cancel.
    pub(crate) fn disarm(&mut self) {
        self.token = None;
    }

    /// Asks the server to abandon the running query after its deadline
    /// elapsed and returns the error reported to the caller.
    pub(crate) async fn cancel(&mut self) -> Error {
        if let Some(token) = self.token.take() {
            if let Err(err) = token.cancel_query(NoTls).await {
                log::warn!("failed to cancel query on the server: {err}");
            }
        }

        Error::cancelled("query deadline elapsed")
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                log::debug!("query abandoned before completion; cancelling it on the server");
                handle.spawn(async move {
                    if let Err(err) = token.cancel_query(NoTls).await {
                        log::warn!("failed to cancel abandoned query: {err}");
                    }
                });
            }
            Err(_) => log::warn!("query abandoned outside a Tokio runtime; not cancelled"),
        }
    }
}
