use super::Row;
use crate::{async_trait, Result};

use std::{collections::VecDeque, fmt};

/// A forward-only cursor over result rows, implemented by drivers.
#[async_trait]
pub trait Cursor: Send {
    /// Returns the next row, or `None` once the result is exhausted.
    async fn next(&mut self) -> Option<Result<Row>>;

    /// The number of rows affected or selected, known once the cursor is
    /// exhausted.
    fn rows_affected(&self) -> Option<u64>;
}

/// The result of [`Queryer::query`](super::Queryer::query).
///
/// Rows are single use. Call [`Rows::close`] to drain the remaining rows and
/// read the affected row count; dropping an unclosed `Rows` releases the
/// underlying connection resources without reporting errors.
pub struct Rows {
    cursor: Box<dyn Cursor>,

    /// Rows handed out or drained so far.
    seen: u64,

    done: bool,
}

impl Rows {
    pub fn new(cursor: impl Cursor + 'static) -> Rows {
        Rows {
            cursor: Box::new(cursor),
            seen: 0,
            done: false,
        }
    }

    /// An in-memory result, reporting `rows_affected` once drained.
    pub fn from_vec(rows: Vec<Row>, rows_affected: u64) -> Rows {
        Rows::from_results(rows.into_iter().map(Ok), Some(rows_affected))
    }

    /// An in-memory result that may yield errors part way through.
    pub fn from_results(
        results: impl IntoIterator<Item = Result<Row>>,
        rows_affected: Option<u64>,
    ) -> Rows {
        Rows::new(MemCursor {
            results: results.into_iter().collect(),
            rows_affected,
        })
    }

    /// A result with no rows, as returned by statements without a returning
    /// clause.
    pub fn count(rows_affected: u64) -> Rows {
        Rows::from_vec(vec![], rows_affected)
    }

    /// Returns the next row.
    ///
    /// After `None` or an error the cursor is finished and further calls
    /// return `None`.
    pub async fn next(&mut self) -> Option<Result<Row>> {
        if self.done {
            return None;
        }

        match self.cursor.next().await {
            Some(Ok(row)) => {
                self.seen += 1;
                Some(Ok(row))
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    /// Drains any remaining rows and returns the affected row count.
    ///
    /// When the driver does not report a count, the number of rows read is
    /// used instead.
    pub async fn close(&mut self) -> Result<u64> {
        while let Some(row) = self.next().await {
            row?;
        }

        Ok(self.cursor.rows_affected().unwrap_or(self.seen))
    }
}

impl fmt::Debug for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rows")
            .field("seen", &self.seen)
            .field("done", &self.done)
            .finish()
    }
}

struct MemCursor {
    results: VecDeque<Result<Row>>,
    rows_affected: Option<u64>,
}

#[async_trait]
impl Cursor for MemCursor {
    async fn next(&mut self) -> Option<Result<Row>> {
        self.results.pop_front()
    }

    fn rows_affected(&self) -> Option<u64> {
        if self.results.is_empty() {
            self.rows_affected
        } else {
            None
        }
    }
}
