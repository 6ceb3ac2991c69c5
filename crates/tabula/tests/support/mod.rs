#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tabula::{async_trait, Cursor, Error, Queryer, Result, Row, Rows, Table, Value};

/// A statement received by [`ScriptedDb`].
#[derive(Debug, Clone, PartialEq)]
pub struct Exec {
    pub sql: String,
    pub params: Vec<Value>,
}

enum Response {
    Rows {
        columns: Arc<[String]>,
        rows: Vec<Vec<Value>>,
        rows_affected: u64,
    },
    Fail(Error),
}

/// A `Queryer` that answers with scripted responses, in order, and logs
/// every statement it receives.
pub struct ScriptedDb {
    responses: Mutex<VecDeque<Response>>,

    /// Shared with every [`ExecLog`] handed out.
    log: Arc<Mutex<Vec<Exec>>>,

    /// Scripted rows that were never read from their cursor.
    unread: Arc<AtomicUsize>,
}

impl ScriptedDb {
    pub fn new() -> ScriptedDb {
        let _ = env_logger::builder().is_test(true).try_init();

        ScriptedDb {
            responses: Mutex::new(VecDeque::new()),
            log: Arc::new(Mutex::new(vec![])),
            unread: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The number of scripted rows left unread by cursors that were dropped
    /// or are still open.
    pub fn unread_rows(&self) -> usize {
        self.unread.load(Ordering::SeqCst)
    }

    /// Answers the next query with `rows`, reporting one affected row per row.
    pub fn push_rows(&self, columns: &[&str], rows: Vec<Vec<Value>>) -> &Self {
        let rows_affected = rows.len() as u64;
        self.push(Response::Rows {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows,
            rows_affected,
        })
    }

    /// Answers the next query with no rows and an affected row count.
    pub fn push_count(&self, rows_affected: u64) -> &Self {
        self.push(Response::Rows {
            columns: Arc::from(vec![]),
            rows: vec![],
            rows_affected,
        })
    }

    pub fn push_err(&self, err: Error) -> &Self {
        self.push(Response::Fail(err))
    }

    /// Answers the next query with a catalog listing of
    /// `(name, oid, not_null, primary_key)` tuples.
    pub fn push_catalog(&self, columns: &[(&str, i64, bool, bool)]) -> &Self {
        self.push_rows(
            &["attname", "atttypid", "attnotnull", "coalesce"],
            columns
                .iter()
                .map(|&(name, oid, not_null, primary_key)| {
                    vec![
                        Value::from(name),
                        Value::I64(oid),
                        Value::Bool(not_null),
                        Value::Bool(primary_key),
                    ]
                })
                .collect(),
        )
    }

    pub fn exec_log(&self) -> ExecLog {
        ExecLog {
            ops: self.log.clone(),
        }
    }

    fn push(&self, response: Response) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl Queryer for ScriptedDb {
    async fn query(&self, sql: &str, params: &[Value]) -> Result<Rows> {
        self.log.lock().unwrap().push(Exec {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected query: {sql}"));

        match response {
            Response::Rows {
                columns,
                rows,
                rows_affected,
            } => {
                let rows = rows
                    .into_iter()
                    .map(|values| Ok(Row::new(columns.clone(), values)))
                    .collect();
                Ok(self.cursor(rows, Some(rows_affected)))
            }
            Response::Fail(err) => Err(err),
        }
    }
}

impl ScriptedDb {
    fn cursor(&self, rows: VecDeque<Result<Row>>, rows_affected: Option<u64>) -> Rows {
        self.unread.fetch_add(rows.len(), Ordering::SeqCst);

        Rows::new(ScriptedCursor {
            rows,
            rows_affected,
            unread: self.unread.clone(),
        })
    }
}

struct ScriptedCursor {
    rows: VecDeque<Result<Row>>,
    rows_affected: Option<u64>,
    unread: Arc<AtomicUsize>,
}

#[async_trait]
impl Cursor for ScriptedCursor {
    async fn next(&mut self) -> Option<Result<Row>> {
        let row = self.rows.pop_front()?;
        self.unread.fetch_sub(1, Ordering::SeqCst);
        Some(row)
    }

    fn rows_affected(&self) -> Option<u64> {
        if self.rows.is_empty() {
            self.rows_affected
        } else {
            None
        }
    }
}

/// Statements executed through a [`ScriptedDb`].
pub struct ExecLog {
    ops: Arc<Mutex<Vec<Exec>>>,
}

impl ExecLog {
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Removes and returns the oldest statement.
    pub fn pop(&mut self) -> Option<Exec> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }

    pub fn pop_sql(&mut self) -> String {
        self.pop().expect("no statement executed").sql
    }

    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }
}

/// Loads and finalizes
/// `t(id int primary key generated by default as identity, name text not null, age int)`.
pub async fn users_table(db: &ScriptedDb) -> Arc<Table> {
    db.push_catalog(&[
        ("id", 23, true, true),
        ("name", 25, true, false),
        ("age", 23, false, false),
    ]);

    let mut table = Table::new("t");
    table.load_all_columns(db).await.unwrap();
    table.finalize();

    db.exec_log().clear();
    Arc::new(table)
}

pub fn user_row(id: i32, name: &str, age: Option<i32>) -> Vec<Value> {
    vec![Value::I32(id), Value::from(name), Value::from(age)]
}

pub const USER_COLUMNS: &[&str] = &["id", "name", "age"];
