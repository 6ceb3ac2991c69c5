//! Shared setup for the PostgreSQL-backed tests.
//!
//! Tests connect to the database named by `TABULA_TEST_POSTGRES_URL` and are
//! skipped when it is unset. Each test runs in a fresh schema that is put
//! first on the connection's search path and dropped afterwards.

mod isolation;
use isolation::TestIsolation;

pub use std_util::prelude::*;

use std::time::Duration;
use tabula::PostgreSQL;

pub const URL_VAR: &str = "TABULA_TEST_POSTGRES_URL";

pub struct TestDb {
    pub db: PostgreSQL,
    schema: String,
}

impl TestDb {
    /// Connects and creates the test's schema, or returns `None` when no
    /// database is configured.
    pub async fn setup() -> Option<TestDb> {
        let _ = env_logger::builder().is_test(true).try_init();

        let Ok(url) = std::env::var(URL_VAR) else {
            log::warn!("{URL_VAR} is not set; skipping");
            return None;
        };

        let db = PostgreSQL::connect(&url).await.unwrap();
        let schema = TestIsolation::new().schema();

        db.client()
            .batch_execute(&format!(
                "create schema {schema}; set search_path to {schema}"
            ))
            .await
            .unwrap();

        Some(TestDb { db, schema })
    }

    /// Like [`setup`](TestDb::setup), with a per-query deadline.
    pub async fn setup_with_timeout(timeout: Duration) -> Option<TestDb> {
        let TestDb { db, schema } = TestDb::setup().await?;

        Some(TestDb {
            db: db.with_query_timeout(timeout),
            schema,
        })
    }

    /// Runs DDL or other statements without parameters.
    pub async fn execute(&self, sql: &str) {
        self.db.client().batch_execute(sql).await.unwrap();
    }

    pub async fn teardown(self) {
        let sql = format!("drop schema {} cascade", self.schema);
        if let Err(err) = self.db.client().batch_execute(&sql).await {
            log::warn!("failed to drop schema {}: {err}", self.schema);
        }
    }
}

/// Returns from the enclosing test when no database is configured.
#[macro_export]
macro_rules! setup {
    () => {
        match $crate::TestDb::setup().await {
            Some(test) => test,
            None => return,
        }
    };
    (timeout = $timeout:expr) => {
        match $crate::TestDb::setup_with_timeout($timeout).await {
            Some(test) => test,
            None => return,
        }
    };
}
