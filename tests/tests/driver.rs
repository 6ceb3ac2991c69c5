use pretty_assertions::assert_eq;
use std::{sync::Arc, time::Duration};
use tabula::{Error, Insertable, Model, Record, Table, Value};
use tests::*;

#[tokio::test]
async fn values_round_trip() {
    let test = setup!();

    test.execute(
        "create table everything (
            id uuid primary key,
            flag bool,
            small int2,
            big int8,
            single float4,
            double float8,
            body text,
            data bytea
        )",
    )
    .await;

    let mut table = Table::new("everything");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    let table = Arc::new(table);

    let id = Value::Uuid("67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap());

    let mut record = table.new_record();
    assert_ok!(record.set_attributes([
        ("id", id.clone()),
        ("flag", Value::Bool(true)),
        ("small", Value::I16(-3)),
        // Widened to int8 on the way in.
        ("big", Value::I32(1 << 30)),
        ("single", Value::F32(1.5)),
        ("double", Value::F64(-0.25)),
        ("data", Value::Bytes(vec![0, 1, 255])),
    ]));
    assert_ok!(record.save(&test.db).await);

    let found = assert_ok!(table.find_by_pk(&test.db, [id]).await);
    assert_eq!(*found.get("flag").unwrap(), Value::Bool(true));
    assert_eq!(*found.get("small").unwrap(), Value::I16(-3));
    assert_eq!(*found.get("big").unwrap(), Value::I64(1 << 30));
    assert_eq!(*found.get("single").unwrap(), Value::F32(1.5));
    assert_eq!(*found.get("double").unwrap(), Value::F64(-0.25));
    assert_eq!(*found.get("body").unwrap(), Value::Null);
    assert_eq!(*found.get("data").unwrap(), Value::Bytes(vec![0, 1, 255]));

    test.teardown().await;
}

#[tokio::test]
async fn defaults_of_any_type_are_read_back() {
    let test = setup!();

    test.execute(
        "create table events (
            id int generated always as identity primary key,
            name text not null,
            price numeric(10, 2) default 9.99,
            payload jsonb default '{\"tags\": []}',
            origin inet default '127.0.0.1',
            created_at timestamptz not null default now()
        )",
    )
    .await;

    let mut table = Table::new("events");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    let table = Arc::new(table);

    let mut record = table.new_record();
    record.must_set("name", "launch");
    assert_ok!(record.save(&test.db).await);
    assert!(record.is_persisted());

    assert!(matches!(record.get("created_at").unwrap(), Value::TimestampTz(_)));
    assert_eq!(
        *record.get("price").unwrap(),
        Value::Decimal("9.99".parse().unwrap())
    );
    assert_eq!(
        *record.get("payload").unwrap(),
        Value::Json(serde_json::json!({ "tags": [] }))
    );
    let origin = record.get("origin").unwrap().clone();
    assert!(matches!(origin, Value::Opaque(_)));

    // Opaque values are written back unchanged.
    record.must_set("origin", origin.clone());
    record.must_set("name", "relaunch");
    assert_ok!(record.save(&test.db).await);

    let count: i64 = assert_ok!(
        tabula::select_row(&test.db, "select count(*) from events", &[], |row| row.get(0)).await
    );
    assert_eq!(count, 1);

    let found = assert_ok!(table.find_by_pk(&test.db, [record.get("id").unwrap().clone()]).await);
    assert_eq!(*found.get("name").unwrap(), "relaunch");
    assert_eq!(*found.get("origin").unwrap(), origin);
    assert_eq!(found.get("created_at").unwrap(), record.get("created_at").unwrap());

    test.teardown().await;
}

#[tokio::test]
async fn type_mismatch_is_reported_at_save() {
    let test = setup!();
    test.execute("create table t (id int primary key, age int)").await;

    let mut table = Table::new("t");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    let table = Arc::new(table);

    let mut record = table.new_record();
    record.must_set("id", 1);
    record.must_set("age", "forty-two");

    assert_err_is!(record.save(&test.db).await, is_driver);

    test.teardown().await;
}

#[tokio::test]
async fn unique_violation_carries_constraint() {
    let test = setup!();
    test.execute("create table t (id int primary key, name text unique)").await;

    let mut table = Table::new("t");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    let table = Arc::new(table);

    for id in [1, 2] {
        let mut record = table.new_record();
        record.must_set("id", id);
        record.must_set("name", "John");

        let res = record.save(&test.db).await;
        if id == 1 {
            assert_ok!(res);
            continue;
        }

        let err = assert_err_is!(res, is_db_error);
        let db_err = err.as_db_error().unwrap();
        assert!(db_err.is_unique_violation());
        assert_eq!(db_err.constraint(), Some("t_name_key"));
        assert_eq!(db_err.table(), Some("t"));
    }

    test.teardown().await;
}

/// Translates a duplicate email into a domain error.
struct Signup(Record);

#[derive(Debug)]
struct EmailTaken;

impl std::fmt::Display for EmailTaken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("email is already registered")
    }
}

impl std::error::Error for EmailTaken {}

impl Model for Signup {
    fn map_db_error(&self, err: Error) -> Error {
        match err.as_db_error() {
            Some(db) if db.is_unique_violation() => Error::translated(EmailTaken),
            _ => err,
        }
    }
}

impl Insertable for Signup {
    fn insert_statement(&self) -> tabula::stmt::Insert {
        self.0.insert_statement()
    }

    fn insert_scan(&mut self, row: tabula::Row) -> tabula::Result<()> {
        self.0.insert_scan(row)
    }
}

#[tokio::test]
async fn map_db_error_translates_constraint_violations() {
    let test = setup!();
    test.execute("create table signups (id serial primary key, email text unique not null)")
        .await;

    let mut table = Table::new("signups");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    let table = Arc::new(table);

    let signup = |email: &str| {
        let mut record = table.new_record();
        record.must_set("email", email);
        Signup(record)
    };

    assert_ok!(tabula::insert(&test.db, &mut signup("john@example.com")).await);

    let err = assert_err_is!(
        tabula::insert(&test.db, &mut signup("john@example.com")).await,
        is_translated
    );
    assert!(err.downcast_ref::<EmailTaken>().is_some());

    test.teardown().await;
}

#[tokio::test]
async fn slow_queries_are_cancelled() {
    let test = setup!(timeout = Duration::from_millis(100));

    let err = assert_err_is!(
        tabula::select_row(&test.db, "select 1 from pg_sleep(5)", &[], |_| Ok(())).await,
        is_cancelled
    );
    assert_eq!(err.to_string(), "operation cancelled: query deadline elapsed");

    // The connection is still usable afterwards.
    let one: i32 = assert_ok!(
        tabula::select_row(&test.db, "select 1", &[], |row| row.get(0)).await
    );
    assert_eq!(one, 1);

    test.teardown().await;
}

#[tokio::test]
async fn abandoned_queries_are_cancelled() {
    let test = setup!();

    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        tabula::select_row(&test.db, "select pg_sleep(5)::text", &[], |_| Ok(())),
    )
    .await;
    assert!(abandoned.is_err());

    // The next query is not stuck behind the abandoned one.
    let started = std::time::Instant::now();
    let one: i32 = assert_ok!(
        tabula::select_row(&test.db, "select 1", &[], |row| row.get(0)).await
    );
    assert_eq!(one, 1);
    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());

    test.teardown().await;
}

#[tokio::test]
async fn transactions_are_queryers() {
    let Some(mut test) = TestDb::setup().await else {
        return;
    };
    test.execute("create table t (id int primary key, name text)").await;

    let mut table = Table::new("t");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    let table = Arc::new(table);

    let tx = assert_ok!(test.db.transaction().await);
    let mut record = table.new_record();
    record.must_set("id", 1);
    record.must_set("name", "John");
    assert_ok!(record.save(&tx).await);
    assert_ok!(table.find_by_pk(&tx, [1]).await);
    assert_ok!(tx.rollback().await);

    assert_err_is!(table.find_by_pk(&test.db, [1]).await, is_record_not_found);

    test.teardown().await;
}
