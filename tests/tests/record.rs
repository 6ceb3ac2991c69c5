use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabula::{
    stmt::{Expr, Name, Select},
    Column, Table, Value,
};
use tests::*;

const USERS: &str = "create table t (
    id int primary key generated by default as identity,
    name text not null,
    age int
)";

async fn users_table(test: &TestDb) -> Arc<Table> {
    test.execute(USERS).await;

    let mut table = Table::new("t");
    assert_ok!(table.load_all_columns(&test.db).await);
    table.finalize();
    Arc::new(table)
}

fn attrs(entries: &[(&str, Value)]) -> Vec<(String, Value)> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[tokio::test]
async fn load_columns_from_catalog() {
    let test = setup!();
    let table = users_table(&test).await;

    assert_eq!(
        table.select_query(),
        r#"select "t"."id", "t"."name", "t"."age" from "t""#
    );
    assert_eq!(
        table.columns(),
        &[
            Column {
                name: "id".into(),
                oid: 23,
                not_null: true,
                primary_key: true,
            },
            Column {
                name: "name".into(),
                oid: 25,
                not_null: true,
                primary_key: false,
            },
            Column {
                name: "age".into(),
                oid: 23,
                not_null: false,
                primary_key: false,
            },
        ]
    );

    test.teardown().await;
}

#[tokio::test]
async fn missing_table_is_not_found() {
    let test = setup!();

    let mut table = Table::new("missing");
    assert_err_is!(table.load_all_columns(&test.db).await, is_table_not_found);

    let mut table = Table::new(["no_such_schema", "t"]);
    assert_err_is!(table.load_all_columns(&test.db).await, is_table_not_found);

    test.teardown().await;
}

#[tokio::test]
async fn empty_table_is_loaded() {
    let test = setup!();
    let table = users_table(&test).await;

    // No rows, but the columns are known.
    assert_eq!(table.columns().len(), 3);
    let records = assert_ok!(table.select_all(&test.db, []).await);
    assert!(records.is_empty());

    test.teardown().await;
}

#[tokio::test]
async fn record_lifecycle() {
    let test = setup!();
    let db = &test.db;
    let table = users_table(&test).await;

    let mut record = table.new_record();
    assert_eq!(
        record.attributes().into_iter().collect::<Vec<_>>(),
        attrs(&[("id", Value::Null), ("name", Value::Null), ("age", Value::Null)])
    );

    assert_ok!(record.set_attributes([("name", Value::from("John")), ("age", Value::I32(42))]));
    assert_eq!(
        record.attributes().into_iter().collect::<Vec<_>>(),
        attrs(&[
            ("id", Value::Null),
            ("name", Value::from("John")),
            ("age", Value::I32(42)),
        ])
    );

    assert_ok!(record.save(db).await);
    assert!(record.is_persisted());
    assert_eq!(*record.get("id").unwrap(), 1);

    let found = assert_ok!(table.find_by_pk(db, [1]).await);
    assert_eq!(
        found.attributes().into_iter().collect::<Vec<_>>(),
        attrs(&[
            ("id", Value::I32(1)),
            ("name", Value::from("John")),
            ("age", Value::I32(42)),
        ])
    );

    assert_err_is!(table.find_by_pk(db, [2]).await, is_record_not_found);

    record.must_set("name", "Bill");
    assert_ok!(record.save(db).await);

    let found = assert_ok!(table.find_by_pk(db, [1]).await);
    assert_eq!(*found.get("name").unwrap(), "Bill");
    assert_eq!(*found.get("age").unwrap(), 42);

    assert_ok!(record.delete(db).await);
    assert_err_is!(table.find_by_pk(db, [1]).await, is_record_not_found);

    test.teardown().await;
}

#[tokio::test]
async fn select_cardinality() {
    let test = setup!();
    let db = &test.db;
    let table = users_table(&test).await;

    test.execute("insert into t (name, age) values ('John', 42), ('John', 7), ('Bill', 42)")
        .await;

    let johns = Select::new().filter(Expr::eq(
        Expr::column(&Name::from("t"), "name"),
        Expr::value("John"),
    ));
    let err = assert_err_is!(
        tabula::select_one(db, &mut table.new_record(), [&johns]).await,
        is_too_many_records
    );
    assert_eq!(err.row_count(), Some(2));

    let nobody = Select::new().filter(Expr::eq(
        Expr::column(&Name::from("t"), "name"),
        Expr::value("Nobody"),
    ));
    assert_err_is!(
        tabula::select_one(db, &mut table.new_record(), [&nobody]).await,
        is_record_not_found
    );

    let records = assert_ok!(table.select_all(db, [&nobody]).await);
    assert!(records.is_empty());

    let by_id = Select::new().order_by(
        Expr::column(&Name::from("t"), "id"),
        tabula::stmt::Direction::Asc,
    );
    let records = assert_ok!(table.select_all(db, [&johns, &by_id]).await);
    let ages: Vec<_> = records
        .iter()
        .map(|record| record.get("age").unwrap().clone())
        .collect();
    assert_eq!(ages, [Value::I32(42), Value::I32(7)]);

    test.teardown().await;
}

#[tokio::test]
async fn unknown_attributes() {
    let test = setup!();
    let table = users_table(&test).await;
    let mut record = table.new_record();

    assert_err_is!(record.get("nope"), is_no_such_column);
    assert_err_is!(record.set("nope", 1), is_no_such_column);

    test.teardown().await;
}

#[tokio::test]
async fn select_row_helpers() {
    let test = setup!();
    let db = &test.db;
    users_table(&test).await;

    test.execute("insert into t (name, age) values ('John', 42), ('Bill', 7)")
        .await;

    let count: i64 = assert_ok!(
        tabula::select_row(db, "select count(*) from t where age > $1", &[Value::I32(10)], |row| {
            row.get(0)
        })
        .await
    );
    assert_eq!(count, 1);

    let names: Vec<String> = assert_ok!(
        tabula::select_rows(db, "select name from t order by id", &[], |row| row.get(0)).await
    );
    assert_eq!(names, ["John", "Bill"]);

    test.teardown().await;
}
