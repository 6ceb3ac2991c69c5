//! The CRUD protocol over the capability traits in [`model`](crate::model).
//!
//! Single-entity operations expect exactly one affected or selected row:
//! none is reported as [`Error::is_record_not_found`], more than one as
//! [`Error::is_too_many_records`] with the count attached. Database errors
//! raised while executing, scanning or closing the cursor are passed through
//! [`Model::map_db_error`].

use crate::{
    Deletable, Error, Insertable, Model, Op, Queryer, Result, Row, Rows, SelectCollection,
    Selectable, Updatable, Value,
};

use tabula_sql::{Delete, Select, Statement};

/// Inserts `record`, running its `before_save` hook first.
pub async fn insert<T: Insertable + ?Sized>(db: &impl Queryer, record: &mut T) -> Result<()> {
    record.before_save(Op::Insert)?;

    let stmt = record.insert_statement();
    query_one(db, record, stmt.into(), |record, row| record.insert_scan(row)).await
}

/// Updates `record`, running its `before_save` hook first.
///
/// Statements without assignments are skipped and no query is executed.
pub async fn update<T: Updatable + ?Sized>(db: &impl Queryer, record: &mut T) -> Result<()> {
    record.before_save(Op::Update)?;

    let stmt = record.update_statement()?;
    if stmt.assignments.is_empty() {
        log::debug!("skipping update of {}: nothing to assign", stmt.table);
        return Ok(());
    }

    query_one(db, record, stmt.into(), |_, _| Ok(())).await
}

/// Deletes the row identified by `record`'s primary key.
pub async fn delete<T: Deletable + ?Sized>(db: &impl Queryer, record: &mut T) -> Result<()> {
    let stmt = Delete::new(record.table_name()).apply([&record.where_primary_key()?]);
    query_one(db, record, stmt.into(), |_, _| Ok(())).await
}

/// Selects exactly one row into `record`.
pub async fn select_one<'a, T: Selectable + ?Sized>(
    db: &impl Queryer,
    record: &mut T,
    scopes: impl IntoIterator<Item = &'a Select>,
) -> Result<()> {
    let stmt = record.select_statement().apply(scopes);
    query_one(db, record, stmt.into(), |record, row| record.select_scan(row)).await
}

/// Selects every matching row, appending one freshly allocated entity per
/// row to `collection` in result order.
///
/// Returning no rows is not an error.
pub async fn select_all<'a, C: SelectCollection + ?Sized>(
    db: &impl Queryer,
    collection: &mut C,
    scopes: impl IntoIterator<Item = &'a Select>,
) -> Result<()> {
    let template = collection.new_record();
    let stmt = template.select_statement().apply(scopes);
    let (sql, params) = tabula_sql::build(&stmt.into());

    log::debug!("{sql}; params={params:?}");

    let mut rows = db
        .query(&sql, &params)
        .await
        .map_err(|err| translate(&template, err))?;

    while let Some(row) = rows.next().await {
        let mut record = collection.new_record();
        let scanned = row.and_then(|row| record.select_scan(row));

        if let Err(err) = scanned {
            drain(rows).await;
            return Err(translate(&record, err));
        }
        collection.push(record);
    }

    rows.close().await.map_err(|err| translate(&template, err))?;
    Ok(())
}

/// Runs `sql` and maps its single result row with `f`.
///
/// Fails like [`select_one`] when the query returns zero or several rows.
pub async fn select_row<T>(
    db: &impl Queryer,
    sql: &str,
    params: &[Value],
    f: impl FnOnce(Row) -> Result<T>,
) -> Result<T> {
    log::debug!("{sql}; params={params:?}");

    let mut rows = db.query(sql, params).await?;
    let first = match rows.next().await.transpose() {
        Ok(first) => first,
        Err(err) => {
            drain(rows).await;
            return Err(err);
        }
    };
    let count = rows.close().await?;
    check_row_count(count)?;

    match first {
        Some(row) => f(row),
        None => Err(Error::record_not_found("query returned no rows")),
    }
}

/// Runs `sql` and maps every result row with `f`.
pub async fn select_rows<T>(
    db: &impl Queryer,
    sql: &str,
    params: &[Value],
    mut f: impl FnMut(Row) -> Result<T>,
) -> Result<Vec<T>> {
    log::debug!("{sql}; params={params:?}");

    let mut rows = db.query(sql, params).await?;
    let mut items = vec![];

    while let Some(row) = rows.next().await {
        match row.and_then(&mut f) {
            Ok(item) => items.push(item),
            Err(err) => {
                drain(rows).await;
                return Err(err);
            }
        }
    }

    rows.close().await?;
    Ok(items)
}

/// Executes `stmt`, checks that exactly one row was affected and then scans
/// the first result row (if any) into `record`.
///
/// `record` is left untouched when the row count is wrong.
async fn query_one<T: Model + ?Sized>(
    db: &impl Queryer,
    record: &mut T,
    stmt: Statement,
    scan: impl FnOnce(&mut T, Row) -> Result<()>,
) -> Result<()> {
    let (sql, params) = tabula_sql::build(&stmt);

    log::debug!("{sql}; params={params:?}");

    let mut rows = db
        .query(&sql, &params)
        .await
        .map_err(|err| translate(record, err))?;

    let first = match rows.next().await.transpose() {
        Ok(first) => first,
        Err(err) => {
            drain(rows).await;
            return Err(translate(record, err));
        }
    };

    let count = rows.close().await.map_err(|err| translate(record, err))?;
    check_row_count(count)?;

    match first {
        Some(row) => scan(record, row).map_err(|err| translate(record, err)),
        None => Ok(()),
    }
}

fn check_row_count(count: u64) -> Result<()> {
    match count {
        0 => Err(Error::record_not_found("expected 1 row, got 0")),
        1 => Ok(()),
        n => Err(Error::too_many_records(n)),
    }
}

/// Releases the cursor after an early exit. The error that caused the exit
/// takes precedence over anything reported while draining.
async fn drain(mut rows: Rows) {
    if let Err(err) = rows.close().await {
        log::debug!("discarding error while draining cursor: {err}");
    }
}

fn translate<T: Model + ?Sized>(record: &T, err: Error) -> Error {
    if err.is_db_error() {
        record.map_db_error(err)
    } else {
        err
    }
}
