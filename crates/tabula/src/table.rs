use crate::{crud, Error, Queryer, Record, Records, Result, Value};

use std::sync::Arc;
use tabula_sql::{Expr, Name, Select};

/// Lists the user columns of a relation in ordinal order, with primary-key
/// membership.
const CATALOG_QUERY: &str = "\
select a.attname, a.atttypid, a.attnotnull, \
coalesce(a.attnum = any(i.indkey), false) \
from pg_catalog.pg_attribute a \
left join pg_catalog.pg_index i on i.indrelid = a.attrelid and i.indisprimary \
where a.attrelid = $1::text::regclass and a.attnum > 0 and not a.attisdropped \
order by a.attnum";

/// A column discovered from the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,

    /// PostgreSQL type OID.
    pub oid: u32,

    pub not_null: bool,

    pub primary_key: bool,
}

/// Metadata for one database table.
///
/// Build it with [`Table::new`], [`load_all_columns`](Table::load_all_columns)
/// and [`finalize`](Table::finalize), then share it as `Arc<Table>`.
/// Operations that build statements panic when called before `finalize`.
#[derive(Debug)]
pub struct Table {
    name: Name,
    columns: Vec<Column>,
    finalized: Option<Finalized>,
}

/// Derived once by `finalize`.
#[derive(Debug)]
struct Finalized {
    select: Select,
    select_query: String,

    /// An unqualified `"col"` for each column, in column order.
    column_idents: Vec<Expr>,

    /// Indices into `columns`, in ordinal order.
    primary_key: Vec<usize>,

    /// `"t"."col"` for each primary-key column, matching `primary_key`.
    primary_key_exprs: Vec<Expr>,
}

impl Table {
    /// Creates an empty table for a qualified name such as `["public", "t"]`.
    pub fn new(name: impl Into<Name>) -> Table {
        Table {
            name: name.into(),
            columns: vec![],
            finalized: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Columns in ordinal order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub(crate) fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column.name == name)
            .ok_or_else(|| Error::no_such_column(self.name.to_string(), name))
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// Reads the table's columns from the catalog, replacing any loaded
    /// before.
    pub async fn load_all_columns(&mut self, db: &impl Queryer) -> Result<()> {
        assert!(self.finalized.is_none(), "table {} already finalized", self.name);

        let name = self.name.sanitize();
        log::trace!("loading columns of {name}");

        let columns = crud::select_rows(db, CATALOG_QUERY, &[Value::from(&name)], |row| {
            Ok(Column {
                name: row.get(0)?,
                oid: oid_from(row.get(1)?)?,
                not_null: row.get(2)?,
                primary_key: row.get(3)?,
            })
        })
        .await
        .map_err(|err| match err.as_db_error() {
            Some(db_err) if db_err.is_undefined_table() || db_err.is_invalid_schema_name() => {
                Error::table_not_found(&name)
            }
            _ => err,
        })?;

        if columns.is_empty() {
            return Err(Error::table_not_found(name));
        }

        log::trace!("loaded {} columns of {name}", columns.len());
        self.columns = columns;
        Ok(())
    }

    /// Freezes the table and caches the statements derived from its columns.
    ///
    /// # Panics
    ///
    /// Panics when called twice or when no columns have been loaded.
    pub fn finalize(&mut self) {
        assert!(self.finalized.is_none(), "table {} already finalized", self.name);
        assert!(!self.columns.is_empty(), "table {} has no columns", self.name);

        let select = Select::new()
            .columns(
                self.columns
                    .iter()
                    .map(|column| Expr::column(&self.name, &column.name)),
            )
            .from(self.name.clone());
        let (select_query, _) = tabula_sql::build(&select.clone().into());

        let column_idents = self
            .columns
            .iter()
            .map(|column| Expr::ident(column.name.as_str()))
            .collect();

        let primary_key: Vec<_> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.primary_key)
            .map(|(index, _)| index)
            .collect();

        let primary_key_exprs = primary_key
            .iter()
            .map(|&index| Expr::column(&self.name, &self.columns[index].name))
            .collect();

        self.finalized = Some(Finalized {
            select,
            select_query,
            column_idents,
            primary_key,
            primary_key_exprs,
        });
    }

    fn finalized(&self) -> &Finalized {
        match &self.finalized {
            Some(finalized) => finalized,
            None => panic!("table {} is not finalized", self.name),
        }
    }

    /// The select statement covering every column, in column order.
    pub fn select_statement(&self) -> Select {
        self.finalized().select.clone()
    }

    /// [`select_statement`](Table::select_statement) as SQL text.
    pub fn select_query(&self) -> &str {
        &self.finalized().select_query
    }

    /// Column identifiers for returning lists, in column order.
    pub(crate) fn column_idents(&self) -> &[Expr] {
        &self.finalized().column_idents
    }

    pub(crate) fn primary_key_indices(&self) -> &[usize] {
        &self.finalized().primary_key
    }

    /// A scope matching the row whose primary key equals `key`, given in
    /// primary-key column order.
    pub fn where_primary_key(&self, key: impl IntoIterator<Item = Value>) -> Result<Select> {
        let exprs = &self.finalized().primary_key_exprs;
        if exprs.is_empty() {
            crate::bail!("table {} has no primary key", self.name);
        }

        let key: Vec<_> = key.into_iter().collect();
        if key.len() != exprs.len() {
            crate::bail!(
                "table {} has {} primary key columns, got {} values",
                self.name,
                exprs.len(),
                key.len()
            );
        }

        let filter = Expr::and(
            exprs
                .iter()
                .zip(key)
                .map(|(column, value)| Expr::eq(column.clone(), Expr::value(value))),
        );

        Ok(Select::new().filter(filter))
    }

    /// A new, unsaved record with every attribute unset.
    pub fn new_record(self: &Arc<Self>) -> Record {
        self.finalized();
        Record::new(self.clone())
    }

    /// Loads the record whose primary key equals `key`.
    pub async fn find_by_pk<K: Into<Value>>(
        self: &Arc<Self>,
        db: &impl Queryer,
        key: impl IntoIterator<Item = K>,
    ) -> Result<Record> {
        let scope = self.where_primary_key(key.into_iter().map(Into::into))?;

        let mut record = self.new_record();
        crud::select_one(db, &mut record, [&scope]).await?;
        Ok(record)
    }

    /// Loads every record matching `scopes`, in result order.
    pub async fn select_all<'a>(
        self: &Arc<Self>,
        db: &impl Queryer,
        scopes: impl IntoIterator<Item = &'a Select>,
    ) -> Result<Vec<Record>> {
        let mut records = Records::new(self.clone());
        crud::select_all(db, &mut records, scopes).await?;
        Ok(records.into_vec())
    }
}

fn oid_from(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| crate::err!("invalid type oid {value}"))
}
