use crate::{
    crud, Deletable, Insertable, Model, Queryer, Result, Row, SelectCollection, Selectable,
    Table, Updatable, Value,
};

use indexmap::IndexMap;
use std::sync::Arc;
use tabula_sql::{Insert, Name, Select, Update};

/// A row of a [`Table`] held in memory, with one attribute per column.
///
/// Unset attributes are [`Value::Null`]. Whether [`save`](Record::save)
/// inserts or updates depends only on whether the record was loaded from, or
/// already saved to, the database.
#[derive(Debug, Clone)]
pub struct Record {
    table: Arc<Table>,

    /// One value per table column, in column order.
    values: Vec<Value>,

    /// Columns set since the record was last loaded or saved.
    dirty: Vec<bool>,

    persisted: bool,

    /// Primary-key values of the row this record was loaded from or saved
    /// to. Updates and deletes target this key even if the key attributes
    /// were changed since.
    persisted_key: Vec<Value>,
}

impl Record {
    pub(crate) fn new(table: Arc<Table>) -> Record {
        let len = table.columns().len();

        Record {
            table,
            values: vec![Value::Null; len],
            dirty: vec![false; len],
            persisted: false,
            persisted_key: vec![],
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        let index = self.table.column_index(name)?;
        Ok(&self.values[index])
    }

    /// Sets an attribute. The value is not checked against the column type;
    /// mismatches are reported by the database when the record is saved.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self.table.column_index(name)?;
        self.values[index] = value.into();
        self.dirty[index] = true;
        Ok(())
    }

    /// Like [`set`](Record::set), but panics if the table has no column
    /// `name`.
    #[track_caller]
    pub fn must_set(&mut self, name: &str, value: impl Into<Value>) {
        if let Err(err) = self.set(name, value) {
            panic!("{err}");
        }
    }

    /// Every attribute, in column order.
    pub fn attributes(&self) -> IndexMap<String, Value> {
        self.table
            .columns()
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.name.clone(), value.clone()))
            .collect()
    }

    /// Sets each attribute in turn, stopping at the first unknown column.
    /// Attributes set before the failure keep their new values.
    pub fn set_attributes<K, V>(&mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in attributes {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// Returns `true` once the record has been loaded from, or saved to, the
    /// database.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Returns `true` if any attribute was set since the record was last
    /// loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|dirty| *dirty)
    }

    /// Inserts the record if it is new, otherwise updates the changed
    /// attributes.
    ///
    /// Inserted records pick up database defaults, such as generated ids,
    /// for every attribute left unset.
    pub async fn save(&mut self, db: &impl Queryer) -> Result<()> {
        if self.persisted {
            crud::update(db, self).await?;
        } else {
            crud::insert(db, self).await?;
        }

        self.mark_persisted();
        Ok(())
    }

    /// Deletes the record's row. The record can be saved again afterwards,
    /// which inserts it anew.
    pub async fn delete(&mut self, db: &impl Queryer) -> Result<()> {
        crud::delete(db, self).await?;

        self.persisted = false;
        self.persisted_key.clear();
        for (dirty, value) in self.dirty.iter_mut().zip(&self.values) {
            *dirty = !value.is_null();
        }
        Ok(())
    }

    /// Re-reads the record's row, discarding unsaved changes.
    pub async fn reload(&mut self, db: &impl Queryer) -> Result<()> {
        let scope = self.where_primary_key()?;
        crud::select_one(db, self, [&scope]).await
    }

    fn mark_persisted(&mut self) {
        self.persisted = true;
        self.persisted_key = self
            .table
            .primary_key_indices()
            .iter()
            .map(|&index| self.values[index].clone())
            .collect();
        self.dirty.fill(false);
    }

    /// Copies every value of `row` into the attribute of the same name.
    fn absorb(&mut self, row: Row) -> Result<()> {
        let columns = row.columns().to_vec();

        for (name, value) in columns.iter().zip(row.into_values()) {
            let index = self.table.column_index(name)?;
            self.values[index] = value;
        }
        Ok(())
    }
}

impl Model for Record {}

impl Insertable for Record {
    /// Supplies every set attribute and returns the rest, so columns with
    /// database defaults are filled in after the insert.
    fn insert_statement(&self) -> Insert {
        let mut stmt = Insert::new(self.table.name().clone());
        let mut returning = vec![];

        let columns = self.table.columns().iter().zip(self.table.column_idents());
        for ((column, ident), value) in columns.zip(&self.values) {
            if value.is_null() {
                returning.push(ident.clone());
            } else {
                stmt = stmt.value(column.name.as_str(), value.clone());
            }
        }

        stmt.returning(returning)
    }

    fn insert_scan(&mut self, row: Row) -> Result<()> {
        self.absorb(row)
    }
}

impl Updatable for Record {
    fn update_statement(&self) -> Result<Update> {
        let scope = self.where_primary_key()?;
        let mut stmt = Update::new(self.table.name().clone());

        for ((column, value), dirty) in self
            .table
            .columns()
            .iter()
            .zip(&self.values)
            .zip(&self.dirty)
        {
            if *dirty {
                stmt = stmt.set(column.name.as_str(), value.clone());
            }
        }

        Ok(stmt.apply([&scope]))
    }
}

impl Deletable for Record {
    fn table_name(&self) -> Name {
        self.table.name().clone()
    }

    fn where_primary_key(&self) -> Result<Select> {
        if !self.persisted {
            crate::bail!("record of table {} has not been saved", self.table.name());
        }

        self.table.where_primary_key(self.persisted_key.iter().cloned())
    }
}

impl Selectable for Record {
    fn select_statement(&self) -> Select {
        self.table.select_statement()
    }

    fn select_scan(&mut self, row: Row) -> Result<()> {
        self.absorb(row)?;
        self.mark_persisted();
        Ok(())
    }
}

/// Records of one table, as filled by [`select_all`](crate::select_all).
#[derive(Debug)]
pub struct Records {
    table: Arc<Table>,
    records: Vec<Record>,
}

impl Records {
    pub fn new(table: Arc<Table>) -> Records {
        Records {
            table,
            records: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<Record> {
        self.records
    }
}

impl SelectCollection for Records {
    type Item = Record;

    fn new_record(&self) -> Record {
        self.table.new_record()
    }

    fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl IntoIterator for Records {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
