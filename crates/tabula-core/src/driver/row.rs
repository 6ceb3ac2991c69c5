use crate::{err, FromValue, Result, Value};

use std::sync::Arc;

/// One result row: column names plus the decoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Creates a row. Column names are shared between all rows of a result.
    #[track_caller]
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Row {
        assert_eq!(
            columns.len(),
            values.len(),
            "row must have one value per column"
        );
        Row { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Converts the value at `index`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T> {
        let Some(value) = self.values.get(index) else {
            return Err(err!(
                "column index {index} out of range for row with {} columns",
                self.values.len()
            ));
        };
        T::from_value(value.clone())
    }

    /// Converts the value of the column named `name`.
    pub fn get_by_name<T: FromValue>(&self, name: &str) -> Result<T> {
        let Some(index) = self.index_of(name) else {
            return Err(err!("no column named {name:?} in row"));
        };
        self.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
