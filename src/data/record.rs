//! Typed access to result rows

use crate::convert::{global, Convertible, SafeConverter, Value};

/// One row of a result set
pub trait DataRecord {
    /// Raw column value; [`Value::Null`] when the column does not exist
    fn value(&self, column: &str) -> Value;

    fn is_null(&self, column: &str) -> bool {
        self.value(column).is_absent()
    }

    /// Column converted to `T`, or `default` when null or not convertible
    fn get<T: Convertible>(&self, column: &str, default: T) -> T
    where
        Self: Sized,
    {
        global().change_type(self.value(column), default)
    }

    /// [`get`](Self::get) through a specific converter
    fn get_with<T: Convertible>(&self, converter: &SafeConverter, column: &str, default: T) -> T
    where
        Self: Sized,
    {
        converter.change_type(self.value(column), default)
    }
}

/// In-memory row; column names match case-insensitively
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRecord {
    columns: Vec<(String, Value)>,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column, replacing an existing one of the same name
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.position(&column) {
            Some(index) => self.columns[index].1 = value,
            None => self.columns.push((column, value)),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(column))
    }
}

impl DataRecord for MemoryRecord {
    fn value(&self, column: &str) -> Value {
        self.position(column)
            .map(|index| self.columns[index].1.clone())
            .unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MemoryRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}
