//! Inputs made of one or more tables.

use crate::error::{DataChefError, Result};

use super::live::LiveTable;

/// The tables acquired from one source, in source order.
///
/// Multi-table sources (e.g. workbooks) are iterated table by table and
/// looked up by name. A single-table input refuses iteration: use
/// [`TableRegistry::single`] instead.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: Vec<LiveTable>,
}

impl TableRegistry {
    /// Create a registry from tables in source order.
    pub fn new(tables: Vec<LiveTable>) -> Self {
        Self { tables }
    }

    /// Iterate the tables in source order.
    pub fn iter(&self) -> Result<std::slice::Iter<'_, LiveTable>> {
        if self.tables.len() == 1 {
            return Err(DataChefError::IteratingSingleTable);
        }
        Ok(self.tables.iter())
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Result<&LiveTable> {
        self.tables
            .iter()
            .find(|t| t.name().is_ok_and(|n| n == name))
            .ok_or_else(|| DataChefError::NoSuchTable(name.to_string()))
    }

    /// The only table of a single-table input.
    pub fn single(&self) -> Result<&LiveTable> {
        match self.tables.as_slice() {
            [table] => Ok(table),
            tables => Err(DataChefError::MultipleTables(tables.len())),
        }
    }

    /// Consume the registry, returning its only table.
    pub fn into_single(mut self) -> Result<LiveTable> {
        if self.tables.len() != 1 {
            return Err(DataChefError::MultipleTables(self.tables.len()));
        }
        Ok(self.tables.remove(0))
    }

    /// All tables, regardless of how many there are.
    pub fn tables(&self) -> &[LiveTable] {
        &self.tables
    }

    /// Names of the named tables, in source order.
    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().filter_map(|t| t.name().ok()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
