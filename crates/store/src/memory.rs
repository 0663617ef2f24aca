//! In-memory ledger store.
//!
//! Backs the test suites and embedders that assemble rows themselves.

use std::collections::HashMap;

use crate::cell::CellValue;
use crate::{LedgerStore, StoreError};

/// A ledger store holding all tables in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: HashMap<String, Vec<Vec<CellValue>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a table with the given rows, header included.
    pub fn insert_table(&mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) {
        self.tables.insert(name.into(), rows);
    }

    /// Returns a table's rows for inspection.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Vec<Vec<CellValue>>> {
        self.tables.get(name)
    }
}

impl LedgerStore for InMemoryStore {
    fn read_rows(&self, table: &str) -> Result<Vec<Vec<CellValue>>, StoreError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }

    fn write_rows(
        &mut self,
        table: &str,
        start_row: usize,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<(), StoreError> {
        if start_row == 0 {
            return Err(StoreError::InvalidStartRow {
                table: table.to_string(),
                row: start_row,
            });
        }
        let target = self
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        let end = start_row - 1 + rows.len();
        if target.len() < end {
            target.resize(end, Vec::new());
        }
        for (offset, row) in rows.into_iter().enumerate() {
            target[start_row - 1 + offset] = row;
        }
        Ok(())
    }
}
