//! Abstract ledger-store contract for Kontor.
//!
//! The core never talks to a concrete spreadsheet, database, or file. It
//! consumes an ordered snapshot of rows per table and writes results back in
//! batches through the [`LedgerStore`] trait. Column positions are supplied
//! by the caller as layout configuration, never hard-coded.

pub mod cell;
pub mod layout;
pub mod memory;

use kontor_shared::AppError;
use thiserror::Error;

pub use cell::CellValue;
pub use layout::{MovementColumns, RecordColumns};
pub use memory::InMemoryStore;

/// Errors raised by a ledger-store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested table does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A write addressed a row before the header.
    #[error("Invalid start row {row} for table {table}")]
    InvalidStartRow {
        /// Table the write addressed.
        table: String,
        /// The offending 1-based row index.
        row: usize,
    },

    /// The backend failed for a backend-specific reason.
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TableNotFound(table) => Self::MissingTable(table),
            other => Self::Store(other.to_string()),
        }
    }
}

/// A row/column tabular datastore holding the ledger tables.
///
/// Rows are ordered lists of cell values; the first row of every table is a
/// header and is skipped by the core. Writes are batched and must be
/// all-or-nothing from the caller's perspective: a backend either applies
/// the whole batch or leaves the table untouched.
pub trait LedgerStore {
    /// Reads the full ordered row snapshot of a table, header included.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableNotFound`] if the table does not exist.
    fn read_rows(&self, table: &str) -> Result<Vec<Vec<CellValue>>, StoreError>;

    /// Writes a contiguous block of rows starting at the given 1-based row.
    ///
    /// Row 1 is the header; data rows start at row 2. The table grows as
    /// needed to hold the block.
    ///
    /// # Errors
    ///
    /// Returns an error if the table does not exist or the start row is
    /// invalid; in that case nothing has been written.
    fn write_rows(
        &mut self,
        table: &str,
        start_row: usize,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<(), StoreError>;
}
