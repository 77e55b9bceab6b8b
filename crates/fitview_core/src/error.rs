use thiserror::Error;

/// Structural problems that prevent a table model from being built.
///
/// Everything else (unparseable ids, orphan cells, unknown checkbox values)
/// is skipped with a warning while building.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("table has no minimizer columns")]
    NoColumns,
    #[error("header level {level} declares column {column} more than once")]
    DuplicateColumn { level: u8, column: usize },
}
