//! FILENAME: core/regroup-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Value column index {index} out of range (column count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Value column index listed more than once: {0}")]
    DuplicateIndex(usize),
}
