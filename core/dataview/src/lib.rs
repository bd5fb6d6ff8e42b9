//! FILENAME: core/dataview/src/lib.rs
//! PURPOSE: Data view model shared by the regrouping engine and its callers.
//! CONTEXT: Re-exports the categorical table types, the copy-on-write helper
//! and the row-count probe.

pub mod categorical;
pub mod inherit;
pub mod row_count;
pub mod value;

// Re-export commonly used types at the crate root
pub use categorical::{
    group_values, CategoryColumn, ColumnMetadata, DataViewCategorical, GroupList, ScopeIdentity,
    ValueColumn, ValueColumnGroup, ValueColumns,
};
pub use inherit::{inherit_single, Inherited};
pub use row_count::get_row_count;
pub use value::PrimitiveValue;
