//! FILENAME: core/dataview/src/row_count.rs
//! PURPOSE: Row-count probe for categorical tables.
//! CONTEXT: The regrouping engine only needs to know whether the table has
//! rows at all; with zero rows every value column loses its series identity.

use crate::categorical::DataViewCategorical;

/// Number of rows represented by the table's category columns (0 if none).
pub fn get_row_count(categorical: &DataViewCategorical) -> usize {
    categorical
        .categories
        .as_ref()
        .and_then(|categories| categories.first())
        .map_or(0, |category| category.values.len())
}
