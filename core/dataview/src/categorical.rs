//! FILENAME: core/dataview/src/categorical.rs
//! Categorical data view - category columns plus a flat sequence of value columns.
//!
//! Value columns are shared by reference (`Rc`) between the flat sequence and
//! the grouped-by-series view. A sequence whose `source` is set is a dynamic
//! series: each column carries the identity of the series it belongs to. A
//! sequence without `source` is a static series and forms a single group.

use std::rc::Rc;
use serde::{Deserialize, Serialize};
use crate::value::PrimitiveValue;

// ============================================================================
// IDENTITY & METADATA
// ============================================================================

/// Opaque key identifying the series (scope) a value column belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeIdentity {
    pub key: String,
}

impl ScopeIdentity {
    pub fn new(key: impl Into<String>) -> Self {
        ScopeIdentity { key: key.into() }
    }
}

/// Describes a column (its name and position in the query).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Display name shown to the user.
    pub display_name: String,

    /// Fully qualified name in the source query.
    #[serde(default)]
    pub query_name: Option<String>,

    /// Position of the column in the source query.
    #[serde(default)]
    pub index: Option<usize>,

    /// Whether this column is a measure.
    #[serde(default)]
    pub is_measure: bool,

    /// Data roles this column is bound to.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl ColumnMetadata {
    pub fn new(display_name: impl Into<String>) -> Self {
        ColumnMetadata {
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    pub fn measure(display_name: impl Into<String>) -> Self {
        ColumnMetadata {
            display_name: display_name.into(),
            is_measure: true,
            ..Default::default()
        }
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

/// A category (row-axis) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub source: ColumnMetadata,

    /// One value per row.
    pub values: Vec<PrimitiveValue>,

    /// Row identities, aligned with `values`.
    #[serde(default)]
    pub identity: Option<Vec<ScopeIdentity>>,
}

impl CategoryColumn {
    pub fn new(source: ColumnMetadata, values: Vec<PrimitiveValue>) -> Self {
        CategoryColumn {
            source,
            values,
            identity: None,
        }
    }
}

/// One measurement column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueColumn {
    /// Series key. `None` when the scope is ambiguous (e.g. the table has no rows)
    /// or when the column is a static member.
    #[serde(default)]
    pub identity: Option<ScopeIdentity>,

    pub source: ColumnMetadata,

    /// One value per row.
    #[serde(default)]
    pub values: Vec<PrimitiveValue>,
}

impl ValueColumn {
    pub fn new(source: ColumnMetadata, values: Vec<PrimitiveValue>) -> Self {
        ValueColumn {
            identity: None,
            source,
            values,
        }
    }

    pub fn with_identity(mut self, identity: ScopeIdentity) -> Self {
        self.identity = Some(identity);
        self
    }
}

// ============================================================================
// GROUPS
// ============================================================================

/// The measure columns of one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueColumnGroup {
    #[serde(default)]
    pub identity: Option<ScopeIdentity>,
    pub values: Vec<Rc<ValueColumn>>,
}

/// Positional list of groups. Shared between snapshots; treat as immutable.
pub type GroupList = Rc<Vec<Rc<ValueColumnGroup>>>;

/// Groups a flat column sequence into contiguous identity runs.
///
/// A static sequence (`is_dynamic == false`) always yields exactly one group
/// holding every column.
pub fn group_values(columns: &[Rc<ValueColumn>], is_dynamic: bool) -> GroupList {
    if !is_dynamic {
        return Rc::new(vec![Rc::new(ValueColumnGroup {
            identity: None,
            values: columns.to_vec(),
        })]);
    }

    let mut groups: Vec<ValueColumnGroup> = Vec::new();
    for column in columns {
        match groups.last_mut() {
            Some(group) if group.identity == column.identity => {
                group.values.push(Rc::clone(column));
            }
            _ => groups.push(ValueColumnGroup {
                identity: column.identity.clone(),
                values: vec![Rc::clone(column)],
            }),
        }
    }
    Rc::new(groups.into_iter().map(Rc::new).collect())
}

// ============================================================================
// VALUE COLUMN SEQUENCE
// ============================================================================

/// The flat value-column sequence plus its grouped-by-series view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ValueColumnsData", into = "ValueColumnsData")]
pub struct ValueColumns {
    /// Columns in query order.
    pub columns: Vec<Rc<ValueColumn>>,

    /// Metadata of the dynamic series column. `None` means a static series.
    pub source: Option<ColumnMetadata>,

    /// Grouped view of `columns`, rebuilt whenever the sequence is rewritten.
    grouped: GroupList,
}

impl ValueColumns {
    /// Builds a sequence and its initial grouping.
    pub fn new(columns: Vec<Rc<ValueColumn>>, source: Option<ColumnMetadata>) -> Self {
        let grouped = group_values(&columns, source.is_some());
        ValueColumns {
            columns,
            source,
            grouped,
        }
    }

    /// Builds a sequence from owned columns.
    pub fn from_columns(columns: Vec<ValueColumn>, source: Option<ColumnMetadata>) -> Self {
        Self::new(columns.into_iter().map(Rc::new).collect(), source)
    }

    pub fn is_dynamic_series(&self) -> bool {
        self.source.is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<ValueColumn>> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rc<ValueColumn>> {
        self.columns.iter()
    }

    /// Returns the current grouped view. The snapshot stays valid (and
    /// unchanged) after later rewrites; callers should not keep it across one.
    pub fn grouped(&self) -> GroupList {
        Rc::clone(&self.grouped)
    }

    /// Replaces the grouped view.
    pub fn set_grouped(&mut self, grouped: GroupList) {
        self.grouped = grouped;
    }
}

impl std::ops::Index<usize> for ValueColumns {
    type Output = Rc<ValueColumn>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.columns[index]
    }
}

/// Wire form of [`ValueColumns`]; the grouping is derived on load.
#[derive(Serialize, Deserialize)]
struct ValueColumnsData {
    #[serde(default)]
    source: Option<ColumnMetadata>,
    columns: Vec<Rc<ValueColumn>>,
}

impl From<ValueColumnsData> for ValueColumns {
    fn from(data: ValueColumnsData) -> Self {
        ValueColumns::new(data.columns, data.source)
    }
}

impl From<ValueColumns> for ValueColumnsData {
    fn from(values: ValueColumns) -> Self {
        ValueColumnsData {
            source: values.source,
            columns: values.columns,
        }
    }
}

// ============================================================================
// CATEGORICAL TABLE
// ============================================================================

/// A table split into category columns and value columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataViewCategorical {
    #[serde(default)]
    pub categories: Option<Vec<CategoryColumn>>,

    #[serde(default)]
    pub values: Option<ValueColumns>,

    /// Bumped every time `values` is announced as updated.
    #[serde(skip)]
    values_version: u64,
}

impl DataViewCategorical {
    pub fn new(categories: Option<Vec<CategoryColumn>>, values: Option<ValueColumns>) -> Self {
        DataViewCategorical {
            categories,
            values,
            values_version: 0,
        }
    }

    /// Replaces the value-column sequence and announces the change.
    pub fn set_values(&mut self, values: Option<ValueColumns>) {
        self.values = values;
        self.notify_values_updated();
    }

    /// Announces that `values` was rewritten, even if the container is the same.
    pub fn notify_values_updated(&mut self) {
        self.values_version += 1;
    }

    /// Change counter for `values`. Compare against a saved value to detect rewrites.
    pub fn values_version(&self) -> u64 {
        self.values_version
    }
}
