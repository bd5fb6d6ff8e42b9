//! FILENAME: core/regroup-engine/src/projection.rs
//! Projection steps - rewrites of the value-column sequence.
//!
//! Each step edits `categorical.values.columns` and then regroups, so the
//! grouped view always matches the flat sequence when a step returns.

use std::rc::Rc;
use rustc_hash::FxHashSet;
use dataview::{
    ColumnMetadata, DataViewCategorical, Inherited, ScopeIdentity, ValueColumn, ValueColumns,
};
use crate::error::ProjectionError;
use crate::regroup::Regrouper;

impl<F> Regrouper<F>
where
    F: Fn(&ScopeIdentity, &ScopeIdentity) -> bool,
{
    /// Selects and reorders value columns by their current index.
    ///
    /// The table is left unchanged if any index is out of range or repeated.
    pub fn project(
        &self,
        categorical: &mut DataViewCategorical,
        indices: &[usize],
    ) -> Result<(), ProjectionError> {
        let count = categorical.values.as_ref().map_or(0, ValueColumns::len);

        let mut seen = FxHashSet::default();
        for &index in indices {
            if index >= count {
                return Err(ProjectionError::IndexOutOfRange { index, count });
            }
            if !seen.insert(index) {
                return Err(ProjectionError::DuplicateIndex(index));
            }
        }

        let Some(values) = categorical.values.as_mut() else {
            return Ok(());
        };
        let projected: Vec<Rc<ValueColumn>> = indices
            .iter()
            .map(|&index| Rc::clone(&values.columns[index]))
            .collect();
        log::debug!("projection: {} -> {} value columns", count, projected.len());
        values.columns = projected;

        self.apply(categorical);
        Ok(())
    }

    /// Removes the value columns for which `predicate` returns false.
    pub fn retain<P>(&self, categorical: &mut DataViewCategorical, mut predicate: P)
    where
        P: FnMut(&ValueColumn) -> bool,
    {
        let Some(values) = categorical.values.as_mut() else {
            return;
        };
        values.columns.retain(|column| predicate(column.as_ref()));

        self.apply(categorical);
    }

    /// Rewrites the metadata of every value column.
    ///
    /// Columns whose metadata comes back unchanged keep their identity as
    /// objects; the others are replaced by copies carrying the new metadata.
    pub fn rewrite_sources<R>(&self, categorical: &mut DataViewCategorical, mut rewrite: R)
    where
        R: FnMut(&ColumnMetadata) -> ColumnMetadata,
    {
        let Some(values) = categorical.values.as_mut() else {
            return;
        };
        for column in values.columns.iter_mut() {
            let source = rewrite(&column.source);
            if source == column.source {
                continue;
            }
            let mut updated = Inherited::new(Rc::clone(column));
            updated.inherit_single().source = source;
            *column = updated.into_shared();
        }

        self.apply(categorical);
    }
}

/// Selects and reorders value columns, then regroups with the default configuration.
pub fn project_value_columns(
    categorical: &mut DataViewCategorical,
    indices: &[usize],
) -> Result<(), ProjectionError> {
    Regrouper::default().project(categorical, indices)
}

/// Removes value columns, then regroups with the default configuration.
pub fn retain_value_columns<P>(categorical: &mut DataViewCategorical, predicate: P)
where
    P: FnMut(&ValueColumn) -> bool,
{
    Regrouper::default().retain(categorical, predicate);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataview::{CategoryColumn, PrimitiveValue};

    fn column(name: &str, identity: &str) -> Rc<ValueColumn> {
        Rc::new(
            ValueColumn::new(ColumnMetadata::measure(name), vec![PrimitiveValue::Number(1.0)])
                .with_identity(ScopeIdentity::new(identity)),
        )
    }

    fn table(cols: Vec<Rc<ValueColumn>>) -> DataViewCategorical {
        let year = CategoryColumn::new(ColumnMetadata::new("Year"), vec![PrimitiveValue::Number(2024.0)]);
        DataViewCategorical::new(
            Some(vec![year]),
            Some(ValueColumns::new(cols, Some(ColumnMetadata::new("Region")))),
        )
    }

    #[test]
    fn test_project_reorders_and_regroups() {
        let cols = vec![column("Sales", "East"), column("Profit", "East"), column("Sales", "West")];
        let mut t = table(cols.clone());

        project_value_columns(&mut t, &[1, 2]).unwrap();

        let values = t.values.as_ref().unwrap();
        assert_eq!(values.len(), 2);
        assert!(Rc::ptr_eq(&values[0], &cols[1]));
        let groups = values.grouped();
        assert_eq!(groups.len(), 2);
        assert!(Rc::ptr_eq(&groups[0].values[0], &cols[1]));
        assert!(Rc::ptr_eq(&groups[1].values[0], &cols[2]));
    }

    #[test]
    fn test_project_out_of_range() {
        let mut t = table(vec![column("Sales", "East")]);
        let version = t.values_version();

        let err = project_value_columns(&mut t, &[0, 3]).unwrap_err();

        assert_eq!(err, ProjectionError::IndexOutOfRange { index: 3, count: 1 });
        assert_eq!(t.values.as_ref().unwrap().len(), 1);
        assert_eq!(t.values_version(), version);
    }

    #[test]
    fn test_project_duplicate_index() {
        let mut t = table(vec![column("Sales", "East"), column("Sales", "West")]);

        let err = project_value_columns(&mut t, &[1, 1]).unwrap_err();

        assert_eq!(err, ProjectionError::DuplicateIndex(1));
        assert_eq!(err.to_string(), "Value column index listed more than once: 1");
    }

    #[test]
    fn test_project_without_values() {
        let mut t = DataViewCategorical::default();

        assert!(project_value_columns(&mut t, &[]).is_ok());
        assert_eq!(
            project_value_columns(&mut t, &[0]),
            Err(ProjectionError::IndexOutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_retain_removes_columns() {
        let cols = vec![column("Sales", "East"), column("Profit", "East"), column("Sales", "West")];
        let mut t = table(cols);

        retain_value_columns(&mut t, |c| c.source.display_name == "Sales");

        let values = t.values.as_ref().unwrap();
        assert_eq!(values.len(), 2);
        let groups = values.grouped();
        assert_eq!(groups[0].values.len(), 1);
        assert_eq!(groups[1].values.len(), 1);
    }

    #[test]
    fn test_rewrite_sources_replaces_changed_columns() {
        let cols = vec![column("Sales", "East"), column("Profit", "East")];
        let mut t = table(cols.clone());

        Regrouper::default().rewrite_sources(&mut t, |source| {
            if source.display_name == "Sales" {
                ColumnMetadata { display_name: "Revenue".to_string(), ..source.clone() }
            } else {
                source.clone()
            }
        });

        let values = t.values.as_ref().unwrap();
        assert_eq!(values[0].source.display_name, "Revenue");
        assert_eq!(values[0].identity, cols[0].identity);
        assert_eq!(cols[0].source.display_name, "Sales");
        assert!(!Rc::ptr_eq(&values[0], &cols[0]));
        assert!(Rc::ptr_eq(&values[1], &cols[1]));

        let groups = values.grouped();
        assert_eq!(groups.len(), 1);
        assert!(Rc::ptr_eq(&groups[0].values[0], &values[0]));
    }
}
