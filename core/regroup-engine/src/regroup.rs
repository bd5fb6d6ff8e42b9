//! FILENAME: core/regroup-engine/src/regroup.rs
//! Regroup Engine - rebuilds the grouped-by-series view of a value-column sequence.
//!
//! Runs after the flat value-column sequence of a table has been rewritten
//! (columns removed or reordered, metadata rewritten) and brings `grouped()`
//! back in line with it.
//!
//! Algorithm:
//! 1. Static series (no `source`): one group holding the whole sequence.
//! 2. Dynamic series: start from a copy of the previous group list and walk the
//!    columns in order, starting a new group whenever the series identity
//!    differs from the column that opened the current run. Existing groups are
//!    reused by position and cloned before their columns or identity are
//!    replaced, so earlier snapshots stay intact.
//! 3. Store the new list and announce that `values` changed.

use std::rc::Rc;
use dataview::{
    get_row_count, group_values, inherit_single, DataViewCategorical, GroupList, Inherited,
    ScopeIdentity, ValueColumn, ValueColumnGroup,
};
use crate::config::RegroupConfig;

/// Signature of the default identity comparison.
pub type IdentityEq = fn(&ScopeIdentity, &ScopeIdentity) -> bool;

fn identities_equal(a: &ScopeIdentity, b: &ScopeIdentity) -> bool {
    a == b
}

// ============================================================================
// REGROUPER
// ============================================================================

/// Regroups value columns using a configuration and an identity comparison.
pub struct Regrouper<F = IdentityEq> {
    config: RegroupConfig,
    identity_eq: F,
}

impl Regrouper {
    /// Creates a regrouper that compares identities with `==`.
    pub fn new(config: RegroupConfig) -> Self {
        Regrouper {
            config,
            identity_eq: identities_equal,
        }
    }
}

impl Default for Regrouper {
    fn default() -> Self {
        Regrouper::new(RegroupConfig::default())
    }
}

impl<F> Regrouper<F>
where
    F: Fn(&ScopeIdentity, &ScopeIdentity) -> bool,
{
    /// Creates a regrouper with a custom identity comparison, for identities
    /// that are equal by value but not by key.
    pub fn with_identity_eq(config: RegroupConfig, identity_eq: F) -> Self {
        Regrouper { config, identity_eq }
    }

    pub fn config(&self) -> &RegroupConfig {
        &self.config
    }

    /// Rebuilds `categorical.values.grouped()` from the current column sequence.
    ///
    /// Does nothing if the table has no value columns.
    pub fn apply(&self, categorical: &mut DataViewCategorical) {
        let row_count = get_row_count(categorical);
        let Some(values) = categorical.values.as_mut() else {
            log::trace!("regroup: table has no value columns, skipping");
            return;
        };

        let grouped = if values.is_dynamic_series() {
            self.regroup_dynamic(&values.columns, values.grouped(), row_count)
        } else {
            log::debug!("regroup: static series, {} value columns", values.len());
            group_values(&values.columns, false)
        };

        values.set_grouped(grouped);
        categorical.notify_values_updated();
    }

    fn regroup_dynamic(
        &self,
        columns: &[Rc<ValueColumn>],
        previous: GroupList,
        row_count: usize,
    ) -> GroupList {
        let mut groups = Inherited::new(previous);
        let list = groups.inherit_single();

        // With zero rows every column has lost its identity, so there is no way
        // to tell series members from static members. Assume the first column
        // is a series member.
        let has_series_members = columns
            .first()
            .map_or(false, |first| row_count == 0 || first.identity.is_some());

        log::debug!(
            "regroup: dynamic series, {} value columns, {} rows, {} previous groups, series members: {}",
            columns.len(),
            row_count,
            list.len(),
            has_series_members
        );

        if has_series_members {
            let mut current: Option<(usize, Inherited<ValueColumnGroup>)> = None;
            // Identity of the column that opened the current run.
            let mut run_identity: Option<&ScopeIdentity> = None;

            for column in columns {
                let starts_group = current.is_none()
                    || !self.same_identity(column.identity.as_ref(), run_identity);

                if starts_group {
                    let position = match current.take() {
                        Some((position, group)) => {
                            store_group(list, position, group);
                            position + 1
                        }
                        None => 0,
                    };
                    run_identity = column.identity.as_ref();

                    let mut group = match list.get(position) {
                        Some(existing) => Inherited::new(Rc::clone(existing)),
                        None => {
                            self.check_spare_group(column, position);
                            Inherited::fresh(ValueColumnGroup::default())
                        }
                    };
                    let node = group.inherit_single();
                    node.values = Vec::new();
                    // An identity-less run (zero rows) keeps the group's identity.
                    if let Some(identity) = run_identity {
                        if !self.same_identity(Some(identity), node.identity.as_ref()) {
                            node.identity = Some(identity.clone());
                        }
                    }
                    current = Some((position, group));
                }

                if let Some(group) = inherit_single(current.as_mut().map(|(_, group)| group)) {
                    group.values.push(Rc::clone(column));
                }
            }

            if let Some((position, group)) = current {
                store_group(list, position, group);
            }
        } else {
            for slot in list.iter_mut() {
                if slot.values.is_empty() {
                    continue;
                }
                let mut group = Inherited::new(Rc::clone(slot));
                group.inherit_single().values = Vec::new();
                *slot = group.into_shared();
            }
        }

        log::trace!("regroup: produced {} groups", list.len());
        groups.into_shared()
    }

    /// `None` only matches `None`.
    fn same_identity(&self, a: Option<&ScopeIdentity>, b: Option<&ScopeIdentity>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => (self.identity_eq)(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Spare groups only exist for static members, which have no identity.
    fn check_spare_group(&self, column: &ValueColumn, position: usize) {
        if column.identity.is_none() {
            return;
        }
        if self.config.strict_sequencing {
            panic!(
                "regroup: sequence mismatch, spare group at position {} received series column '{}'",
                position, column.source.display_name
            );
        }
        log::warn!(
            "regroup: sequence mismatch, spare group at position {} received series column '{}'",
            position,
            column.source.display_name
        );
    }
}

/// Writes a finished group back into the list. Positions only ever advance by
/// one, so a position past the end is always the next free slot.
///
/// A group that ended up with exactly the identity and columns it had before
/// is not replaced; the previous object stays in place.
fn store_group(
    list: &mut Vec<Rc<ValueColumnGroup>>,
    position: usize,
    group: Inherited<ValueColumnGroup>,
) {
    if !group.is_inherited() {
        return;
    }
    if position < list.len() {
        let existing = &list[position];
        if existing.identity != group.identity || !same_columns(&existing.values, &group.values) {
            list[position] = group.into_shared();
        }
    } else {
        list.push(group.into_shared());
    }
}

fn same_columns(a: &[Rc<ValueColumn>], b: &[Rc<ValueColumn>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Rc::ptr_eq(x, y))
}

/// Regroups `categorical` with the default configuration.
pub fn apply(categorical: &mut DataViewCategorical) {
    Regrouper::default().apply(categorical);
}
