//! Ordering of address items
//!
//! [`AddressComparator`] is a total order over divisions, range values and
//! groupings. Items are first ordered by shape: division-level items before
//! groupings, then address kind, bit count, division count and division
//! widths. Items of the same shape are ordered by the comparator's policy.

use crate::division::{Division, LargeRangeValue, RangeValue};
use crate::grouping::DivisionGrouping;
use crate::kind::AddressKind;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Whether an item is a single division or a grouping of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemCategory {
    Division,
    Grouping,
}

/// Anything the comparator can order
pub trait AddressItem {
    fn category(&self) -> ItemCategory;

    /// Address kind; division-level items are untyped
    fn kind(&self) -> AddressKind;

    fn bit_count(&self) -> u32;

    fn division_count(&self) -> usize;

    fn division_bit_count(&self, index: usize) -> u32;

    /// Lower value of the division at `index`
    fn lower_at(&self, index: usize) -> BigUint;

    /// Upper value of the division at `index`
    fn upper_at(&self, index: usize) -> BigUint;

    /// Number of values
    fn value_count(&self) -> BigUint;
}

impl AddressItem for RangeValue {
    fn category(&self) -> ItemCategory {
        ItemCategory::Division
    }

    fn kind(&self) -> AddressKind {
        AddressKind::Untyped
    }

    fn bit_count(&self) -> u32 {
        RangeValue::bit_count(self)
    }

    fn division_count(&self) -> usize {
        1
    }

    fn division_bit_count(&self, _index: usize) -> u32 {
        RangeValue::bit_count(self)
    }

    fn lower_at(&self, _index: usize) -> BigUint {
        BigUint::from(self.lower())
    }

    fn upper_at(&self, _index: usize) -> BigUint {
        BigUint::from(self.upper())
    }

    fn value_count(&self) -> BigUint {
        BigUint::from(self.count())
    }
}

impl AddressItem for LargeRangeValue {
    fn category(&self) -> ItemCategory {
        ItemCategory::Division
    }

    fn kind(&self) -> AddressKind {
        AddressKind::Untyped
    }

    fn bit_count(&self) -> u32 {
        LargeRangeValue::bit_count(self)
    }

    fn division_count(&self) -> usize {
        1
    }

    fn division_bit_count(&self, _index: usize) -> u32 {
        LargeRangeValue::bit_count(self)
    }

    fn lower_at(&self, _index: usize) -> BigUint {
        self.lower().clone()
    }

    fn upper_at(&self, _index: usize) -> BigUint {
        self.upper().clone()
    }

    fn value_count(&self) -> BigUint {
        self.count()
    }
}

impl AddressItem for Division {
    fn category(&self) -> ItemCategory {
        ItemCategory::Division
    }

    fn kind(&self) -> AddressKind {
        AddressKind::Untyped
    }

    fn bit_count(&self) -> u32 {
        Division::bit_count(self)
    }

    fn division_count(&self) -> usize {
        1
    }

    fn division_bit_count(&self, _index: usize) -> u32 {
        Division::bit_count(self)
    }

    fn lower_at(&self, _index: usize) -> BigUint {
        self.lower_value()
    }

    fn upper_at(&self, _index: usize) -> BigUint {
        self.upper_value()
    }

    fn value_count(&self) -> BigUint {
        self.count()
    }
}

impl AddressItem for DivisionGrouping {
    fn category(&self) -> ItemCategory {
        ItemCategory::Grouping
    }

    fn kind(&self) -> AddressKind {
        DivisionGrouping::kind(self)
    }

    fn bit_count(&self) -> u32 {
        DivisionGrouping::bit_count(self)
    }

    fn division_count(&self) -> usize {
        DivisionGrouping::division_count(self)
    }

    fn division_bit_count(&self, index: usize) -> u32 {
        self.divisions()[index].bit_count()
    }

    fn lower_at(&self, index: usize) -> BigUint {
        self.divisions()[index].lower_value()
    }

    fn upper_at(&self, index: usize) -> BigUint {
        self.divisions()[index].upper_value()
    }

    fn value_count(&self) -> BigUint {
        self.count()
    }
}

/// Ordering policy for address items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressComparator {
    /// Fewer values first, then by lower values, then by upper values
    #[default]
    Count,
    /// By upper then lower values (`high_first`) or lower then upper;
    /// `flip_second` reverses the second key
    Value { high_first: bool, flip_second: bool },
}

impl AddressComparator {
    /// Compare two optional items; absent items sort first
    pub fn compare(&self, a: Option<&dyn AddressItem>, b: Option<&dyn AddressItem>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => self.compare_items(a, b),
        }
    }

    /// Compare two items
    pub fn compare_items(&self, a: &dyn AddressItem, b: &dyn AddressItem) -> Ordering {
        compare_shape(a, b).then_with(|| match *self {
            AddressComparator::Count => a
                .value_count()
                .cmp(&b.value_count())
                .then_with(|| compare_bounds(a, b, lower_bound))
                .then_with(|| compare_bounds(a, b, upper_bound)),
            AddressComparator::Value {
                high_first,
                flip_second,
            } => {
                let (first, second): (Bound, Bound) = if high_first {
                    (upper_bound, lower_bound)
                } else {
                    (lower_bound, upper_bound)
                };
                compare_bounds(a, b, first).then_with(|| {
                    let ordering = compare_bounds(a, b, second);
                    if flip_second {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
            }
        })
    }

    /// Sort groupings in place
    pub fn sort(&self, groupings: &mut [DivisionGrouping]) {
        groupings.sort_by(|a, b| self.compare_items(a, b));
    }
}

type Bound = fn(&dyn AddressItem, usize) -> BigUint;

fn lower_bound(item: &dyn AddressItem, index: usize) -> BigUint {
    item.lower_at(index)
}

fn upper_bound(item: &dyn AddressItem, index: usize) -> BigUint {
    item.upper_at(index)
}

fn compare_shape(a: &dyn AddressItem, b: &dyn AddressItem) -> Ordering {
    a.category()
        .cmp(&b.category())
        .then_with(|| a.kind().rank().cmp(&b.kind().rank()))
        .then_with(|| a.bit_count().cmp(&b.bit_count()))
        .then_with(|| a.division_count().cmp(&b.division_count()))
        .then_with(|| {
            (0..a.division_count())
                .map(|i| a.division_bit_count(i).cmp(&b.division_bit_count(i)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

/// Most significant division first; shapes are already equal
fn compare_bounds(a: &dyn AddressItem, b: &dyn AddressItem, bound: Bound) -> Ordering {
    (0..a.division_count())
        .map(|i| bound(a, i).cmp(&bound(b, i)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
