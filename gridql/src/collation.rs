//! Ordering and text-equality rules shared by the in-memory paths.

use std::cmp::Ordering;

use crate::criteria::SortSpec;
use crate::schema::TextCollation;
use crate::selection::filter::Filterable;
use crate::value::Value;

/// Normal form used by folded collation: trimmed and lowercased.
pub fn fold(s: &str) -> String { s.trim().to_lowercase() }

/// Text equality under a field's collation.
pub fn text_eq(collation: TextCollation, left: &str, right: &str) -> bool {
    match collation {
        TextCollation::Exact => left == right,
        TextCollation::Folded => fold(left) == fold(right),
    }
}

/// Which ordering a comparator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// The table comparator: `a > b` yields +1, anything else (ties included) yields -1, then the
    /// direction multiplier is applied. Ties are therefore not order-stable by contract.
    #[default]
    Raw,
    /// A total order for server-side sorting. Integers numerically, text case-insensitively with a
    /// case-sensitive tiebreak, absent values first. Ties keep their input order.
    Collated,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Comparator {
    sort: Option<SortSpec>,
    mode: SortMode,
}

impl Comparator {
    pub fn new(sort: Option<SortSpec>, mode: SortMode) -> Self { Self { sort, mode } }

    pub fn sort_spec(&self) -> Option<&SortSpec> { self.sort.as_ref() }

    pub fn mode(&self) -> SortMode { self.mode }

    /// Compares two records. With no sort configured every pair is `Equal`.
    pub fn compare<R: Filterable>(&self, a: &R, b: &R) -> Ordering {
        let Some(sort) = &self.sort else { return Ordering::Equal };
        let left = a.value(&sort.field);
        let right = b.value(&sort.field);

        match self.mode {
            SortMode::Raw => {
                let greater = matches!((&left, &right), (Some(l), Some(r)) if l.raw_gt(r));
                let base = if greater { 1 } else { -1 };
                if base * sort.direction.multiplier() > 0 {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            SortMode::Collated => {
                let ordering = collated_cmp(left.as_ref(), right.as_ref());
                if sort.direction.multiplier() < 0 {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    }

    /// Sorts `records` in place. Without a sort spec the input order is preserved exactly.
    pub fn sort<R: Filterable>(&self, records: &mut Vec<R>) {
        if self.sort.is_none() || records.len() < 2 {
            return;
        }
        let items = std::mem::take(records);
        *records = merge_sort_by(items, &mut |a: &R, b: &R| self.compare(a, b));
    }
}

/// Total order over optional values used by `SortMode::Collated`.
pub fn collated_cmp(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Integer(a)), Some(Value::Integer(b))) => a.cmp(b),
        (Some(Value::Text(a)), Some(Value::Text(b))) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
        (Some(Value::Integer(_)), Some(Value::Text(_))) => Ordering::Less,
        (Some(Value::Text(_)), Some(Value::Integer(_))) => Ordering::Greater,
    }
}

/// Merge sort that tolerates comparators which are not a total order (the raw table comparator
/// never returns `Equal`). The left element wins unless the comparator says `Greater`.
pub fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where F: FnMut(&T, &T) -> Ordering {
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) == Ordering::Greater,
            (None, Some(_)) => true,
            (Some(_), None) => false,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}
