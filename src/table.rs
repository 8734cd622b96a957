//! Table logic - sorting, extremum scanning, and page slicing
//!
//! Everything here is a pure function over the loaded records; none of it
//! touches the source slice.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::monster::{Column, ColumnValue, MonsterRecord};

/// Rows shown per page unless overridden at startup
pub const ITEMS_PER_PAGE: usize = 10;

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Header indicator glyph
    pub fn glyph(self) -> &'static str {
        match self {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        }
    }
}

/// Active (column, order) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortSpec {
    pub column: Column,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            order: SortOrder::Ascending,
        }
    }

    /// Same column flips the order; any other column starts ascending.
    pub fn toggle(current: Option<SortSpec>, column: Column) -> SortSpec {
        match current {
            Some(spec) if spec.column == column => SortSpec {
                column,
                order: spec.order.flip(),
            },
            _ => SortSpec::ascending(column),
        }
    }
}

/// Case-insensitive ordering with lowercase ahead of uppercase on ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

/// Text against text compares as strings, everything else numerically.
pub fn compare_values(a: ColumnValue<'_>, b: ColumnValue<'_>) -> Ordering {
    match (a, b) {
        (ColumnValue::Text(a), ColumnValue::Text(b)) => locale_cmp(a, b),
        (ColumnValue::Number(a), ColumnValue::Number(b)) => a.cmp(&b),
        // A column never mixes kinds; keep numbers first if it ever does.
        (ColumnValue::Number(_), ColumnValue::Text(_)) => Ordering::Less,
        (ColumnValue::Text(_), ColumnValue::Number(_)) => Ordering::Greater,
    }
}

/// Produce the display order for `spec`.
///
/// With no spec the records come back in load order. The sort is stable, so
/// records with equal keys keep their load order in either direction.
pub fn sort_records(records: &[MonsterRecord], spec: Option<SortSpec>) -> Vec<&MonsterRecord> {
    let mut sorted: Vec<&MonsterRecord> = records.iter().collect();
    let Some(SortSpec { column, order }) = spec else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        let ordering = compare_values(column.value_of(a), column.value_of(b));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Scan every record for the max or min of a numeric column.
///
/// `None` for text columns and empty input.
pub fn extremum(records: &[MonsterRecord], column: Column, kind: Extremum) -> Option<u32> {
    let values = records
        .iter()
        .filter_map(|record| column.value_of(record).as_number());
    match kind {
        Extremum::Max => values.max(),
        Extremum::Min => values.min(),
    }
}

/// Cell highlight relative to the whole dataset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    Highest,
    Lowest,
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Rows of 1-based `page`, clipped to the input.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Navigation affordances for the pagination strip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageNav {
    pub current: usize,
    pub count: usize,
}

impl PageNav {
    pub fn new(current: usize, count: usize) -> Self {
        Self { current, count }
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.count
    }

    pub fn is_active(&self, page: usize) -> bool {
        page == self.current
    }

    pub fn can_goto(&self, page: usize) -> bool {
        page >= 1 && page <= self.count && !self.is_active(page)
    }

    pub fn pages(&self) -> impl Iterator<Item = usize> {
        1..=self.count
    }

    /// At most `max` consecutive page numbers, keeping the active page inside
    pub fn window(&self, max: usize) -> RangeInclusive<usize> {
        let max = max.max(1);
        if self.count <= max {
            return 1..=self.count;
        }
        let start = self
            .current
            .saturating_sub(max / 2)
            .clamp(1, self.count - max + 1);
        start..=start + max - 1
    }
}
