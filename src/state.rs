//! Application state - single source of truth

use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use tui_dispatch::DataResource;

use crate::monster::{Column, Dataset, MonsterRecord};
use crate::table::{page_count, paginate, sort_records, PageNav, SortSpec, ITEMS_PER_PAGE};

/// Caption shown above the table
pub const TABLE_CAPTION: &str = "Dragon Quest Monster Joker 2 Professional Monsters";

/// Pagination button labels
pub const PREV_LABEL: &str = "Anterior";
pub const NEXT_LABEL: &str = "Siguiente";

/// Where the monster list comes from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DataSource {
    /// The list compiled into the binary
    #[default]
    Bundled,
    /// A JSON file on disk
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Bundled => f.write_str("bundled"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Dataset", label = "Source")]
    pub source: DataSource,

    /// Dataset lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Dataset", label = "Data", debug_fmt)]
    pub dataset: DataResource<Dataset>,

    /// Active sort, `None` means load order
    #[debug(section = "Table", label = "Sort", debug_fmt)]
    pub sort: Option<SortSpec>,

    /// 1-based
    #[debug(section = "Table", label = "Page")]
    #[serde(deserialize_with = "at_least_one")]
    pub current_page: usize,

    #[debug(section = "Table", label = "Page size")]
    #[serde(deserialize_with = "at_least_one")]
    pub page_size: usize,

    /// Header the cursor sits on
    #[debug(skip)]
    pub header_focus: Column,
}

impl AppState {
    pub fn new(source: DataSource, page_size: usize) -> Self {
        Self {
            source,
            dataset: DataResource::Empty,
            sort: None,
            current_page: 1,
            page_size: page_size.max(1),
            header_focus: Column::default(),
        }
    }

    /// Start with `spec` active. Rank and level are ignored.
    pub fn with_sort(mut self, spec: SortSpec) -> Self {
        if spec.column.is_sortable() {
            self.sort = Some(spec);
            self.header_focus = spec.column;
        }
        self
    }

    /// Pull `current_page` back into `1..=max(page_count, 1)`
    pub fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.page_count().max(1));
    }

    /// Loaded records in load order (empty until the dataset arrives)
    pub fn records(&self) -> &[MonsterRecord] {
        self.dataset.data().map(Dataset::records).unwrap_or(&[])
    }

    pub fn page_count(&self) -> usize {
        page_count(self.records().len(), self.page_size)
    }

    pub fn page_nav(&self) -> PageNav {
        PageNav::new(self.current_page, self.page_count())
    }

    /// Full dataset in the current sort order
    pub fn sorted_records(&self) -> Vec<&MonsterRecord> {
        sort_records(self.records(), self.sort)
    }

    /// Rows on the current page
    pub fn visible_rows(&self) -> Vec<&MonsterRecord> {
        let sorted = self.sorted_records();
        paginate(&sorted, self.current_page, self.page_size).to_vec()
    }
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    usize::deserialize(deserializer).map(|n| n.max(1))
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DataSource::Bundled, ITEMS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::Stats;

    fn dataset(count: u32) -> Dataset {
        let records = (1..=count)
            .map(|id| MonsterRecord {
                id,
                name: format!("Monster {id}"),
                family: "Slime".into(),
                rank: "F".into(),
                level: 1,
                stats: Stats {
                    hp: 100 - id,
                    ..Default::default()
                },
            })
            .collect();
        Dataset::new(records).unwrap()
    }

    #[test]
    fn test_visible_rows_follow_sort_and_page() {
        let mut state = AppState {
            dataset: DataResource::Loaded(dataset(12)),
            ..Default::default()
        };
        assert_eq!(state.page_count(), 2);
        assert_eq!(state.visible_rows().len(), 10);
        assert_eq!(state.visible_rows()[0].id, 1);

        state.sort = Some(SortSpec::ascending(Column::Hp));
        state.current_page = 2;
        let ids: Vec<u32> = state.visible_rows().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_not_loaded_has_no_pages() {
        let state = AppState::default();
        assert!(state.records().is_empty());
        assert_eq!(state.page_count(), 0);
        assert!(state.visible_rows().is_empty());
    }

    #[test]
    fn test_page_size_never_zero() {
        let state = AppState::new(DataSource::Bundled, 0);
        assert_eq!(state.page_size, 1);
    }

    #[test]
    fn test_snapshot_paging_fields_clamped() {
        let state: AppState =
            serde_json::from_str(r#"{"current_page": 0, "page_size": 0}"#).unwrap();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 1);

        let state: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.page_size, ITEMS_PER_PAGE);
    }

    #[test]
    fn test_snapshot_rejects_invalid_dataset() {
        let json = r#"{"dataset": {"Loaded": [
            {"id": 3, "name": "Slime", "family": "Slime", "rank": "F", "level": 1,
             "max_stats": {"hp": 1, "mp": 1, "atk": 1, "def": 1, "agi": 1, "wis": 1}},
            {"id": 3, "name": "Dracky", "family": "Beast", "rank": "F", "level": 1,
             "max_stats": {"hp": 2, "mp": 1, "atk": 1, "def": 1, "agi": 1, "wis": 1}}
        ]}}"#;
        assert!(serde_json::from_str::<AppState>(json).is_err());
    }

    #[test]
    fn test_clamp_page_after_snapshot() {
        let mut state = AppState {
            dataset: DataResource::Loaded(dataset(12)),
            current_page: 40,
            ..Default::default()
        };
        state.clamp_page();
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_with_sort_skips_unsortable_columns() {
        let state = AppState::default().with_sort(SortSpec::ascending(Column::Wis));
        assert_eq!(state.sort, Some(SortSpec::ascending(Column::Wis)));
        assert_eq!(state.header_focus, Column::Wis);

        let state = AppState::default().with_sort(SortSpec::ascending(Column::Rank));
        assert_eq!(state.sort, None);
    }
}
