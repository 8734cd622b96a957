//! Monster records, columns, and the dataset they live in

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::table::{extremum, Extremum, Highlight};

/// Maximum stats of a monster
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stats {
    pub hp: u32,
    pub mp: u32,
    pub atk: u32,
    pub def: u32,
    pub agi: u32,
    pub wis: u32,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Mp => self.mp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Agi => self.agi,
            Stat::Wis => self.wis,
        }
    }
}

/// A single monster as it appears in the data file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MonsterRecord {
    pub id: u32,
    pub name: String,
    pub family: String,
    pub rank: String,
    /// Capture level
    pub level: u32,
    #[serde(rename = "max_stats", alias = "stats")]
    pub stats: Stats,
}

/// The six stat columns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Stat {
    Hp,
    Mp,
    Atk,
    Def,
    Agi,
    Wis,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Mp, Stat::Atk, Stat::Def, Stat::Agi, Stat::Wis];

    fn index(self) -> usize {
        self as usize
    }
}

/// Table column identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    #[default]
    Id,
    Name,
    Family,
    Rank,
    Level,
    Hp,
    Mp,
    Atk,
    Def,
    Agi,
    Wis,
}

/// A cell value as seen by the comparators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnValue<'a> {
    Number(u32),
    Text(&'a str),
}

impl ColumnValue<'_> {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            ColumnValue::Number(n) => Some(*n),
            ColumnValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ColumnValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Number(n) => write!(f, "{n}"),
            ColumnValue::Text(s) => f.write_str(s),
        }
    }
}

impl Column {
    /// Display order of the table
    pub const ALL: [Column; 11] = [
        Column::Id,
        Column::Name,
        Column::Family,
        Column::Rank,
        Column::Level,
        Column::Hp,
        Column::Mp,
        Column::Atk,
        Column::Def,
        Column::Agi,
        Column::Wis,
    ];

    /// Columns whose header toggles sorting, in display order
    pub const SORTABLE: [Column; 9] = [
        Column::Id,
        Column::Name,
        Column::Family,
        Column::Hp,
        Column::Mp,
        Column::Atk,
        Column::Def,
        Column::Agi,
        Column::Wis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "Name",
            Column::Family => "Family",
            Column::Rank => "Rank",
            Column::Level => "Capture Lv",
            Column::Hp => "HP",
            Column::Mp => "MP",
            Column::Atk => "ATK",
            Column::Def => "DEF",
            Column::Agi => "AGI",
            Column::Wis => "WIS",
        }
    }

    /// Identifier used in data files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Family => "family",
            Column::Rank => "rank",
            Column::Level => "level",
            Column::Hp => "hp",
            Column::Mp => "mp",
            Column::Atk => "atk",
            Column::Def => "def",
            Column::Agi => "agi",
            Column::Wis => "wis",
        }
    }

    pub fn is_sortable(self) -> bool {
        Self::SORTABLE.contains(&self)
    }

    pub fn stat(self) -> Option<Stat> {
        match self {
            Column::Hp => Some(Stat::Hp),
            Column::Mp => Some(Stat::Mp),
            Column::Atk => Some(Stat::Atk),
            Column::Def => Some(Stat::Def),
            Column::Agi => Some(Stat::Agi),
            Column::Wis => Some(Stat::Wis),
            _ => None,
        }
    }

    /// Resolve this column on a record: stat columns read from the stats block,
    /// everything else from the record itself.
    pub fn value_of(self, record: &MonsterRecord) -> ColumnValue<'_> {
        match self {
            Column::Id => ColumnValue::Number(record.id),
            Column::Name => ColumnValue::Text(&record.name),
            Column::Family => ColumnValue::Text(&record.family),
            Column::Rank => ColumnValue::Text(&record.rank),
            Column::Level => ColumnValue::Number(record.level),
            Column::Hp => ColumnValue::Number(record.stats.get(Stat::Hp)),
            Column::Mp => ColumnValue::Number(record.stats.get(Stat::Mp)),
            Column::Atk => ColumnValue::Number(record.stats.get(Stat::Atk)),
            Column::Def => ColumnValue::Number(record.stats.get(Stat::Def)),
            Column::Agi => ColumnValue::Number(record.stats.get(Stat::Agi)),
            Column::Wis => ColumnValue::Number(record.stats.get(Stat::Wis)),
        }
    }

    /// Next sortable column to the right, wrapping around
    pub fn next_sortable(self) -> Column {
        let sortable = &Self::SORTABLE;
        match sortable.iter().position(|c| *c == self) {
            Some(i) => sortable[(i + 1) % sortable.len()],
            None => sortable[0],
        }
    }

    /// Previous sortable column to the left, wrapping around
    pub fn prev_sortable(self) -> Column {
        let sortable = &Self::SORTABLE;
        match sortable.iter().position(|c| *c == self) {
            Some(i) => sortable[(i + sortable.len() - 1) % sortable.len()],
            None => sortable[sortable.len() - 1],
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DatasetError::UnknownColumn(s.to_string()))
    }
}

/// Errors raised while loading or validating a dataset
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed monster data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate monster id {0}")]
    DuplicateId(u32),
    #[error("monster {0} has a blank name")]
    BlankName(u32),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Dataset-wide (min, max) of one stat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    pub min: u32,
    pub max: u32,
}

/// Per-stat extremes over the whole dataset, computed once at load
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatExtremes {
    extents: [Option<Extent>; 6],
}

impl StatExtremes {
    pub fn compute(records: &[MonsterRecord]) -> Self {
        let mut extents = [None; 6];
        for stat in Stat::ALL {
            let column = Column::from(stat);
            let min = extremum(records, column, Extremum::Min);
            let max = extremum(records, column, Extremum::Max);
            extents[stat.index()] = min.zip(max).map(|(min, max)| Extent { min, max });
        }
        Self { extents }
    }

    pub fn extent(&self, stat: Stat) -> Option<Extent> {
        self.extents[stat.index()]
    }

    /// Highest wins over lowest when every record shares the same value.
    pub fn highlight(&self, stat: Stat, value: u32) -> Option<Highlight> {
        let extent = self.extent(stat)?;
        if value == extent.max {
            Some(Highlight::Highest)
        } else if value == extent.min {
            Some(Highlight::Lowest)
        } else {
            None
        }
    }
}

impl From<Stat> for Column {
    fn from(stat: Stat) -> Self {
        match stat {
            Stat::Hp => Column::Hp,
            Stat::Mp => Column::Mp,
            Stat::Atk => Column::Atk,
            Stat::Def => Column::Def,
            Stat::Agi => Column::Agi,
            Stat::Wis => Column::Wis,
        }
    }
}

/// Validated, immutable monster list
///
/// Serialized as the bare record list. Deserializing goes through
/// [`Dataset::new`], so snapshots and replayed actions are validated and the
/// extremes are recomputed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MonsterRecord>", into = "Vec<MonsterRecord>")]
pub struct Dataset {
    records: Vec<MonsterRecord>,
    extremes: StatExtremes,
}

impl Dataset {
    pub fn new(records: Vec<MonsterRecord>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(DatasetError::DuplicateId(record.id));
            }
            if record.name.trim().is_empty() {
                return Err(DatasetError::BlankName(record.id));
            }
        }
        let extremes = StatExtremes::compute(&records);
        Ok(Self { records, extremes })
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<MonsterRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn records(&self) -> &[MonsterRecord] {
        &self.records
    }

    pub fn extremes(&self) -> &StatExtremes {
        &self.extremes
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<Vec<MonsterRecord>> for Dataset {
    type Error = DatasetError;

    fn try_from(records: Vec<MonsterRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<Dataset> for Vec<MonsterRecord> {
    fn from(dataset: Dataset) -> Self {
        dataset.records
    }
}

impl JsonSchema for Dataset {
    fn schema_name() -> String {
        "Dataset".to_string()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::schema::Schema {
        <Vec<MonsterRecord>>::json_schema(generator)
    }
}
