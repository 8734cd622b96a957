//! Dataset loading - bundled list or a JSON file on disk

use crate::monster::{Dataset, DatasetError};
use crate::state::DataSource;

/// Monster list compiled into the binary
pub const BUNDLED_MONSTERS: &str = include_str!("../data/monsters.json");

/// Parse the bundled monster list
pub fn bundled() -> Result<Dataset, DatasetError> {
    Dataset::from_json(BUNDLED_MONSTERS)
}

/// Read and validate a monster list from `source`
pub async fn load_dataset(source: &DataSource) -> Result<Dataset, DatasetError> {
    let dataset = match source {
        DataSource::Bundled => bundled()?,
        DataSource::File(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DatasetError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
            Dataset::from_json(&json)?
        }
    };
    tracing::info!(%source, records = dataset.len(), "dataset loaded");
    Ok(dataset)
}
