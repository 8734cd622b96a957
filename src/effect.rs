//! Effects - side effects declared by the reducer

use crate::state::DataSource;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read and validate the monster list
    LoadDataset { source: DataSource },
}
