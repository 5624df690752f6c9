use crate::domain::CheckpointSet;
use crate::errors::FeederResult;

#[cfg_attr(test, mockall::automock)]
pub trait CheckpointStore: Send + Sync {
    fn load(&self) -> FeederResult<CheckpointSet>;
    fn save(&self, checkpoints: &CheckpointSet) -> FeederResult<()>;
}
