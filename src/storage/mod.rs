pub mod traits;
pub mod json;

pub use traits::CheckpointStore;
pub use json::JsonCheckpointStore;
