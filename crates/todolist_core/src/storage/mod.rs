use crate::error::AppError;
use crate::model::Task;
use std::path::PathBuf;

pub mod json_store;

/// Destination for the full collection after every mutation. Keeps
/// persistence out of the mutation call sites; the session writes through
/// exactly one of these.
pub trait StoreSink {
    fn persist(&self, tasks: &[Task]) -> Result<(), AppError>;
}

/// Production sink: serializes the collection to the JSON slot on disk.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StoreSink for JsonFileSink {
    fn persist(&self, tasks: &[Task]) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, tasks)
    }
}

/// Sink that drops every write.
pub struct NoopSink;

impl StoreSink for NoopSink {
    fn persist(&self, _tasks: &[Task]) -> Result<(), AppError> {
        Ok(())
    }
}
