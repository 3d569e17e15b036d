use serde::{Deserialize, Serialize};

/// One todo entry. The persisted JSON field for the done flag is
/// `hasDone`; everything else serializes under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub time: String,
    #[serde(rename = "hasDone", default)]
    pub has_done: bool,
}

impl Task {
    pub fn new(id: u64, title: &str, time: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            time: time.to_string(),
            has_done: false,
        }
    }
}
