//! The backend the timeline reads phases from and writes date changes to.

pub mod json_file;
pub mod memory;
pub mod worker;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Dependency, Phase};
use crate::timeline::DateCommit;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use worker::{CommitOutcome, CommitRequest, CommitWorker, PendingCommits, Rollback};

/// Date fields sent to the backend. Serialized as plain `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<DateCommit> for DateUpdate {
    fn from(commit: DateCommit) -> Self {
        Self {
            start_date: Some(commit.start),
            end_date: Some(commit.end),
        }
    }
}

/// Read/write access to a project's phases.
///
/// Implementations must be callable from the commit worker thread.
pub trait PhaseStore: Send + Sync {
    fn list_phases(&self, project_id: Uuid) -> Result<Vec<Phase>>;

    fn list_dependencies(&self, project_id: Uuid) -> Result<Vec<Dependency>>;

    fn update_phase_dates(&self, phase_id: Uuid, update: DateUpdate) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_dates_without_time() {
        let update = DateUpdate {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 6),
            end_date: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"startDate":"2024-03-06","endDate":null}"#);
    }
}
