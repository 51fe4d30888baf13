use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dependency::Dependency;
use super::phase::{sort_by_row, Phase};
use crate::error::{Result, TimelineError};

/// A project's phases and the dependencies between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Untitled Project".to_string(),
            phases: Vec::new(),
            dependencies: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn phase(&self, id: Uuid) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Phases in row order.
    pub fn sorted_phases(&self) -> Vec<Phase> {
        let mut phases = self.phases.clone();
        sort_by_row(&mut phases);
        phases
    }

    /// Overwrite one phase's persisted dates.
    pub fn set_phase_dates(
        &mut self,
        id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<()> {
        let phase = self
            .phases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TimelineError::PhaseNotFound { id })?;
        phase.start_date = start;
        phase.end_date = end;
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_dates_on_unknown_phase_fails() {
        let mut project = Project::new("Empty");
        let id = Uuid::new_v4();
        assert!(matches!(
            project.set_phase_dates(id, None, None),
            Err(TimelineError::PhaseNotFound { id: missing }) if missing == id
        ));
    }

    #[test]
    fn set_dates_updates_phase() {
        let mut project = Project::new("One");
        let phase = Phase::new("Design", 0);
        let id = phase.id;
        project.phases.push(phase);
        let start = NaiveDate::from_ymd_opt(2024, 5, 1);
        let end = NaiveDate::from_ymd_opt(2024, 5, 9);
        project.set_phase_dates(id, start, end).unwrap();
        let stored = project.phase(id).unwrap();
        assert_eq!((stored.start_date, stored.end_date), (start, end));
    }
}
