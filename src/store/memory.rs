use parking_lot::Mutex;
use uuid::Uuid;

use super::{DateUpdate, PhaseStore};
use crate::error::{Result, TimelineError};
use crate::model::{Dependency, Phase, Project};

/// In-process store. Can be told to reject the next update.
pub struct MemoryStore {
    project: Mutex<Project>,
    fail_next: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new(project: Project) -> Self {
        Self {
            project: Mutex::new(project),
            fail_next: Mutex::new(None),
        }
    }

    /// Make the next `update_phase_dates` call fail with `reason`.
    pub fn fail_next_update(&self, reason: impl Into<String>) {
        *self.fail_next.lock() = Some(reason.into());
    }

    pub fn snapshot(&self) -> Project {
        self.project.lock().clone()
    }
}

impl PhaseStore for MemoryStore {
    fn list_phases(&self, project_id: Uuid) -> Result<Vec<Phase>> {
        let project = self.project.lock();
        if project.id != project_id {
            return Ok(Vec::new());
        }
        Ok(project.sorted_phases())
    }

    fn list_dependencies(&self, project_id: Uuid) -> Result<Vec<Dependency>> {
        let project = self.project.lock();
        if project.id != project_id {
            return Ok(Vec::new());
        }
        Ok(project.dependencies.clone())
    }

    fn update_phase_dates(&self, phase_id: Uuid, update: DateUpdate) -> Result<()> {
        if let Some(reason) = self.fail_next.lock().take() {
            return Err(TimelineError::Store(reason));
        }
        self.project
            .lock()
            .set_phase_dates(phase_id, update.start_date, update.end_date)
    }
}
