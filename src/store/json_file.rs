use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use uuid::Uuid;

use super::{DateUpdate, PhaseStore};
use crate::error::Result;
use crate::io::{load_project, save_project};
use crate::model::{Dependency, Phase, Project};

/// Store backed by a single project JSON file, rewritten on every update.
pub struct JsonFileStore {
    path: PathBuf,
    project: Mutex<Project>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let project = load_project(&path)?;
        log::info!(
            "Opened '{}' ({} phases) from {}",
            project.name,
            project.phases.len(),
            path.display()
        );
        Ok(Self {
            path,
            project: Mutex::new(project),
        })
    }

    /// Write `project` to `path` and open it.
    pub fn create(path: impl Into<PathBuf>, project: Project) -> Result<Self> {
        let path = path.into();
        save_project(&project, &path)?;
        Ok(Self {
            path,
            project: Mutex::new(project),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project_id(&self) -> Uuid {
        self.project.lock().id
    }

    pub fn project_name(&self) -> String {
        self.project.lock().name.clone()
    }
}

impl PhaseStore for JsonFileStore {
    fn list_phases(&self, project_id: Uuid) -> Result<Vec<Phase>> {
        let project = self.project.lock();
        if project.id != project_id {
            log::warn!("{} does not hold project {}", self.path.display(), project_id);
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
        let mut project = self.project.lock();
        // Only swap in the new state once it is on disk.
        let mut next = project.clone();
        next.set_phase_dates(phase_id, update.start_date, update.end_date)?;
        save_project(&next, &self.path)?;
        *project = next;
        Ok(())
    }
}
