use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tempfile::TempDir;

use phase_timeline::app::TimelineApp;
use phase_timeline::config::AppSettings;
use phase_timeline::model::{Dependency, Phase, Project};
use phase_timeline::store::{
    CommitWorker, DateUpdate, JsonFileStore, MemoryStore, PendingCommits, PhaseStore,
};
use phase_timeline::timeline::{FixedClock, Gesture, ZoomLevel};

const WAIT: Duration = Duration::from_secs(5);

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn two_phase_project() -> Project {
    let mut project = Project::new("Test");
    let a = Phase::new("Alpha", 1).with_dates(Some(d(2024, 3, 1)), Some(d(2024, 3, 10)));
    let b = Phase::new("Beta", 0).with_dates(Some(d(2024, 3, 11)), None);
    project.dependencies = vec![Dependency::new(a.id, b.id)];
    project.phases = vec![a, b];
    project
}

fn update(start: NaiveDate, end: NaiveDate) -> DateUpdate {
    DateUpdate {
        start_date: Some(start),
        end_date: Some(end),
    }
}

#[test]
fn memory_store_lists_in_row_order() {
    let project = two_phase_project();
    let id = project.id;
    let store = MemoryStore::new(project);

    let phases = store.list_phases(id).unwrap();
    assert_eq!(
        phases.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        ["Beta", "Alpha"]
    );
    assert_eq!(store.list_dependencies(id).unwrap().len(), 1);
    assert!(store.list_phases(uuid::Uuid::new_v4()).unwrap().is_empty());
}

#[test]
fn memory_store_can_clear_a_date() {
    let project = two_phase_project();
    let beta = project.phases[1].id;
    let store = MemoryStore::new(project);

    store
        .update_phase_dates(
            beta,
            DateUpdate {
                start_date: None,
                end_date: Some(d(2024, 4, 1)),
            },
        )
        .unwrap();
    let saved = store.snapshot();
    let phase = saved.phase(beta).unwrap();
    assert_eq!((phase.start_date, phase.end_date), (None, Some(d(2024, 4, 1))));
}

#[test]
fn memory_store_rejects_unknown_phase() {
    let store = MemoryStore::new(two_phase_project());
    let err = store
        .update_phase_dates(uuid::Uuid::new_v4(), update(d(2024, 1, 1), d(2024, 1, 2)))
        .unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");
}

#[test]
fn json_store_persists_updates_to_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.timeline.json");
    let project = two_phase_project();
    let (id, alpha) = (project.id, project.phases[0].id);

    let store = JsonFileStore::create(&path, project).unwrap();
    store
        .update_phase_dates(alpha, update(d(2024, 3, 6), d(2024, 3, 15)))
        .unwrap();
    drop(store);

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.project_id(), id);
    let phase = reopened
        .list_phases(id)
        .unwrap()
        .into_iter()
        .find(|p| p.id == alpha)
        .unwrap();
    assert_eq!(phase.start_date, Some(d(2024, 3, 6)));
    assert_eq!(phase.end_date, Some(d(2024, 3, 15)));
}

#[test]
fn json_store_keeps_disk_state_on_failed_update() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.timeline.json");
    let store = JsonFileStore::create(&path, two_phase_project()).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(store
        .update_phase_dates(uuid::Uuid::new_v4(), update(d(2024, 1, 1), d(2024, 1, 2)))
        .is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn worker_reports_failure_and_pending_rolls_back() {
    let project = two_phase_project();
    let alpha = project.phases[0].clone();
    let store = Arc::new(MemoryStore::new(project));
    store.fail_next_update("backend offline");

    let mut pending = PendingCommits::new();
    pending.reset(std::slice::from_ref(&alpha));
    let mut worker = CommitWorker::spawn(store.clone()).unwrap();

    let request = worker
        .submit(alpha.id, update(d(2024, 3, 6), d(2024, 3, 15)))
        .unwrap();
    pending.submitted(&request);

    let outcome = worker.wait(WAIT).expect("worker answers");
    assert!(outcome.result.is_err());
    let rollback = pending.resolve(&outcome).expect("failed commit rolls back");
    assert_eq!(rollback.start, alpha.start_date);
    assert_eq!(rollback.end, alpha.end_date);

    // The next one goes through.
    let request = worker
        .submit(alpha.id, update(d(2024, 3, 7), d(2024, 3, 16)))
        .unwrap();
    pending.submitted(&request);
    let outcome = worker.wait(WAIT).unwrap();
    assert!(outcome.result.is_ok());
    assert_eq!(pending.resolve(&outcome), None);
    assert!(!pending.has_in_flight());

    let saved = store.snapshot();
    assert_eq!(saved.phase(alpha.id).unwrap().start_date, Some(d(2024, 3, 7)));
}

fn headless_app(store: Arc<MemoryStore>, project: &Project, dir: &TempDir) -> TimelineApp {
    TimelineApp::with_store(
        store,
        project.id,
        project.name.clone(),
        Box::new(FixedClock(d(2024, 3, 5))),
        AppSettings::default(),
        dir.path().join("settings.json"),
    )
}

#[test]
fn app_keeps_optimistic_dates_when_store_accepts() {
    let dir = TempDir::new().unwrap();
    let project = two_phase_project();
    let alpha = project.phases[0].id;
    let store = Arc::new(MemoryStore::new(project.clone()));
    let mut app = headless_app(store.clone(), &project, &dir);

    app.on_phase_dates_changed(alpha, Some(d(2024, 3, 6)), Some(d(2024, 3, 15)));
    let local = app.phases.iter().find(|p| p.id == alpha).unwrap();
    assert_eq!(local.start_date, Some(d(2024, 3, 6)));

    app.flush_commits(WAIT);
    let local = app.phases.iter().find(|p| p.id == alpha).unwrap();
    assert_eq!(local.start_date, Some(d(2024, 3, 6)));
    assert_eq!(app.status_message, "Saved 'Alpha'");
    assert_eq!(
        store.snapshot().phase(alpha).unwrap().end_date,
        Some(d(2024, 3, 15))
    );
}

#[test]
fn app_restores_dates_the_store_rejected() {
    let dir = TempDir::new().unwrap();
    let project = two_phase_project();
    let alpha = project.phases[0].id;
    let store = Arc::new(MemoryStore::new(project.clone()));
    let mut app = headless_app(store.clone(), &project, &dir);

    store.fail_next_update("conflict");
    app.on_phase_dates_changed(alpha, Some(d(2024, 3, 6)), Some(d(2024, 3, 15)));
    app.flush_commits(WAIT);

    let local = app.phases.iter().find(|p| p.id == alpha).unwrap();
    assert_eq!(local.start_date, Some(d(2024, 3, 1)));
    assert_eq!(local.end_date, Some(d(2024, 3, 10)));
    assert!(app.status_message.starts_with("Could not save 'Alpha'"));
    assert!(app.status_message.contains("conflict"));
}

#[test]
fn app_zoom_change_is_saved_to_settings() {
    let dir = TempDir::new().unwrap();
    let project = two_phase_project();
    let store = Arc::new(MemoryStore::new(project.clone()));
    let mut app = headless_app(store, &project, &dir);

    app.set_zoom(ZoomLevel::Day);
    let saved = AppSettings::load(&dir.path().join("settings.json"));
    assert_eq!(saved.zoom, ZoomLevel::Day);
}

#[test]
fn app_zoom_change_cancels_active_drag() {
    let dir = TempDir::new().unwrap();
    let project = two_phase_project();
    let store = Arc::new(MemoryStore::new(project.clone()));
    let mut app = headless_app(store, &project, &dir);

    let alpha = app.phases.iter().find(|p| p.name == "Alpha").unwrap().clone();
    assert!(app.drag.pointer_down(&alpha, Gesture::Move, 100.0));
    assert!(app.drag.is_dragging());

    app.set_zoom(ZoomLevel::Day);
    assert!(!app.drag.is_dragging());
    assert!(app.drag.pointer_up().is_none());
}

#[test]
fn app_reports_dependency_cycles() {
    let dir = TempDir::new().unwrap();
    let mut project = two_phase_project();
    let (a, b) = (project.phases[0].id, project.phases[1].id);
    project.dependencies.push(Dependency::new(b, a));
    let store = Arc::new(MemoryStore::new(project.clone()));

    let app = headless_app(store, &project, &dir);
    let cycle = app.dependency_cycle.clone().expect("cycle found");
    assert_eq!(cycle.len(), 2);
    assert!(app.show_cycle_warning);
    // Rows are still laid out.
    assert_eq!(app.phases.len(), 2);
}
