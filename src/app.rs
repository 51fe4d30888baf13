use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppSettings;
use crate::error::{Result, TimelineError};
use crate::model::{
    add_days, validate_dependencies, Dependency, Phase, PhaseStatus, Project,
};
use crate::store::{
    CommitOutcome, CommitWorker, DateUpdate, JsonFileStore, MemoryStore, PendingCommits,
    PhaseStore,
};
use crate::timeline::{Clock, DragController, SystemClock, ZoomController, ZoomLevel};
use crate::ui;
use crate::ui::gantt_chart::{ChartInput, ZoomStep};

/// Main application state.
pub struct TimelineApp {
    pub settings: AppSettings,
    settings_path: PathBuf,

    store: Arc<dyn PhaseStore>,
    worker: Option<CommitWorker>,
    pending: PendingCommits,
    clock: Box<dyn Clock>,

    pub project_id: Uuid,
    pub project_name: String,
    pub file_path: Option<PathBuf>,
    /// Phases in row order, with optimistic date changes applied.
    pub phases: Vec<Phase>,
    pub dependencies: Vec<Dependency>,

    pub zoom: ZoomController,
    pub drag: DragController,
    pub selected_phase: Option<Uuid>,

    pub status_message: String,
    pub show_about: bool,
    pub dependency_cycle: Option<Vec<Uuid>>,
    pub show_cycle_warning: bool,
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: AppSettings,
        settings_path: PathBuf,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let opened = settings
            .project_file
            .clone()
            .map(|path| JsonFileStore::open(&path).map(|store| (store, path)));

        match opened {
            Some(Ok((store, path))) => {
                let (id, name) = (store.project_id(), store.project_name());
                let mut app =
                    Self::with_store(Arc::new(store), id, name, clock, settings, settings_path);
                app.file_path = Some(path);
                app
            }
            other => {
                if let Some(Err(e)) = other {
                    log::warn!("Could not reopen last project: {}", e);
                }
                let project = Self::sample_project(clock.today());
                let (id, name) = (project.id, project.name.clone());
                let store = Arc::new(MemoryStore::new(project));
                Self::with_store(store, id, name, clock, settings, settings_path)
            }
        }
    }

    /// Build the app around an already-open store.
    pub fn with_store(
        store: Arc<dyn PhaseStore>,
        project_id: Uuid,
        project_name: String,
        clock: Box<dyn Clock>,
        settings: AppSettings,
        settings_path: PathBuf,
    ) -> Self {
        let worker = match CommitWorker::spawn(store.clone()) {
            Ok(w) => Some(w),
            Err(e) => {
                log::error!("Could not start commit worker: {}", e);
                None
            }
        };
        let mut app = Self {
            zoom: ZoomController::new(settings.zoom),
            settings,
            settings_path,
            store,
            worker,
            pending: PendingCommits::new(),
            clock,
            project_id,
            project_name,
            file_path: None,
            phases: Vec::new(),
            dependencies: Vec::new(),
            drag: DragController::new(),
            selected_phase: None,
            status_message: "Ready".to_string(),
            show_about: false,
            dependency_cycle: None,
            show_cycle_warning: false,
        };
        app.reload();
        app
    }

    /// Sample project relative to `today`, covering every date fallback.
    pub fn sample_project(today: NaiveDate) -> Project {
        let mut project = Project::new("Sample Project");
        let days = |n: i64| add_days(today, n);

        let mut discovery = Phase::new("Discovery", 0)
            .with_dates(Some(days(-20)), Some(days(-6)));
        discovery.status = PhaseStatus::Completed;
        discovery.color = Some(egui::Color32::from_rgb(52, 168, 83));

        let mut design = Phase::new("Design", 1)
            .with_dates(Some(days(-5)), Some(days(9)));
        design.status = PhaseStatus::InProgress;
        design.color = Some(egui::Color32::from_rgb(66, 133, 244));

        let mut build = Phase::new("Build", 2).with_dates(Some(days(10)), None);
        build.color = Some(egui::Color32::from_rgb(171, 71, 188));

        let mut qa = Phase::new("QA", 3).with_dates(None, Some(days(40)));
        qa.color = Some(egui::Color32::from_rgb(251, 140, 0));

        let launch = Phase::new("Launch", 4);

        project.dependencies = vec![
            Dependency::new(design.id, discovery.id),
            Dependency::new(build.id, design.id).with_lag(1),
            Dependency::new(qa.id, build.id),
            Dependency::new(launch.id, qa.id),
        ];
        project.phases = vec![discovery, design, build, qa, launch];
        project
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Re-read phases and dependencies from the store.
    pub fn reload(&mut self) {
        self.drag.cancel();
        match (
            self.store.list_phases(self.project_id),
            self.store.list_dependencies(self.project_id),
        ) {
            (Ok(mut phases), Ok(dependencies)) => {
                crate::model::phase::sort_by_row(&mut phases);
                self.pending.reset(&phases);
                self.phases = phases;
                self.dependencies = dependencies;
                self.check_dependencies();
                log::info!(
                    "Loaded {} phases, {} dependencies",
                    self.phases.len(),
                    self.dependencies.len()
                );
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Loading project failed: {}", e);
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    fn check_dependencies(&mut self) {
        self.dependency_cycle = match validate_dependencies(&self.dependencies) {
            Ok(()) => None,
            Err(TimelineError::DependencyCycle { cycle }) => {
                log::warn!("Dependency cycle through {} phases", cycle.len());
                self.show_cycle_warning = true;
                Some(cycle)
            }
            Err(e) => {
                log::warn!("Could not check dependencies: {}", e);
                None
            }
        };
    }

    pub fn phase_name(&self, id: Uuid) -> String {
        self.phases
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    // --- File operations ---

    pub fn open_project(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["json"])
            .pick_file()
        {
            if let Err(e) = self.open_path(&path) {
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let store = JsonFileStore::open(path)?;
        self.project_id = store.project_id();
        self.project_name = store.project_name();
        let store: Arc<dyn PhaseStore> = Arc::new(store);
        // Drop the old worker first so its queue drains against the old store.
        self.worker = None;
        self.worker = Some(CommitWorker::spawn(store.clone())?);
        self.store = store;
        self.file_path = Some(path.to_path_buf());
        self.selected_phase = None;
        self.reload();

        self.settings.project_file = Some(path.to_path_buf());
        self.persist_settings();
        self.status_message = "Project loaded".to_string();
        Ok(())
    }

    pub fn export_csv(&mut self) {
        if self.phases.is_empty() {
            self.status_message = "Nothing to export: project has no phases".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.project_name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::export_csv(&self.phases, &path) {
                Ok(count) => self.status_message = format!("Exported {} phases to CSV", count),
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    // --- View ---

    pub fn set_zoom(&mut self, level: ZoomLevel) {
        if self.zoom.set_level(level) {
            self.zoom_changed();
        }
    }

    pub fn step_zoom(&mut self, step: ZoomStep) {
        let changed = match step {
            ZoomStep::In => self.zoom.zoom_in(),
            ZoomStep::Out => self.zoom.zoom_out(),
        };
        if changed {
            self.zoom_changed();
        }
    }

    fn zoom_changed(&mut self) {
        // A gesture's pixel origin means nothing at another scale.
        self.drag.cancel();
        self.settings.zoom = self.zoom.level();
        self.persist_settings();
    }

    pub fn set_show_dependencies(&mut self, show: bool) {
        self.settings.show_dependencies = show;
        self.persist_settings();
    }

    pub fn set_show_today(&mut self, show: bool) {
        self.settings.show_today = show;
        self.persist_settings();
    }

    // --- Timeline callbacks ---

    pub fn on_phase_click(&mut self, phase_id: Uuid) {
        self.selected_phase = Some(phase_id);
    }

    /// Apply new dates locally and send them to the store.
    ///
    /// Called once per finished gesture or explicit edit, never for live previews.
    pub fn on_phase_dates_changed(
        &mut self,
        phase_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) {
        let Some(phase) = self.phases.iter_mut().find(|p| p.id == phase_id) else {
            log::warn!("Date change for unknown phase {}", phase_id);
            return;
        };
        phase.start_date = start;
        phase.end_date = end;
        let name = phase.name.clone();

        let update = DateUpdate {
            start_date: start,
            end_date: end,
        };
        let submitted = match self.worker.as_mut() {
            Some(worker) => worker.submit(phase_id, update),
            None => Err(TimelineError::WorkerDisconnected),
        };
        match submitted {
            Ok(request) => {
                self.pending.submitted(&request);
                self.status_message =
                    format!("Saving '{}' ({})…", name, format_range(start, end));
            }
            Err(e) => {
                log::error!("Could not queue date change: {}", e);
                self.status_message = format!("Could not save '{}': {}", name, e);
                self.reload();
            }
        }
    }

    /// Collect store responses; undo optimistic changes the store rejected.
    pub fn poll_commits(&mut self) {
        let outcomes = match &self.worker {
            Some(worker) => worker.poll(),
            None => return,
        };
        for outcome in outcomes {
            self.apply_outcome(outcome);
        }
    }

    /// Block until every queued commit has been answered, or `timeout` passes.
    pub fn flush_commits(&mut self, timeout: std::time::Duration) {
        let deadline = std::time::Instant::now() + timeout;
        while self.pending.has_in_flight() {
            let now = std::time::Instant::now();
            if now >= deadline {
                break;
            }
            let outcome = match &self.worker {
                Some(worker) => worker.wait(deadline - now),
                None => None,
            };
            let Some(outcome) = outcome else { break };
            self.apply_outcome(outcome);
        }
    }

    /// Report one store response and undo its optimistic change if rejected.
    fn apply_outcome(&mut self, outcome: CommitOutcome) {
        let phase_id = outcome.request.phase_id;
        let rollback = self.pending.resolve(&outcome);
        self.status_message = match &outcome.result {
            Ok(()) => format!("Saved '{}'", self.phase_name(phase_id)),
            Err(e) => format!("Could not save '{}': {}", self.phase_name(phase_id), e),
        };
        if let Some(rb) = rollback {
            if let Some(phase) = self.phases.iter_mut().find(|p| p.id == rb.phase_id) {
                phase.start_date = rb.start;
                phase.end_date = rb.end;
            }
        }
    }
}

fn format_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let fmt = |d: Option<NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "—".to_string())
    };
    format!("{} → {}", fmt(start), fmt(end))
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_commits();
        if self.pending.has_in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Phases: {}", self.phases.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("Zoom: {}", self.zoom.level().label()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: phase editor + phase table
        let today = self.today();
        let mut table_action = ui::phase_table::PhaseTableAction::None;
        let mut editor_action = ui::phase_editor::EditorAction::None;
        egui::SidePanel::left("phase_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(phase) = self
                    .selected_phase
                    .and_then(|id| self.phases.iter().find(|p| p.id == id))
                {
                    editor_action = ui::phase_editor::show_phase_editor(
                        phase,
                        &self.phases,
                        &self.dependencies,
                        today,
                        ui,
                    );
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }
                table_action =
                    ui::phase_table::show_phase_table(&self.phases, self.selected_phase, ui);
            });

        if let ui::phase_table::PhaseTableAction::Select(id) = table_action {
            self.on_phase_click(id);
        }
        if let ui::phase_editor::EditorAction::DatesChanged {
            phase_id,
            start,
            end,
        } = editor_action
        {
            self.on_phase_dates_changed(phase_id, start, end);
        }

        // Central panel: timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                let input = ChartInput {
                    phases: &self.phases,
                    dependencies: &self.dependencies,
                    zoom: self.zoom.level(),
                    today,
                    selected: self.selected_phase,
                    show_dependencies: self.settings.show_dependencies,
                    show_today: self.settings.show_today,
                };
                ui::gantt_chart::show_gantt_chart(&input, &mut self.drag, ui)
            })
            .inner;

        if let Some(id) = interaction.clicked {
            self.on_phase_click(id);
        } else if interaction.background_clicked {
            self.selected_phase = None;
        }
        if let Some(commit) = interaction.committed {
            self.on_phase_dates_changed(commit.phase_id, Some(commit.start), Some(commit.end));
        }
        if interaction.cancelled {
            self.status_message = "Drag cancelled".to_string();
        }
        if let Some(step) = interaction.zoom_step {
            self.step_zoom(step);
        }

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_cycle_warning {
            ui::dialogs::show_cycle_dialog(self, ctx);
        }
    }
}
