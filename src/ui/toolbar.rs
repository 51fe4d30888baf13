use crate::app::TimelineApp;
use crate::timeline::ZoomLevel;
use crate::ui::gantt_chart::ZoomStep;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open...", icons::FOLDER_OPEN)).clicked() {
                app.open_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Export CSV...", icons::EXPORT)).clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let level = app.zoom.level();
            if ui
                .add_enabled(
                    level.finer().is_some(),
                    egui::Button::new(format!(
                        "{}  Zoom In        Ctrl+Scroll ↑",
                        icons::MAGNIFYING_GLASS_PLUS
                    )),
                )
                .clicked()
            {
                app.step_zoom(ZoomStep::In);
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    level.coarser().is_some(),
                    egui::Button::new(format!(
                        "{}  Zoom Out      Ctrl+Scroll ↓",
                        icons::MAGNIFYING_GLASS_MINUS
                    )),
                )
                .clicked()
            {
                app.step_zoom(ZoomStep::Out);
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            for &zoom in ZoomLevel::all() {
                if ui.radio(level == zoom, zoom.label()).clicked() {
                    app.set_zoom(zoom);
                    ui.close_menu();
                }
            }
            ui.separator();
            let mut show_deps = app.settings.show_dependencies;
            if ui.checkbox(&mut show_deps, "Dependency arrows").changed() {
                app.set_show_dependencies(show_deps);
            }
            let mut show_today = app.settings.show_today;
            if ui.checkbox(&mut show_today, "Today marker").changed() {
                app.set_show_today(show_today);
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = if app.file_path.is_some() { "" } else { " (in memory)" };
            ui.label(
                RichText::new(format!("{}{}", app.project_name, source))
                    .size(11.0)
                    .weak(),
            );
            if app.dependency_cycle.is_some() {
                let warn = ui.add(
                    egui::Label::new(
                        RichText::new(icons::WARNING)
                            .size(13.0)
                            .color(theme::WARNING),
                    )
                    .sense(egui::Sense::click()),
                );
                if warn.on_hover_text("Dependency cycle detected").clicked() {
                    app.show_cycle_warning = true;
                }
            }
        });
    });
}
