use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Phase Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag bars to move phases,");
                ui.label("drag their edges to resize.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Warn about a dependency cycle. The chart still renders; arrows in the
/// cycle simply point backwards somewhere.
pub fn show_cycle_dialog(app: &mut TimelineApp, ctx: &Context) {
    let Some(cycle) = app.dependency_cycle.clone() else {
        app.show_cycle_warning = false;
        return;
    };
    let mut should_close = false;

    Window::new(RichText::new("Dependency Cycle").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new("These phases depend on each other in a loop:")
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            for id in &cycle {
                ui.label(
                    RichText::new(format!(
                        "{}  {}",
                        egui_phosphor::regular::ARROWS_CLOCKWISE,
                        app.phase_name(*id)
                    ))
                    .color(theme::TEXT_PRIMARY),
                );
            }
            ui.add_space(10.0);
            if ui.add_sized([80.0, 28.0], egui::Button::new("OK")).clicked() {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_cycle_warning = false;
    }
}
