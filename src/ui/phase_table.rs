use crate::model::Phase;
use crate::timeline::{resolve_dates, Resolution};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

/// Actions that the phase table can request.
pub enum PhaseTableAction {
    None,
    Select(Uuid),
}

/// Render the left-side phase list. `phases` must be in row order.
pub fn show_phase_table(phases: &[Phase], selected: Option<Uuid>, ui: &mut Ui) -> PhaseTableAction {
    let mut action = PhaseTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Phases")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", phases.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, phase) in phases.iter().enumerate() {
                let is_selected = selected == Some(phase.id);

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        ui.label(
                            RichText::new(format!("{}.", i + 1))
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 3.0, phase.display_color());

                        let name_text = RichText::new(&phase.name).size(12.0).color(if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_PRIMARY
                        });
                        ui.add(egui::Label::new(name_text).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;
                                ui.label(
                                    RichText::new(phase.status.label())
                                        .size(9.5)
                                        .color(phase.status.badge_color()),
                                );
                                ui.label(
                                    RichText::new(date_summary(phase))
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                            },
                        );
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("phase-row", phase.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = PhaseTableAction::Select(phase.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}

/// Compact `MM/DD → MM/DD`, with `~` on estimated dates.
fn date_summary(phase: &Phase) -> String {
    let (range, resolution) = resolve_dates(phase.start_date, phase.end_date);
    let Some(range) = range else {
        return "—".to_string();
    };
    let start_mark = if resolution == Resolution::StartSynthesized { "~" } else { "" };
    let end_mark = if resolution == Resolution::EndSynthesized { "~" } else { "" };
    format!(
        "{}{} → {}{}",
        start_mark,
        range.start.format("%m/%d"),
        end_mark,
        range.end.format("%m/%d"),
    )
}
