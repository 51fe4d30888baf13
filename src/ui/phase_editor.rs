use chrono::NaiveDate;
use egui::{RichText, Ui};
use uuid::Uuid;

use crate::model::{Dependency, Phase};
use crate::timeline::resolve_dates;
use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    DatesChanged {
        phase_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// One optional date: a checkbox to set/clear it and a picker when set.
fn optional_date(
    ui: &mut Ui,
    label: &str,
    salt: &str,
    value: &mut Option<NaiveDate>,
    fallback: NaiveDate,
) -> bool {
    let mut enabled = value.is_some();
    let mut date = value.unwrap_or(fallback);
    let mut changed = false;
    ui.vertical(|ui| {
        changed |= ui
            .checkbox(&mut enabled, RichText::new(label).size(10.0).color(theme::TEXT_DIM))
            .changed();
        if enabled {
            changed |= ui
                .add(egui_extras::DatePickerButton::new(&mut date).id_salt(salt))
                .changed();
        } else {
            ui.label(RichText::new("not set").size(11.0).color(theme::TEXT_DIM));
        }
    });
    *value = enabled.then_some(date);
    changed
}

/// Inline editor for the selected phase's dates, plus its dependencies.
pub fn show_phase_editor(
    phase: &Phase,
    all_phases: &[Phase],
    dependencies: &[Dependency],
    today: NaiveDate,
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.label(
        RichText::new(&phase.name)
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.label(
        RichText::new(phase.status.label())
            .size(10.5)
            .color(phase.status.badge_color()),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(5.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        // ── Dates ───────────────────────────────────────────────────
        section_label(ui, "Dates");
        let (resolved, _) = resolve_dates(phase.start_date, phase.end_date);
        let mut start = phase.start_date;
        let mut end = phase.end_date;
        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= optional_date(
                ui,
                "Start",
                "dp_start",
                &mut start,
                resolved.map(|r| r.start).unwrap_or(today),
            );
            ui.add_space(12.0);
            changed |= optional_date(
                ui,
                "End",
                "dp_end",
                &mut end,
                resolved.map(|r| r.end).unwrap_or(today),
            );
        });

        if changed {
            if let (Some(s), Some(e)) = (start, end) {
                if s > e {
                    end = Some(s);
                }
            }
            action = EditorAction::DatesChanged {
                phase_id: phase.id,
                start,
                end,
            };
        }

        // ── Dependencies ────────────────────────────────────────────
        let related: Vec<&Dependency> = dependencies
            .iter()
            .filter(|d| d.involves(phase.id))
            .collect();
        if !related.is_empty() {
            ui.add_space(2.0);
            section_label(ui, "Dependencies");
            let name_of = |id: Uuid| {
                all_phases
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "(removed phase)".to_string())
            };
            for dep in related {
                let text = if dep.phase_id == phase.id {
                    format!(
                        "{} after {}",
                        egui_phosphor::regular::ARROW_LEFT,
                        name_of(dep.depends_on_phase_id)
                    )
                } else {
                    format!(
                        "{} before {}",
                        egui_phosphor::regular::ARROW_RIGHT,
                        name_of(dep.phase_id)
                    )
                };
                let text = match dep.lag_days {
                    Some(lag) if lag != 0 => format!("{}  ({:+}d lag)", text, lag),
                    _ => text,
                };
                ui.label(RichText::new(text).size(11.0).color(theme::TEXT_SECONDARY));
            }
        }
    });

    action
}
