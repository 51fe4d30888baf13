use chrono::NaiveDate;
use egui::epaint::CubicBezierShape;
use egui::{Color32, Key, Pos2, Rect, Response, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::{Dependency, Phase};
use crate::timeline::{
    DateCommit, DragController, GanttLayout, Gesture, PhasePosition, Resolution, ZoomLevel,
};
use crate::ui::theme;

const ROW_PITCH: f32 = theme::ROW_PITCH;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
}

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A bar was clicked.
    pub clicked: Option<Uuid>,
    /// A gesture finished with new dates.
    pub committed: Option<DateCommit>,
    pub cancelled: bool,
    pub zoom_step: Option<ZoomStep>,
    pub background_clicked: bool,
}

/// Read-only inputs for one frame of the chart.
pub struct ChartInput<'a> {
    /// Phases in row order.
    pub phases: &'a [Phase],
    pub dependencies: &'a [Dependency],
    pub zoom: ZoomLevel,
    pub today: NaiveDate,
    pub selected: Option<Uuid>,
    pub show_dependencies: bool,
    pub show_today: bool,
}

/// Render the timeline canvas and route pointer gestures into `drag`.
pub fn show_gantt_chart(
    input: &ChartInput<'_>,
    drag: &mut DragController,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let hit_layout = GanttLayout::compute(
        input.phases,
        input.dependencies,
        input.zoom,
        drag,
        input.today,
        ROW_PITCH,
    );

    let available = ui.available_size();
    let chart_width = hit_layout.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + input.phases.len() as f32 * ROW_PITCH + 40.0;

    // Ctrl+wheel steps the zoom level
    if ui.rect_contains_pointer(ui.max_rect()) {
        // egui folds ctrl+wheel into zoom_delta; raw scroll covers platforms that don't
        let (zoom, dy, ctrl) =
            ui.input(|i| (i.zoom_delta(), i.raw_scroll_delta.y, i.modifiers.ctrl));
        if zoom > 1.0 || (ctrl && dy > 0.0) {
            interaction.zoom_step = Some(ZoomStep::In);
        } else if zoom < 1.0 || (ctrl && dy < 0.0) {
            interaction.zoom_step = Some(ZoomStep::Out);
        }
    }

    if drag.is_dragging() && ui.input(|i| i.key_pressed(Key::Escape)) {
        interaction.cancelled = drag.cancel();
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;
            let mut preview_changed = false;

            for (phase, pos) in input.phases.iter().zip(&hit_layout.positions) {
                let rect = bar_rect(origin, pos);
                let body = ui.interact(
                    rect,
                    ui.make_persistent_id(("phase-bar", phase.id)),
                    if pos.is_draggable() {
                        Sense::click_and_drag()
                    } else {
                        Sense::click()
                    },
                );

                let mut grips: Vec<(Response, Gesture)> = vec![(body.clone(), Gesture::Move)];
                if pos.is_draggable() {
                    let left_handle = Rect::from_min_max(
                        Pos2::new(rect.left() - HANDLE_WIDTH * 0.5, rect.top()),
                        Pos2::new(rect.left() + HANDLE_WIDTH * 0.5, rect.bottom()),
                    );
                    let right_handle = Rect::from_min_max(
                        Pos2::new(rect.right() - HANDLE_WIDTH * 0.5, rect.top()),
                        Pos2::new(rect.right() + HANDLE_WIDTH * 0.5, rect.bottom()),
                    );
                    let left = ui.interact(
                        left_handle.expand(4.0),
                        ui.make_persistent_id(("phase-resize-start", phase.id)),
                        Sense::drag(),
                    );
                    let right = ui.interact(
                        right_handle.expand(4.0),
                        ui.make_persistent_id(("phase-resize-end", phase.id)),
                        Sense::drag(),
                    );
                    grips.push((left, Gesture::ResizeStart));
                    grips.push((right, Gesture::ResizeEnd));
                }

                if body.clicked() {
                    interaction.clicked = Some(phase.id);
                    consumed_click = true;
                }

                for (resp, gesture) in &grips {
                    if resp.drag_started() {
                        if let Some(p) = resp.interact_pointer_pos() {
                            if drag.pointer_down(phase, *gesture, p.x) {
                                interaction.clicked = Some(phase.id);
                                consumed_click = true;
                            }
                        }
                    }
                    if resp.dragged() {
                        ui.ctx().set_cursor_icon(match gesture {
                            Gesture::Move => egui::CursorIcon::Grabbing,
                            _ => egui::CursorIcon::ResizeHorizontal,
                        });
                        if let Some(p) = resp.interact_pointer_pos() {
                            preview_changed |= drag.pointer_move(p.x, hit_layout.pixels_per_day);
                        }
                    }
                    if resp.drag_stopped() {
                        if let Some(commit) = drag.pointer_up() {
                            interaction.committed = Some(commit);
                        }
                    }
                }

                let hovered_grip = grips.iter().skip(1).any(|(r, _)| r.hovered());
                if hovered_grip {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                } else if body.hovered() && pos.is_draggable() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                }

                if grips.iter().any(|(r, _)| r.hovered()) && !drag.is_dragging() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("phase-tip", phase.id)),
                        |ui| phase_tooltip(ui, phase, pos, input.dependencies, input.phases),
                    );
                }
            }

            // Gestures above may have moved a bar; paint from fresh positions.
            let layout = if preview_changed
                || interaction.committed.is_some()
                || interaction.cancelled
            {
                ui.ctx().request_repaint();
                GanttLayout::compute(
                    input.phases,
                    input.dependencies,
                    input.zoom,
                    drag,
                    input.today,
                    ROW_PITCH,
                )
            } else {
                hit_layout.clone()
            };

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_rows(&painter, origin, input.phases.len(), chart_width);
            draw_timeline_header(&painter, origin, &layout, chart_width, chart_height);

            if input.show_dependencies {
                draw_connectors(&painter, origin, &layout);
            }

            for (phase, pos) in input.phases.iter().zip(&layout.positions) {
                let is_selected = input.selected == Some(phase.id);
                if pos.is_draggable() {
                    draw_phase_bar(&painter, origin, phase, pos, is_selected);
                } else {
                    draw_undated_bar(&painter, origin, phase, pos, is_selected);
                }
            }

            if input.show_today {
                if let Some(x) = layout.today_x {
                    draw_today_line(&painter, origin, x, chart_height);
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                interaction.background_clicked = true;
            }
        });

    interaction
}

fn bar_rect(origin: Pos2, pos: &PhasePosition) -> Rect {
    let bar_height = theme::ROW_HEIGHT - theme::BAR_INSET * 2.0;
    let top = origin.y
        + HEADER_HEIGHT
        + pos.row as f32 * ROW_PITCH
        + (ROW_PITCH - bar_height) / 2.0;
    Rect::from_min_size(
        Pos2::new(origin.x + pos.left, top),
        Vec2::new(pos.width, bar_height),
    )
}

fn phase_tooltip(
    ui: &mut Ui,
    phase: &Phase,
    pos: &PhasePosition,
    dependencies: &[Dependency],
    phases: &[Phase],
) {
    ui.strong(&phase.name);
    ui.label(phase.status.label());
    match pos.resolved {
        Some(range) => {
            ui.label(format!(
                "{} → {}",
                range.start.format("%d/%m/%Y"),
                range.end.format("%d/%m/%Y"),
            ));
            match pos.resolution {
                Resolution::StartSynthesized => {
                    ui.weak("Start estimated from end date");
                }
                Resolution::EndSynthesized => {
                    ui.weak("End estimated from start date");
                }
                Resolution::Inverted => {
                    ui.colored_label(theme::INVERTED_OUTLINE, "End date is before start date");
                }
                Resolution::Exact | Resolution::Undated => {}
            }
        }
        None => {
            ui.weak("No dates set");
        }
    }
    for dep in dependencies.iter().filter(|d| d.phase_id == phase.id) {
        let upstream = phases
            .iter()
            .find(|p| p.id == dep.depends_on_phase_id)
            .map(|p| p.name.as_str())
            .unwrap_or("(removed phase)");
        match dep.lag_days {
            Some(lag) if lag != 0 => ui.weak(format!("After '{}' ({:+}d)", upstream, lag)),
            _ => ui.weak(format!("After '{}'", upstream)),
        };
    }
}

fn draw_rows(painter: &egui::Painter, origin: Pos2, rows: usize, width: f32) {
    for i in 0..rows {
        let y = origin.y + HEADER_HEIGHT + i as f32 * ROW_PITCH;
        let row_bg = if i % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, ROW_PITCH)),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + ROW_PITCH),
                Pos2::new(origin.x + width, y + ROW_PITCH),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    layout: &GanttLayout,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for tick in &layout.ticks {
        let x = origin.x + tick.offset;
        let line_color = if tick.major {
            theme::GRID_LINE_MAJOR
        } else {
            theme::GRID_LINE
        };
        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, line_color),
        );

        let (y, font, color) = if tick.major {
            (origin.y + 12.0, theme::font_header(), theme::TEXT_PRIMARY)
        } else {
            (origin.y + 28.0, theme::font_sub(), theme::TEXT_SECONDARY)
        };
        painter.text(
            Pos2::new(x + 3.0, y),
            egui::Align2::LEFT_CENTER,
            &tick.label,
            font,
            color,
        );
    }
}

fn draw_connectors(painter: &egui::Painter, origin: Pos2, layout: &GanttLayout) {
    let shift = Vec2::new(origin.x, origin.y + HEADER_HEIGHT);
    let stroke = Stroke::new(1.2, theme::CONNECTOR);

    for connector in &layout.connectors {
        let points = connector.curve.map(|p| p + shift);
        painter.add(CubicBezierShape::from_points_stroke(
            points,
            false,
            Color32::TRANSPARENT,
            stroke,
        ));
        painter.add(Shape::convex_polygon(
            connector.arrow.map(|p| p + shift).to_vec(),
            theme::CONNECTOR,
            Stroke::NONE,
        ));

        if let Some(lag) = connector.lag_days.filter(|l| *l != 0) {
            let mid = points[0].lerp(points[3], 0.5);
            painter.text(
                mid - Vec2::new(0.0, 7.0),
                egui::Align2::CENTER_CENTER,
                format!("{:+}d", lag),
                theme::font_small(),
                theme::TEXT_DIM,
            );
        }
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, offset: f32, height: f32) {
    let x = origin.x + offset;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_phase_bar(
    painter: &egui::Painter,
    origin: Pos2,
    phase: &Phase,
    pos: &PhasePosition,
    is_selected: bool,
) {
    let bar_rect = bar_rect(origin, pos);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let estimated = matches!(
        pos.resolution,
        Resolution::StartSynthesized | Resolution::EndSynthesized
    );
    let fill = if estimated {
        phase.display_color().gamma_multiply(theme::ESTIMATED_FILL)
    } else {
        phase.display_color()
    };

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );

    painter.rect_filled(bar_rect, rounding, fill);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if pos.resolution == Resolution::Inverted {
        painter.rect_stroke(bar_rect, rounding, Stroke::new(1.5, theme::INVERTED_OUTLINE));
    }

    if is_selected || pos.is_preview {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );

        let handle_h = bar_rect.height() * 0.55;
        let handle_y = bar_rect.center().y - handle_h / 2.0;
        for x in [bar_rect.left() - 1.5, bar_rect.right() - 2.5] {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                Rounding::same(2.0),
                theme::HANDLE_COLOR,
            );
        }
    }

    // Phase name on bar (single line, clipped to bar bounds)
    if bar_rect.width() > 30.0 {
        let galley =
            painter.layout_no_wrap(phase.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_undated_bar(
    painter: &egui::Painter,
    origin: Pos2,
    phase: &Phase,
    pos: &PhasePosition,
    is_selected: bool,
) {
    let bar_rect = bar_rect(origin, pos);
    let stroke_color = if is_selected {
        theme::BORDER_ACCENT
    } else {
        theme::UNDATED_OUTLINE
    };
    painter.rect_stroke(
        bar_rect,
        Rounding::same(theme::BAR_ROUNDING),
        Stroke::new(1.0, stroke_color),
    );
    painter.text(
        bar_rect.center(),
        egui::Align2::CENTER_CENTER,
        "No dates",
        theme::font_small(),
        theme::TEXT_DIM,
    );
    painter.text(
        Pos2::new(bar_rect.right() + 6.0, bar_rect.center().y),
        egui::Align2::LEFT_CENTER,
        &phase.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );
}
