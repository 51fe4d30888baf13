use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(22, 25, 31);
pub const BG_PANEL: Color32 = Color32::from_rgb(28, 32, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(33, 38, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(18, 21, 27);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(56, 150, 170, 48);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(48, 54, 66);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(86, 190, 205);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 231, 238);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 160, 176);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 108, 124);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

pub const ACCENT: Color32 = Color32::from_rgb(70, 170, 190);
pub const TODAY_LINE: Color32 = Color32::from_rgb(236, 86, 78);
pub const WARNING: Color32 = Color32::from_rgb(240, 176, 60);
pub const INVERTED_OUTLINE: Color32 = Color32::from_rgb(236, 86, 78);
pub const GRID_LINE: Color32 = Color32::from_rgb(40, 45, 56);
pub const GRID_LINE_MAJOR: Color32 = Color32::from_rgb(62, 70, 86);
pub const HANDLE_COLOR: Color32 = Color32::WHITE;
pub const CONNECTOR: Color32 = Color32::from_rgb(136, 148, 168);
pub const UNDATED_OUTLINE: Color32 = Color32::from_rgb(88, 98, 114);

/// Fill factor for bars whose start or end was estimated.
pub const ESTIMATED_FILL: f32 = 0.55;

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const ROW_PITCH: f32 = ROW_HEIGHT + ROW_GAP;
pub const HEADER_HEIGHT: f32 = 44.0;
/// Grab zone for resize handles, centered on each bar edge.
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0;
pub const SIDE_PANEL_WIDTH: f32 = 340.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Visuals ──────────────────────────────────────────────────────────────────

fn widget(base: WidgetVisuals, fill: Color32, border: Color32, text: Stroke) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke::new(1.0, border),
        fg_stroke: text,
        rounding: Rounding::same(4.0),
        ..base
    }
}

/// Install the dark timeline visuals. Call once at startup.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    let w = visuals.widgets.clone();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = BG_PANEL;
    visuals.striped = false;

    visuals.widgets.noninteractive = widget(
        w.noninteractive,
        BG_PANEL,
        BORDER_SUBTLE,
        Stroke::new(1.0, TEXT_SECONDARY),
    );
    visuals.widgets.inactive = widget(
        w.inactive,
        Color32::from_rgb(40, 46, 56),
        BORDER_SUBTLE,
        Stroke::new(1.0, TEXT_PRIMARY),
    );
    visuals.widgets.hovered = widget(
        w.hovered,
        Color32::from_rgb(50, 57, 70),
        ACCENT,
        Stroke::new(1.0, TEXT_PRIMARY),
    );
    visuals.widgets.active = widget(
        w.active,
        Color32::from_rgb(58, 66, 80),
        ACCENT,
        Stroke::new(2.0, Color32::WHITE),
    );

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.set_visuals(visuals);
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    });
}
