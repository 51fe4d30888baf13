use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bar color used when a phase does not carry its own.
pub const DEFAULT_PHASE_COLOR: Color32 = Color32::from_rgb(70, 130, 180); // Steel blue

/// Lifecycle state of a phase. Owned by the backend; the timeline only displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl PhaseStatus {
    pub fn all() -> &'static [PhaseStatus] {
        &[
            PhaseStatus::Pending,
            PhaseStatus::InProgress,
            PhaseStatus::Completed,
            PhaseStatus::OnHold,
            PhaseStatus::Cancelled,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseStatus::Pending => "Pending",
            PhaseStatus::InProgress => "In Progress",
            PhaseStatus::Completed => "Completed",
            PhaseStatus::OnHold => "On Hold",
            PhaseStatus::Cancelled => "Cancelled",
        }
    }

    /// Badge color shown next to the phase name.
    pub fn badge_color(self) -> Color32 {
        match self {
            PhaseStatus::Pending => Color32::from_rgb(120, 125, 140),
            PhaseStatus::InProgress => Color32::from_rgb(66, 133, 244),
            PhaseStatus::Completed => Color32::from_rgb(52, 168, 83),
            PhaseStatus::OnHold => Color32::from_rgb(251, 140, 0),
            PhaseStatus::Cancelled => Color32::from_rgb(229, 57, 53),
        }
    }
}

/// A schedulable unit of project work, drawn as one row of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub status: PhaseStatus,
    /// Display color for the bar; `None` falls back to [`DEFAULT_PHASE_COLOR`].
    #[serde(default, with = "color_serde", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Vertical row order.
    #[serde(default)]
    pub sort_order: i32,
}

impl Phase {
    /// Create an undated phase with default status and color.
    pub fn new(name: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: PhaseStatus::Pending,
            color: None,
            start_date: None,
            end_date: None,
            sort_order,
        }
    }

    /// Builder-style helper to set both persisted dates.
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn display_color(&self) -> Color32 {
        self.color.unwrap_or(DEFAULT_PHASE_COLOR)
    }
}

/// Sort phases into row order. Ties keep their incoming order.
pub fn sort_by_row(phases: &mut [Phase]) {
    phases.sort_by_key(|p| p.sort_order);
}

/// Serde helper for an optional `Color32`, stored as `#rrggbb` or `#rrggbbaa`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Some(c) if c.a() == 255 => {
                serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b()))
            }
            Some(c) => serializer.serialize_str(&format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                c.r(),
                c.g(),
                c.b(),
                c.a()
            )),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        // Unparseable values fall back to the default color instead of failing the load.
        Ok(raw.as_deref().and_then(parse_hex))
    }

    pub(super) fn parse_hex(s: &str) -> Option<Color32> {
        let hex = s.trim().strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color32::from_rgba_unmultiplied(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                byte(6)?,
            )),
            _ => None,
        }
    }
}
