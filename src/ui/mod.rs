pub mod dialogs;
pub mod gantt_chart;
pub mod phase_editor;
pub mod phase_table;
pub mod theme;
pub mod toolbar;
