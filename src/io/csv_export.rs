use std::path::Path;

use crate::error::Result;
use crate::model::Phase;
use crate::timeline::{resolve_dates, Resolution};

fn resolution_note(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::Exact => "",
        Resolution::StartSynthesized => "start estimated",
        Resolution::EndSynthesized => "end estimated",
        Resolution::Inverted => "end before start",
        Resolution::Undated => "unscheduled",
    }
}

/// Export the schedule as drawn to a semicolon-delimited CSV file.
///
/// Columns: # ; Phase ; Status ; Start Date ; End Date ; Note
/// Dates are YYYY-MM-DD; estimated dates are the ones the timeline fills in.
/// Returns the number of phases written.
pub fn export_csv(phases: &[Phase], path: &Path) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)?;
    write_rows(&mut wtr, phases)?;
    wtr.flush()?;
    Ok(phases.len())
}

fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, phases: &[Phase]) -> Result<()> {
    wtr.write_record(["#", "Phase", "Status", "Start Date", "End Date", "Note"])?;
    for (i, phase) in phases.iter().enumerate() {
        let (range, resolution) = resolve_dates(phase.start_date, phase.end_date);
        let fmt = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
        wtr.write_record([
            (i + 1).to_string(),
            phase.name.clone(),
            phase.status.label().to_string(),
            range.map(|r| fmt(r.start)).unwrap_or_default(),
            range.map(|r| fmt(r.end)).unwrap_or_default(),
            resolution_note(resolution).to_string(),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn writes_resolved_dates_and_notes() {
        let phases = vec![
            Phase::new("Design", 0).with_dates(NaiveDate::from_ymd_opt(2024, 3, 1), None),
            Phase::new("Later", 1),
        ];
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(Vec::new());
        write_rows(&mut wtr, &phases).unwrap();
        let bytes = wtr.into_inner().ok().expect("flush csv buffer");
        let out = String::from_utf8(bytes).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "#;Phase;Status;Start Date;End Date;Note");
        assert_eq!(lines[1], "1;Design;Pending;2024-03-01;2024-03-15;end estimated");
        assert_eq!(lines[2], "2;Later;Pending;;;unscheduled");
    }
}
