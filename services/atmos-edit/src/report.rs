//! Text and JSON output for the CLI.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use atmos_common::{units, Quantity};
use atmos_editor::{EditOutcome, EditRequest, HeightWindow, Viewport, YLimits};
use atmos_store::AtmosphereSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Shape and per-quantity value ranges of every time step.
pub fn info(snapshot: &AtmosphereSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "shape (time, x, y, depth): {}", snapshot.shape());

    for t in 0..snapshot.time_steps() {
        let heights = snapshot.heights(t).unwrap_or(&[]);
        let monotonic = snapshot.is_monotonic(t).unwrap_or(false);
        let _ = match atmos_store::snapshot::finite_range(heights) {
            Some((lo, hi)) => writeln!(
                out,
                "t={:<3} height {:.4}..{:.4} Mm{}",
                t,
                units::to_megameters(lo),
                units::to_megameters(hi),
                if monotonic { "" } else { " (not monotonic)" }
            ),
            None => writeln!(out, "t={:<3} height (no finite values)", t),
        };

        for quantity in Quantity::ALL {
            let _ = match snapshot.value_range(quantity, t).ok().flatten() {
                Some((lo, hi)) => writeln!(
                    out,
                    "      {:<17} {:>12.5e} .. {:>12.5e} {}",
                    quantity.name(),
                    lo,
                    hi,
                    quantity.units()
                ),
                None => writeln!(out, "      {:<17} (no finite values)", quantity.name()),
            };
        }
    }
    out
}

#[derive(Debug, Serialize)]
struct ProfileView {
    quantity: Quantity,
    label: &'static str,
    units: &'static str,
    y_limits: Option<YLimits>,
    /// `(height Mm, value)` inside the window.
    points: Vec<(f64, f64)>,
}

#[derive(Debug, Serialize)]
struct ShowView {
    time_index: usize,
    window: HeightWindow,
    profiles: Vec<ProfileView>,
}

fn show_view(viewport: &Viewport) -> ShowView {
    let window = viewport.window();
    ShowView {
        time_index: viewport.time_index(),
        window,
        profiles: viewport
            .profiles()
            .iter()
            .map(|p| ProfileView {
                quantity: p.quantity,
                label: p.quantity.label(),
                units: p.quantity.units(),
                y_limits: p.y_limits,
                points: p.visible(&window),
            })
            .collect(),
    }
}

/// The visible part of every profile plus its y-limits.
pub fn show(viewport: &Viewport, format: OutputFormat) -> serde_json::Result<String> {
    let view = show_view(viewport);
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&view),
        OutputFormat::Table => Ok(show_table(&view)),
    }
}

fn show_table(view: &ShowView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "time step {}, window {:.4}..{:.4} Mm",
        view.time_index, view.window.min, view.window.max
    );

    for profile in &view.profiles {
        let _ = writeln!(out);
        let _ = match profile.y_limits {
            Some(limits) => writeln!(
                out,
                "{} [{}]  y-limits {:.5e} .. {:.5e}",
                profile.label, profile.units, limits.lower, limits.upper
            ),
            None => writeln!(out, "{} [{}]  y-limits unset", profile.label, profile.units),
        };
        for (height, value) in &profile.points {
            let _ = writeln!(out, "  {:>10.4}  {:>14.6e}", height, value);
        }
    }
    out
}

/// One line per applied edit.
pub fn edit_summary(request: &EditRequest, outcome: &EditOutcome) -> String {
    let what = match outcome {
        EditOutcome::Point { index } => format!("point edit at index {}", index),
        EditOutcome::Range { start, end } if start == end => "range edit changed nothing".to_string(),
        EditOutcome::Range { start, end } => {
            format!("range edit over indices {}..{} ({} samples)", start, end, end - start)
        }
    };
    format!(
        "{} t={} {:.4}..{:.4} Mm: {}",
        request.quantity.name(),
        request.time_index,
        units::to_megameters(request.lower_height),
        units::to_megameters(request.upper_height),
        what
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_summary() {
        let request = EditRequest::from_display(Quantity::Temperature, 0, (4.0, 5000.0), (2.0, 4000.0));
        let line = edit_summary(&request, &EditOutcome::Range { start: 2, end: 3 });
        assert_eq!(
            line,
            "temperature t=0 4.0000..2.0000 Mm: range edit over indices 2..3 (1 samples)"
        );

        let line = edit_summary(&request, &EditOutcome::Range { start: 3, end: 3 });
        assert!(line.ends_with("range edit changed nothing"));

        let line = edit_summary(&request, &EditOutcome::Point { index: 1 });
        assert!(line.ends_with("point edit at index 1"));
    }
}
