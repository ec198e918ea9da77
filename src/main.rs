//! Beat Plot - beat-detection signal viewer
//!
//! Reads the three-channel CSV dump written by the beat detector and shows
//! one linked plot per channel.

mod charts;
mod config;
mod data;
mod gui;

use anyhow::{anyhow, Context};
use charts::Figure;
use data::{DataLoader, SampleTable};
use eframe::egui;
use gui::BeatPlotApp;
use log::{debug, info, warn};
use std::path::Path;

/// Load the dump and build the figure. Any failure here happens before a window opens.
fn load_figure(path: &Path) -> anyhow::Result<Figure> {
    let mut loader = DataLoader::new();
    let df = loader
        .load_csv(path)
        .with_context(|| format!("loading {}", path.display()))?;
    let table = SampleTable::from_dataframe(df)
        .with_context(|| format!("reading channels from {}", path.display()))?;
    debug!(
        "{} rows, columns: {:?}",
        loader.get_row_count(),
        loader.get_columns()
    );

    if table.is_empty() {
        warn!("{} has no samples", path.display());
    }

    let figure = Figure::from_table(&table);
    info!(
        "{} samples, {} panels, {} series; x {:.2}..{:.2}, y {:.2}..{:.2}",
        table.len(),
        figure.panels.len(),
        figure.panels.iter().map(|p| p.series_count()).sum::<usize>(),
        figure.x_range.min,
        figure.x_range.max,
        figure.y_range.min,
        figure.y_range.max,
    );

    Ok(figure)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let figure = load_figure(Path::new(config::DATA_PATH))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE)
            .with_title(config::APP_NAME),
        ..Default::default()
    };

    // Blocks until the window is closed
    eframe::run_native(
        config::APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(BeatPlotApp::new(cc, figure)))),
    )
    .map_err(|e| anyhow!("display failed: {}", e))?;

    info!("window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn header(skip: &str, extra: &[&str]) -> Vec<String> {
        let mut columns: Vec<String> = data::SignalKind::ALL
            .iter()
            .flat_map(|kind| (1..=3).map(move |c| kind.column(c)))
            .collect();
        columns.insert(0, "Sample".to_string());
        columns.extend((1..=3).map(|c| format!("is_beat{}", c)));
        columns.extend(extra.iter().map(|s| s.to_string()));
        columns.retain(|c| c != skip);
        columns
    }

    /// Numeric cells are `row + channel + 0.5`; beat cells come from `beat(row)`.
    fn dump_text(columns: &[String], rows: usize, beat: impl Fn(usize) -> &'static str) -> String {
        let mut text = columns.join(",");
        text.push('\n');
        for row in 0..rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|name| {
                    if name == "Sample" {
                        row.to_string()
                    } else if name.starts_with("is_beat") {
                        beat(row).to_string()
                    } else {
                        let channel = &name[name.len() - 1..];
                        format!("{}.5", row + channel.parse::<usize>().unwrap())
                    }
                })
                .collect();
            text.push_str(&cells.join(","));
            text.push('\n');
        }
        text
    }

    /// Same dump with the `noize1` cell of row 1 replaced.
    fn patch_noize1_row1(text: &str, cell: &str) -> String {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        let mut cells: Vec<&str> = lines[2].split(',').collect();
        cells[1] = cell;
        let row = cells.join(",");
        lines[2] = row;
        lines.join("\n") + "\n"
    }

    fn write_text(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn write_dump(
        columns: &[String],
        rows: usize,
        beat: impl Fn(usize) -> &'static str,
    ) -> tempfile::NamedTempFile {
        write_text(&dump_text(columns, rows, beat))
    }

    #[test]
    fn well_formed_dump_builds_three_panels() {
        let file = write_dump(&header("", &[]), 3, |row| if row == 1 { "1" } else { "0" });
        let figure = load_figure(file.path()).unwrap();

        assert_eq!(figure.panels.len(), 3);
        let series: usize = figure.panels.iter().map(|p| p.series_count()).sum();
        assert_eq!(series, 18);
        for panel in &figure.panels {
            assert!(panel.lines.iter().all(|line| line.points().len() == 3));
            assert_eq!(panel.beats.points().len(), 3);
        }
        // Values span 1.5 (row 0, channel 1) to 5.5 (row 2, channel 3).
        assert!(figure.y_range.contains(1.5) && figure.y_range.contains(5.5));
        assert!(figure.x_range.contains(0.0) && figure.x_range.contains(2.0));
    }

    #[test]
    fn missing_column_fails_before_display() {
        let file = write_dump(&header("sd2", &[]), 3, |_| "0");
        let err = load_figure(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Missing column: sd2"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_figure(&dir.path().join("long.csv")).unwrap_err();
        assert!(format!("{:#}", err).contains("not found"));
    }

    #[test]
    fn header_only_dump_builds_empty_panels() {
        let file = write_dump(&header("", &[]), 0, |_| "0");
        let figure = load_figure(file.path()).unwrap();

        assert_eq!(figure.panels.len(), 3);
        for panel in &figure.panels {
            assert_eq!(panel.lines.len(), 5);
            assert!(panel.lines.iter().all(|line| line.points().is_empty()));
            assert_eq!(panel.beats.label, "beat?");
        }
    }

    #[test]
    fn textual_beat_flags_and_frequency_columns() {
        let columns = header("", &["hz1", "idx1"]);
        let file = write_dump(&columns, 2, |row| if row == 0 { "True" } else { "False" });
        let figure = load_figure(file.path()).unwrap();

        let panel = &figure.panels[0];
        let raw: Vec<f64> = panel
            .beats
            .points()
            .iter()
            .map(|p| panel.beat_axis.to_secondary(p[1]))
            .collect();
        assert!((raw[0] - 1.0).abs() < 1e-9 && raw[1].abs() < 1e-9);
        assert_eq!(panel.title, "Channel 1 · 1.5 Hz (bin 1.5)");
        assert_eq!(figure.panels[1].title, "Channel 2");
    }

    #[test]
    fn empty_cell_splits_the_line() {
        let text = patch_noize1_row1(&dump_text(&header("", &[]), 3, |_| "0"), "");
        let file = write_text(&text);
        let figure = load_figure(file.path()).unwrap();

        let noize = &figure.panels[0].lines[0];
        assert_eq!(noize.label, "noize");
        assert_eq!(noize.segments, vec![vec![[0.0, 1.5]], vec![[2.0, 3.5]]]);
        assert_eq!(figure.panels[1].lines[0].segments.len(), 1);
    }

    #[test]
    fn garbage_cell_fails_the_load() {
        let text = patch_noize1_row1(&dump_text(&header("", &[]), 3, |_| "0"), "oops");
        let file = write_text(&text);
        let err = load_figure(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("oops"));
    }

    #[test]
    fn legend_lists_only_the_primary_lines() {
        let file = write_dump(&header("", &[]), 2, |_| "1");
        let figure = load_figure(file.path()).unwrap();
        for panel in &figure.panels {
            assert_eq!(panel.legend_labels(), vec!["noize", "avg", "thresh", "cur", "sd"]);
            assert!(!panel.legend_labels().contains(&"beat?"));
        }
    }
}
