//! Chart Viewer Widget
//! Stacks one plot per channel, splitting the available height evenly.

use crate::charts::{ChartPlotter, Figure};
use crate::config::PANEL_SPACING;
use egui::RichText;

/// Height reserved for each panel heading
const TITLE_HEIGHT: f32 = 20.0;

/// Smallest plot height before panels stop shrinking
const MIN_PLOT_HEIGHT: f32 = 80.0;

/// Vertically stacked channel panels.
pub struct ChartViewer {
    figure: Figure,
}

impl ChartViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    /// Plot height per panel for a given available height.
    pub fn panel_height(available: f32, panels: usize) -> f32 {
        if panels == 0 {
            return available.max(MIN_PLOT_HEIGHT);
        }
        let n = panels as f32;
        let chrome = n * TITLE_HEIGHT + (n - 1.0) * PANEL_SPACING;
        ((available - chrome) / n).max(MIN_PLOT_HEIGHT)
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let count = self.figure.panels.len();
        let height = Self::panel_height(ui.available_height(), count);

        for (i, panel) in self.figure.panels.iter().enumerate() {
            ui.label(RichText::new(&panel.title).size(14.0).strong());
            ChartPlotter::draw_panel(ui, &self.figure, panel, height, i + 1 == count);
            if i + 1 < count {
                ui.add_space(PANEL_SPACING);
            }
        }
    }
}
