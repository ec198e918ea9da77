//! Beat Plot Main Application
//! Single window holding the stacked channel panels.

use crate::charts::Figure;
use crate::gui::ChartViewer;

/// Main application window.
pub struct BeatPlotApp {
    chart_viewer: ChartViewer,
}

impl BeatPlotApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        Self {
            chart_viewer: ChartViewer::new(figure),
        }
    }
}

impl eframe::App for BeatPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
