//! GUI module - window and panel layout

mod app;
mod chart_viewer;

pub use app::BeatPlotApp;
pub use chart_viewer::ChartViewer;
