//! Charts module - figure model and egui_plot drawing

mod figure;
mod plotter;

pub use figure::Figure;
pub use plotter::ChartPlotter;
