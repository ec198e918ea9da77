//! Chart Plotter Module
//! Draws one channel panel with egui_plot: five signal lines on the left
//! axis and the beat markers on a right-hand twin axis.

use crate::charts::figure::{AxisRange, Figure, Panel};
use crate::config::{BEAT_MARKER_RADIUS, LINE_WIDTH};
use egui::{Color32, Vec2, Vec2b};
use egui_plot::{AxisHints, HPlacement, Legend, Line, Plot, PlotPoints, Points};

/// Line colors, matplotlib's default cycle
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
];

/// The twin axis restarts the cycle, so beats take the first color.
pub const BEAT_COLOR: Color32 = PALETTE[0];

/// All panels pan and zoom together.
const LINK_GROUP: &str = "beat_channels";

/// The figure ranges already carry `AXIS_MARGIN`; egui_plot adds none on top.
const PLOT_MARGIN: Vec2 = Vec2::ZERO;

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn line_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Short tick label: at most two decimals, trailing zeros removed.
    pub fn format_tick(value: f64) -> String {
        let formatted = format!("{:.2}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Right-hand axis labelled in beat units. Ticks outside the beat range stay blank.
    fn beat_axis_hints(panel: &Panel) -> AxisHints<'static> {
        let map = panel.beat_axis;
        let range: AxisRange = panel.beat_range;

        AxisHints::new_y()
            .label(panel.beats.label)
            .placement(HPlacement::Right)
            .formatter(move |mark, _range| {
                let value = map.to_secondary(mark.value);
                if range.contains(value) {
                    Self::format_tick(value)
                } else {
                    String::new()
                }
            })
    }

    /// Draw a channel panel. Every panel is linked on both axes, and the
    /// initial view covers the figure's shared ranges.
    pub fn draw_panel(
        ui: &mut egui::Ui,
        figure: &Figure,
        panel: &Panel,
        height: f32,
        show_x_label: bool,
    ) {
        let mut plot = Plot::new(format!("channel_{}", panel.channel))
            .height(height)
            .legend(Legend::default())
            .link_axis(LINK_GROUP, Vec2b::new(true, true))
            .link_cursor(LINK_GROUP, Vec2b::new(true, false))
            .set_margin_fraction(PLOT_MARGIN)
            .allow_scroll(false)
            .include_x(figure.x_range.min)
            .include_x(figure.x_range.max)
            .include_y(figure.y_range.min)
            .include_y(figure.y_range.max)
            .custom_y_axes(vec![AxisHints::new_y(), Self::beat_axis_hints(panel)]);

        if show_x_label {
            plot = plot.x_axis_label("Sample");
        }

        plot.show(ui, |plot_ui| {
            // Same name and color per run, so the legend shows one entry per trace.
            let names = panel.legend_labels();
            for (i, (trace, name)) in panel.lines.iter().zip(names).enumerate() {
                for segment in &trace.segments {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(segment.iter().copied()))
                            .color(Self::line_color(i))
                            .width(LINE_WIDTH)
                            .name(name),
                    );
                }
            }

            // Unnamed: the beat series is identified by the right-hand axis label.
            plot_ui.points(
                Points::new(PlotPoints::from_iter(panel.beats.points()))
                    .radius(BEAT_MARKER_RADIUS)
                    .color(BEAT_COLOR),
            );
        });
    }
}
