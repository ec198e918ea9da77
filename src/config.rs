//! Application constants.
//! Everything the viewer needs is fixed at compile time.

/// CSV dump read at startup, relative to the working directory.
pub const DATA_PATH: &str = "long.csv";

/// Number of beat-detection channels in the dump.
pub const CHANNEL_COUNT: usize = 3;

/// Window title and eframe app id
pub const APP_NAME: &str = "Beat Plot";

pub const WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [800.0, 600.0];

/// Fraction of the data span added on each side of an axis.
pub const AXIS_MARGIN: f64 = 0.05;

/// Vertical gap between stacked panels
pub const PANEL_SPACING: f32 = 8.0;

pub const LINE_WIDTH: f32 = 1.5;
pub const BEAT_MARKER_RADIUS: f32 = 2.5;
