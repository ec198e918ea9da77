//! Figure Model
//! Turns a `SampleTable` into plot-ready panels with shared axis ranges.
//! Nothing here touches egui, so the layout rules can be tested headless.

use crate::config::AXIS_MARGIN;
use crate::data::{ChannelSeries, SampleTable, SignalKind};

/// Legend label of the beat marker series
pub const BEAT_LABEL: &str = "beat?";

/// Closed interval shown on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Range used when there is nothing to show.
    pub const EMPTY: AxisRange = AxisRange { min: 0.0, max: 1.0 };

    /// Span of the finite values plus `AXIS_MARGIN` on each side.
    /// A single repeated value is widened by 0.5 either way.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            return Self::EMPTY;
        }
        if min == max {
            return Self {
                min: min - 0.5,
                max: max + 0.5,
            };
        }

        let pad = (max - min) * AXIS_MARGIN;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Affine map from a secondary axis range onto the primary one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    pub secondary: AxisRange,
    pub primary: AxisRange,
}

impl AxisMap {
    pub fn new(secondary: AxisRange, primary: AxisRange) -> Self {
        Self { secondary, primary }
    }

    /// Secondary value to primary plot coordinate.
    pub fn to_primary(&self, value: f64) -> f64 {
        self.primary.min + (value - self.secondary.min) / self.secondary.span() * self.primary.span()
    }

    /// Primary plot coordinate back to secondary units.
    pub fn to_secondary(&self, value: f64) -> f64 {
        self.secondary.min + (value - self.primary.min) / self.primary.span() * self.secondary.span()
    }
}

/// One named series in plot coordinates, split into runs of finite rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: &'static str,
    /// A row with a non-finite x or y ends the current run.
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl Trace {
    fn new(label: &'static str, xs: &[f64], ys: &[f64]) -> Self {
        let mut segments = Vec::new();
        let mut run = Vec::new();
        for (&x, &y) in xs.iter().zip(ys) {
            if x.is_finite() && y.is_finite() {
                run.push([x, y]);
            } else if !run.is_empty() {
                segments.push(std::mem::take(&mut run));
            }
        }
        if !run.is_empty() {
            segments.push(run);
        }
        Self { label, segments }
    }

    /// All drawable points in row order, gaps removed.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.segments.concat()
    }
}

/// Everything needed to draw one channel.
#[derive(Debug, Clone)]
pub struct Panel {
    pub channel: usize,
    pub title: String,
    /// Primary axis lines, in `SignalKind::ALL` order
    pub lines: Vec<Trace>,
    /// Beat markers, already mapped onto the primary axis via `beat_axis`
    pub beats: Trace,
    pub beat_range: AxisRange,
    pub beat_axis: AxisMap,
}

impl Panel {
    fn build(samples: &[f64], series: &ChannelSeries, y_range: AxisRange) -> Self {
        let lines = SignalKind::ALL
            .iter()
            .map(|&kind| Trace::new(kind.label(), samples, series.signal(kind)))
            .collect();

        let beat_range = AxisRange::from_values(series.is_beat.iter().copied());
        let beat_axis = AxisMap::new(beat_range, y_range);

        let mut beats = Trace::new(BEAT_LABEL, samples, &series.is_beat);
        for point in beats.segments.iter_mut().flatten() {
            point[1] = beat_axis.to_primary(point[1]);
        }

        Self {
            channel: series.channel,
            title: Self::title(series),
            lines,
            beats,
            beat_range,
            beat_axis,
        }
    }

    fn title(series: &ChannelSeries) -> String {
        let mut title = format!("Channel {}", series.channel);
        if let Some(hz) = series.hz {
            title.push_str(&format!(" · {} Hz", hz));
            if let Some(bin) = series.bin {
                title.push_str(&format!(" (bin {})", bin));
            }
        }
        title
    }

    /// Legend entries: the primary lines only. The beat series is named by
    /// its axis label instead.
    pub fn legend_labels(&self) -> Vec<&'static str> {
        self.lines.iter().map(|line| line.label).collect()
    }

    /// Number of drawn series: the lines plus the beat markers.
    pub fn series_count(&self) -> usize {
        self.lines.len() + 1
    }
}

/// Stacked channel panels sharing one x range and one primary y range.
#[derive(Debug, Clone)]
pub struct Figure {
    pub panels: Vec<Panel>,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

impl Figure {
    pub fn from_table(table: &SampleTable) -> Self {
        let x_range = AxisRange::from_values(table.samples.iter().copied());
        let y_range = AxisRange::from_values(table.channels.iter().flat_map(|series| {
            series.signals.iter().flat_map(|values| values.iter().copied())
        }));

        let panels = table
            .channels
            .iter()
            .map(|series| Panel::build(&table.samples, series, y_range))
            .collect();

        Self {
            panels,
            x_range,
            y_range,
        }
    }
}
