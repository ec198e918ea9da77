//! Sample Table Module
//! Slices the fixed beat-detection schema out of a loaded DataFrame.

use crate::config::CHANNEL_COUNT;
use log::debug;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Invalid value {value:?} in column {column}, row {row}")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },
}

/// Shared x column
pub const SAMPLE_COL: &str = "Sample";

/// The five numeric traces every channel carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Noize,
    Avg,
    Thresh,
    Cur,
    Sd,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::Noize,
        SignalKind::Avg,
        SignalKind::Thresh,
        SignalKind::Cur,
        SignalKind::Sd,
    ];

    /// Legend label, without the channel suffix.
    pub fn label(self) -> &'static str {
        match self {
            SignalKind::Noize => "noize",
            SignalKind::Avg => "avg",
            SignalKind::Thresh => "thresh",
            SignalKind::Cur => "cur",
            SignalKind::Sd => "sd",
        }
    }

    /// Column name for a channel, e.g. `thresh2`.
    pub fn column(self, channel: usize) -> String {
        format!("{}{}", self.label(), channel)
    }
}

pub fn beat_column(channel: usize) -> String {
    format!("is_beat{}", channel)
}

fn hz_column(channel: usize) -> String {
    format!("hz{}", channel)
}

fn bin_column(channel: usize) -> String {
    format!("idx{}", channel)
}

/// All columns that must be present, in file order.
pub fn required_columns() -> Vec<String> {
    let mut columns = vec![SAMPLE_COL.to_string()];
    for channel in 1..=CHANNEL_COUNT {
        columns.extend(SignalKind::ALL.iter().map(|kind| kind.column(channel)));
        columns.push(beat_column(channel));
    }
    columns
}

/// One channel's traces. Empty cells are `NaN`.
#[derive(Debug, Clone, Default)]
pub struct ChannelSeries {
    /// 1-based channel number
    pub channel: usize,
    /// Indexed by `SignalKind as usize`
    pub signals: [Vec<f64>; 5],
    /// Beat indicator as 0.0 / 1.0
    pub is_beat: Vec<f64>,
    /// Beat frequency in Hz, if the dump carries it
    pub hz: Option<f64>,
    /// DFT bin of the beat frequency, if the dump carries it
    pub bin: Option<f64>,
}

impl ChannelSeries {
    pub fn signal(&self, kind: SignalKind) -> &[f64] {
        &self.signals[kind as usize]
    }
}

/// The whole dump, in file row order.
#[derive(Debug, Clone, Default)]
pub struct SampleTable {
    pub samples: Vec<f64>,
    pub channels: Vec<ChannelSeries>,
}

impl SampleTable {
    /// Extract the sample column and every channel. Fails on the first
    /// required column that is absent, before anything is copied.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, TableError> {
        if let Some(missing) = required_columns()
            .into_iter()
            .find(|name| df.column(name).is_err())
        {
            return Err(TableError::MissingColumn(missing));
        }

        let samples = float_column(df, SAMPLE_COL)?;
        let channels = (1..=CHANNEL_COUNT)
            .map(|channel| Self::extract_channel(df, channel))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { samples, channels })
    }

    fn extract_channel(df: &DataFrame, channel: usize) -> Result<ChannelSeries, TableError> {
        let mut signals: [Vec<f64>; 5] = Default::default();
        for kind in SignalKind::ALL {
            signals[kind as usize] = float_column(df, &kind.column(channel))?;
        }

        Ok(ChannelSeries {
            channel,
            signals,
            is_beat: float_column(df, &beat_column(channel))?,
            hz: first_value(df, &hz_column(channel))?,
            bin: first_value(df, &bin_column(channel))?,
        })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Read a column as f64, nulls as `NaN`. String columns (header-only files,
/// `True`/`False` flags) are parsed cell by cell; any other text is an error.
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, TableError> {
    let column = df
        .column(name)
        .map_err(|_| TableError::MissingColumn(name.to_string()))?;

    let values: Vec<f64> = match column.dtype() {
        DataType::String => column
            .as_materialized_series()
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                parse_cell(cell).ok_or_else(|| TableError::InvalidCell {
                    column: name.to_string(),
                    row,
                    value: cell.unwrap_or_default().to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?,
        _ => {
            let value_f64 = column.cast(&DataType::Float64)?;
            value_f64
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect()
        }
    };

    Ok(values)
}

/// `None` when the text is neither a number nor a boolean.
fn parse_cell(cell: Option<&str>) -> Option<f64> {
    let cell = match cell.map(str::trim) {
        None | Some("") => return Some(f64::NAN),
        Some(cell) => cell,
    };
    if cell.eq_ignore_ascii_case("true") {
        Some(1.0)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(0.0)
    } else {
        cell.parse().ok()
    }
}

/// First finite value of an optional column.
fn first_value(df: &DataFrame, name: &str) -> Result<Option<f64>, TableError> {
    if df.column(name).is_err() {
        debug!("optional column {} not present", name);
        return Ok(None);
    }
    Ok(float_column(df, name)?.into_iter().find(|v| v.is_finite()))
}
