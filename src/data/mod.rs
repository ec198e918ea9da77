//! Data module - CSV loading and schema slicing

mod loader;
mod table;

pub use loader::DataLoader;
pub use table::{ChannelSeries, SampleTable, SignalKind};
