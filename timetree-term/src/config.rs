//! Loading records and widget options, and fitting options to cells.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use timetree::{DurationFormatter, EventRecord, Monospace, Options, TimeFormatter, Width};

use crate::error::HostError;
use crate::raster::CELL_WIDTH;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, HostError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| HostError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_records(path: &Path) -> Result<Vec<EventRecord>, HostError> {
    let records: Vec<EventRecord> = load_json(path)?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_options(path: &Path) -> Result<Options, HostError> {
    let options = load_json(path)?;
    log::info!("loaded options from {}", path.display());
    Ok(options)
}

/// Layout that lands rows, labels and the axis on whole cells.
pub fn defaults() -> Options {
    Options::default()
        .width(Width::Auto)
        .row_height(12.0)
        .row_spacing(4.0)
        .axis_height(32.0)
        .labels_width(160.0)
        .indent_size(16.0)
}

/// Measure text in cells and show times in milliseconds relative to the
/// earliest record.
pub fn for_terminal(options: Options, records: &[EventRecord]) -> Options {
    let origin = records.iter().map(|r| r.start).fold(f64::INFINITY, f64::min);
    let origin = if origin.is_finite() { origin } else { 0.0 };
    options
        .text_measure(Monospace::new(CELL_WIDTH))
        .time_formatter(TimeFormatter::new(move |t| format!("{}ms", (t - origin).trunc())))
        .duration_formatter(DurationFormatter::new(|start, end| format!("{}ms", end - start)))
}

/// Options from `path`, or the cell-aligned defaults, fitted to the terminal.
pub fn options(path: Option<&Path>, records: &[EventRecord]) -> Result<Options, HostError> {
    let base = match path {
        Some(path) => load_options(path)?,
        None => defaults(),
    };
    Ok(for_terminal(base, records))
}
