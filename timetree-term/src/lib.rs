//! Terminal host for the time-tree widget: rasterizes its scene into cells
//! and feeds it mouse input.

pub mod app;
pub mod buffer;
pub mod colors;
pub mod config;
pub mod error;
pub mod input;
pub mod paths;
pub mod raster;
pub mod sample;
pub mod terminal;

pub use app::App;
pub use buffer::{Buffer, Cell};
pub use error::HostError;
