//! Coordinate mappings: time to pixels and row index to pixel bands.

mod band;
mod linear;

pub use band::BandScale;
pub use linear::LinearScale;
