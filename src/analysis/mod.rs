//! Z-spectrum analysis
//!
//! Post-processing of simulated or measured Z-spectra into
//! saturation-transfer metrics. The analysis side of the crate is pure
//! array-in/array-out: it receives a ppm axis and signal values (a slice
//! for one spectrum, an [`ndarray::ArrayD`] with the offsets on the last
//! axis for voxel-wise maps) and returns plain numeric arrays. Image
//! containers, on-disk formats and acquisition metadata never appear here.

// Module declarations
pub mod mtr;

// Re-export commonly used items for convenience
pub use mtr::{label_offsets, mtr, mtr_volume, Normalization};
