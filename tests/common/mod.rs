//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items
#[allow(unused_imports)]
pub use test_helpers::{
    amide_pool, relative_error, two_pool_propagator, water_pool, z_decay_closed_form, B0_300MHZ,
};
