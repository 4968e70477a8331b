pub mod counter;
pub mod ease;
pub mod interpolate;
