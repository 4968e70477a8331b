pub mod compose;
pub mod params;
