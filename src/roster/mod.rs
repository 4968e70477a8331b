pub mod load;
pub mod schema;
