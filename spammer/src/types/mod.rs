pub mod params;
pub mod transaction;
