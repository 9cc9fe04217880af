pub mod generator;

pub use generator::TripContentGenerator;
