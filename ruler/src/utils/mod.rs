pub mod core;
pub mod pairs;
pub mod payments;
pub mod ratios;
