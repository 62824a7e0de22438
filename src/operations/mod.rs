pub mod add;
pub mod browse;
pub mod chart;
pub mod search;
pub mod summary;
