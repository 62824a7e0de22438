pub mod monthly;
pub mod transaction;
