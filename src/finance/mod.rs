pub mod aggregate;
pub mod format;
pub mod ident;
pub mod sample;
