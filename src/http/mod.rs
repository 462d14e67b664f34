pub mod error;
pub mod routing;
pub mod types;
