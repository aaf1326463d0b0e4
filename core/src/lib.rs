pub mod core;
pub mod theme;
pub mod types;
pub mod views;
