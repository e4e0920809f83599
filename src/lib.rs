pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod latex;
pub mod scorer;
pub mod words;
// cmd and reports are binary modules (declared in main.rs).
