#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod graph;
pub mod layout;
pub mod layout_dump;
pub mod model;

#[cfg(feature = "cli")]
pub use cli::run;
