pub mod config;
pub mod estimate;
mod render;

pub use render::{render_json, render_report};
