//! Quote card rendering: wraps a quote, centers it over a painted background
//! and exports the result as PNG.

pub mod assets;
pub mod background;
pub mod canvas;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod fonts;
pub mod justify;
pub mod lines;
pub mod render;
pub mod style;
pub mod surface;
pub mod typography;

#[cfg(test)]
mod testing;

pub use canvas::Canvas;
pub use error::{AssetError, ConfigError, RenderError, RenderResult};
pub use render::{Scene, render, render_card};
pub use style::StyleConfig;
