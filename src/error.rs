//! Error types for quote_card.

use std::path::PathBuf;

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while painting or exporting a card.
#[derive(Debug, Error)]
pub enum RenderError {
	/// Canvas dimensions that tiny-skia cannot allocate.
	#[error("Invalid canvas dimensions: width={width}, height={height}")]
	InvalidDimensions { width: u32, height: u32 },

	/// A colour reached the raster backend that it cannot parse.
	#[error("Failed to parse color: {0}")]
	Color(String),

	/// Text could not be shaped or measured with the current font.
	#[error("Text measurement failed for font {font}: {reason}")]
	Measure { font: String, reason: String },

	#[error("PNG encoding error: {0}")]
	Png(String),

	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Problems with the user's settings, reported before any drawing happens.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("`{field}` is invalid: {reason}")]
	Invalid { field: &'static str, reason: String },

	#[error("Unknown {kind} `{value}`, expected one of: {expected}")]
	UnknownVariant { kind: &'static str, value: String, expected: &'static str },

	#[error("Platform `{0}` has no logo configured under [logos]")]
	UnknownPlatform(String),

	#[error("No colour preset named `{0}` under [presets]")]
	UnknownPreset(String),
}

impl ConfigError {
	pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::Invalid { field, reason: reason.into() }
	}
}

/// Failure to load an optional image asset. Callers treat it as "not ready".
#[derive(Debug, Error)]
pub enum AssetError {
	#[error("Failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Image(#[from] image::ImageError),

	#[error(transparent)]
	Svg(#[from] usvg::Error),

	#[error("Image {path} has zero size")]
	Empty { path: PathBuf },
}
