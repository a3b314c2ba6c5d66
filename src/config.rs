use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr as _};
use rand::seq::IndexedRandom as _;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::{
	error::ConfigError,
	fonts::FontSources,
	style::{ColorPreset, StyleConfig},
};

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
const LAST_STYLE_FILE: &str = "last_style.json";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub style: StyleConfig,
	pub fonts: FontSources,
	/// Platform name -> logo image.
	pub logos: BTreeMap<String, PathBuf>,
	pub presets: BTreeMap<String, ColorPreset>,
	pub quotes: Vec<Quote>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Quote {
	pub text: String,
	pub author: Option<String>,
	pub title: Option<String>,
}

impl<'de> Deserialize<'de> for Quote {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>, {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum QuoteHelper {
			String(String),
			Structured { text: String, author: Option<String>, title: Option<String> },
		}

		let helper = QuoteHelper::deserialize(deserializer)?;
		Ok(match helper {
			QuoteHelper::String(text) => Quote { text, ..Quote::default() },
			QuoteHelper::Structured { text, author, title } => Quote { text, author, title },
		})
	}
}

impl AppConfig {
	/// Layer `QUOTE_CARD_*` environment variables over `path`, or over the XDG config
	/// locations when no path is given.
	pub fn read(path: Option<&Path>) -> Result<Self> {
		let mut builder = config::Config::builder().add_source(config::Environment::with_prefix("QUOTE_CARD").separator("__"));

		match path {
			Some(path) => {
				builder = builder.add_source(config::File::from(path).required(true));
				let raw = builder.build().wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
				raw.try_deserialize().wrap_err_with(|| format!("Config {} is invalid", path.display()))
			}
			None => {
				let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME);
				if let Some(xdg_conf_dir) = xdg_dirs.get_config_home().as_deref().and_then(Path::parent) {
					let locations = [xdg_conf_dir.join(APP_NAME), xdg_conf_dir.join(APP_NAME).join("config")];
					for location in locations.iter() {
						debug!(location = %location.display(), "config candidate");
						builder = builder.add_source(config::File::with_name(&location.to_string_lossy()).required(false));
					}
				}
				let raw: config::Config = builder.build()?;

				raw.try_deserialize().wrap_err("Config file is invalid")
			}
		}
	}

	/// Image registered for `platform` under `[logos]`.
	pub fn logo_path(&self, platform: &str) -> std::result::Result<&Path, ConfigError> {
		self.logos.get(platform).map(PathBuf::as_path).ok_or_else(|| ConfigError::UnknownPlatform(platform.to_owned()))
	}

	pub fn preset(&self, name: &str) -> std::result::Result<&ColorPreset, ConfigError> {
		self.presets.get(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_owned()))
	}

	pub fn random_quote(&self) -> Option<&Quote> {
		self.quotes.choose(&mut rand::rng())
	}
}

/// Where the style of the last successful render is kept.
pub fn last_style_path() -> Option<PathBuf> {
	xdg::BaseDirectories::with_prefix(APP_NAME).get_state_home().map(|dir| dir.join(LAST_STYLE_FILE))
}

pub fn save_last_style(path: &Path, style: &StyleConfig) -> Result<()> {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	let json = serde_json::to_string_pretty(style)?;
	std::fs::write(path, json).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

pub fn load_last_style(path: &Path) -> Result<StyleConfig> {
	let content = std::fs::read_to_string(path).wrap_err_with(|| format!("No previous style found at {}", path.display()))?;
	serde_json::from_str(&content).wrap_err("Stored style is corrupt")
}
