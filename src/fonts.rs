//! Font database setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Where to look for font faces.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FontSources {
	/// Scan the platform's installed fonts.
	pub system: bool,
	pub dirs: Vec<PathBuf>,
	pub files: Vec<PathBuf>,
}

impl Default for FontSources {
	fn default() -> Self {
		Self {
			system: true,
			dirs: Vec::new(),
			files: Vec::new(),
		}
	}
}

impl FontSources {
	/// No fonts at all. Only empty strings can be measured or drawn; any other text is a
	/// [`RenderError::Measure`](crate::error::RenderError::Measure).
	pub fn none() -> Self {
		Self {
			system: false,
			..Self::default()
		}
	}

	/// Build the database. Unreadable font files are skipped with a warning.
	pub fn load(&self) -> fontdb::Database {
		let mut db = fontdb::Database::new();
		if self.system {
			db.load_system_fonts();

			// Fonts bundled next to the working directory (dev checkouts)
			if let Some(assets) = std::env::current_dir().ok().map(|p| p.join("assets")).filter(|p| p.is_dir()) {
				db.load_fonts_dir(&assets);
			}
		}
		for dir in &self.dirs {
			db.load_fonts_dir(dir);
		}
		for file in &self.files {
			if let Err(e) = db.load_font_file(file) {
				warn!(path = %file.display(), error = %e, "failed to load font file");
			}
		}

		debug!(faces = db.len(), "font database ready");
		db
	}
}
