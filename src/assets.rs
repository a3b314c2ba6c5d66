//! Decoding of background and logo images.

use std::path::Path;

use tiny_skia::{ColorU8, Pixmap, PixmapRef, Transform};
use tracing::{debug, warn};

use crate::error::AssetError;

/// A decoded image held as premultiplied RGBA, ready to be drawn.
#[derive(Clone, Debug)]
pub struct RasterImage {
	pixmap: Pixmap,
}

impl RasterImage {
	pub fn from_pixmap(pixmap: Pixmap) -> Self {
		Self { pixmap }
	}

	/// Build from straight-alpha RGBA8 rows. `None` when the size does not match the data.
	pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Option<Self> {
		if data.len() != width as usize * height as usize * 4 {
			return None;
		}
		let mut pixmap = Pixmap::new(width, height)?;
		for (dst, src) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
			*dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
		}
		Some(Self { pixmap })
	}

	/// Load a raster (png, jpeg, ...) or `.svg` file.
	pub fn load(path: &Path) -> Result<Self, AssetError> {
		let is_svg = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
		let image = if is_svg { Self::load_svg(path)? } else { Self::load_raster(path)? };
		debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
		Ok(image)
	}

	fn load_raster(path: &Path) -> Result<Self, AssetError> {
		let rgba = image::open(path)?.to_rgba8();
		let (width, height) = rgba.dimensions();
		Self::from_rgba8(width, height, rgba.as_raw()).ok_or_else(|| AssetError::Empty { path: path.to_path_buf() })
	}

	fn load_svg(path: &Path) -> Result<Self, AssetError> {
		let data = std::fs::read(path).map_err(|source| AssetError::Io { path: path.to_path_buf(), source })?;
		let tree = usvg::Tree::from_data(&data, &usvg::Options::default())?;
		let size = tree.size();
		let mut pixmap =
			Pixmap::new(size.width().ceil() as u32, size.height().ceil() as u32).ok_or_else(|| AssetError::Empty { path: path.to_path_buf() })?;
		resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
		Ok(Self { pixmap })
	}

	pub fn width(&self) -> u32 {
		self.pixmap.width()
	}

	pub fn height(&self) -> u32 {
		self.pixmap.height()
	}

	/// Whether the image has decoded content worth drawing.
	pub fn is_ready(&self) -> bool {
		self.width() > 0 && self.height() > 0
	}

	pub fn pixmap(&self) -> PixmapRef<'_> {
		self.pixmap.as_ref()
	}
}

/// Load an optional asset. Failures are logged and the asset is treated as not ready.
pub fn load_optional(path: Option<&Path>, role: &str) -> Option<RasterImage> {
	let path = path?;
	match RasterImage::load(path) {
		Ok(image) if image.is_ready() => Some(image),
		Ok(_) => {
			warn!(role, path = %path.display(), "image has no content, skipping");
			None
		}
		Err(e) => {
			warn!(role, path = %path.display(), error = %e, "image not available, skipping");
			None
		}
	}
}
