//! Whole-card rendering.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
	assets::{RasterImage, load_optional},
	background::paint_background,
	canvas::Canvas,
	content::paint_content,
	error::RenderResult,
	style::StyleConfig,
	surface::RenderTarget,
};

/// A style together with the images it refers to.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub style: StyleConfig,
	/// Decoded `style.background.image`, if it loaded.
	pub background: Option<RasterImage>,
	pub logo: Option<RasterImage>,
}

impl Scene {
	pub fn new(style: StyleConfig) -> Self {
		Self {
			style,
			background: None,
			logo: None,
		}
	}

	/// Decode the background image named by the style and the given logo. Missing or broken
	/// files leave the slot empty.
	pub fn load(style: StyleConfig, logo: Option<&Path>) -> Self {
		let background = load_optional(style.background.image.as_deref(), "background");
		let logo = load_optional(logo, "logo");
		Self { style, background, logo }
	}
}

/// Repaint `target` from scratch with `scene`.
///
/// The style is validated first; on a configuration error the target is left untouched.
#[instrument(skip_all, fields(width = target.width(), height = target.height()))]
pub fn render<T: RenderTarget + ?Sized>(target: &mut T, scene: &Scene) -> RenderResult<()> {
	scene.style.validate_for(target.width())?;
	let (width, height) = (target.width() as f32, target.height() as f32);

	target.clear();
	paint_background(target, width, height, &scene.style.background, scene.background.as_ref())?;
	paint_content(target, width, height, &scene.style, scene.logo.as_ref())?;

	info!("card rendered");
	Ok(())
}

/// Allocate a canvas sized by the scene's aspect ratio and render into it.
pub fn render_card(scene: &Scene, fonts: fontdb::Database) -> RenderResult<Canvas> {
	let (width, height) = scene.style.ratio.dimensions();
	let mut canvas = Canvas::new(width, height, fonts)?;
	render(&mut canvas, scene)?;
	Ok(canvas)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		error::{ConfigError, RenderError},
		style::CardText,
		testing::{Op, RecordingSurface},
	};

	fn scene() -> Scene {
		let mut style = StyleConfig::default();
		style.text = CardText {
			quote: "Stay hungry,\nstay foolish".into(),
			author: "Steve Jobs".into(),
			title: "Stanford".into(),
		};
		style.background.overlay = 20;
		Scene::new(style)
	}

	#[test]
	fn background_comes_before_text() {
		let mut surface = RecordingSurface::new(1080, 1080);
		render(&mut surface, &scene()).unwrap();

		assert_eq!(surface.ops[0], Op::Clear);
		assert!(matches!(surface.ops[1], Op::FillRect { .. }));
		let first_text = surface.ops.iter().position(|op| matches!(op, Op::FillText { .. })).unwrap();
		let last_rect = surface.ops.iter().rposition(|op| matches!(op, Op::FillRect { .. })).unwrap();
		assert!(last_rect < first_text);
	}

	#[test]
	fn rendering_twice_replays_the_same_calls() {
		let mut surface = RecordingSurface::new(1080, 1350);
		let scene = scene();
		render(&mut surface, &scene).unwrap();
		let first = surface.ops.clone();
		render(&mut surface, &scene).unwrap();
		assert_eq!(surface.ops, first);
	}

	#[test]
	fn invalid_style_leaves_target_untouched() {
		let mut surface = RecordingSurface::new(100, 100);
		let mut scene = scene();
		scene.style.font_size = -3.0;
		assert!(matches!(render(&mut surface, &scene), Err(RenderError::Config(ConfigError::Invalid { field: "font_size", .. }))));
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn padding_is_checked_against_the_target() {
		// default 100px padding on both sides leaves nothing of a 150px target
		let mut surface = RecordingSurface::new(150, 150);
		assert!(matches!(render(&mut surface, &scene()), Err(RenderError::Config(ConfigError::Invalid { field: "padding", .. }))));
		assert!(surface.ops.is_empty());

		let mut surface = RecordingSurface::new(201, 201);
		render(&mut surface, &Scene::new(StyleConfig::default())).unwrap();
	}

	#[test]
	fn missing_assets_are_skipped() {
		let mut style = StyleConfig::default();
		style.background.image = Some("/no/such/background.jpg".into());
		let scene = Scene::load(style, Some(Path::new("/no/such/logo.png")));
		assert!(scene.background.is_none());
		assert!(scene.logo.is_none());
	}
}
