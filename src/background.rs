//! Background painting: colour or gradient, optional image, optional overlay.

use tracing::debug;

use crate::{
	assets::RasterImage,
	color::{ResolvedColor, resolve_color},
	error::RenderResult,
	style::{BackgroundMode, BackgroundStyle, GradientDirection, HorizontalAnchor, ImageAnchor, ImageFit, VerticalAnchor},
	surface::{Fill, LinearGradient, Rect, RenderTarget},
};

/// Gradient line `(x0, y0, x1, y1)` spanning a `width` x `height` canvas in `direction`.
pub fn gradient_endpoints(direction: GradientDirection, width: f32, height: f32) -> (f32, f32, f32, f32) {
	match direction {
		GradientDirection::ToBottom => (0.0, 0.0, 0.0, height),
		GradientDirection::ToTop => (0.0, height, 0.0, 0.0),
		GradientDirection::ToRight => (0.0, 0.0, width, 0.0),
		GradientDirection::ToLeft => (width, 0.0, 0.0, 0.0),
		GradientDirection::ToBottomRight => (0.0, 0.0, width, height),
		GradientDirection::ToTopRight => (0.0, height, width, 0.0),
		GradientDirection::ToBottomLeft => (width, 0.0, 0.0, height),
		GradientDirection::ToTopLeft => (width, height, 0.0, 0.0),
	}
}

/// Where an `image_w` x `image_h` image lands on the canvas.
///
/// `Cover` fills the canvas and lets the image overflow on one axis, `Contain` fits it inside.
/// The fitted size is then scaled by `scale_percent / 100` and placed by `anchor` within the
/// leftover space, which is negative when the image overflows.
pub fn image_destination(canvas: (f32, f32), image: (f32, f32), fit: ImageFit, scale_percent: f32, anchor: ImageAnchor) -> Rect {
	let (width, height) = canvas;
	let image_ratio = image.0 / image.1;
	let wider = image_ratio > width / height;

	let (mut dw, mut dh) = match (fit, wider) {
		(ImageFit::Cover, true) | (ImageFit::Contain, false) => (height * image_ratio, height),
		(ImageFit::Cover, false) | (ImageFit::Contain, true) => (width, width / image_ratio),
	};
	let scale = scale_percent / 100.0;
	dw *= scale;
	dh *= scale;

	let x = match anchor.horizontal {
		HorizontalAnchor::Left => 0.0,
		HorizontalAnchor::Center => (width - dw) / 2.0,
		HorizontalAnchor::Right => width - dw,
	};
	let y = match anchor.vertical {
		VerticalAnchor::Top => 0.0,
		VerticalAnchor::Middle => (height - dh) / 2.0,
		VerticalAnchor::Bottom => height - dh,
	};
	Rect::new(x, y, dw, dh)
}

/// Fill the whole canvas, then draw the background image and the overlay on top.
pub fn paint_background<T: RenderTarget + ?Sized>(surface: &mut T, width: f32, height: f32, style: &BackgroundStyle, image: Option<&RasterImage>) -> RenderResult<()> {
	surface.set_global_alpha(1.0);
	let full = Rect::new(0.0, 0.0, width, height);

	let fill = match style.mode {
		BackgroundMode::Solid => Fill::Color(resolve_color(&style.color)),
		BackgroundMode::Gradient => {
			let (x0, y0, x1, y1) = gradient_endpoints(style.gradient_direction, width, height);
			let mut gradient = LinearGradient::new(x0, y0, x1, y1);
			gradient.add_color_stop(0.0, resolve_color(&style.gradient_start));
			gradient.add_color_stop(1.0, resolve_color(&style.gradient_end));
			Fill::Linear(gradient)
		}
	};
	surface.set_fill(fill);
	surface.fill_rect(full)?;

	if let Some(image) = image.filter(|image| image.is_ready()) {
		let (iw, ih) = (image.width() as f32, image.height() as f32);
		let dst = image_destination((width, height), (iw, ih), style.image_fit, style.image_scale, style.image_anchor);
		debug!(?dst, fit = ?style.image_fit, "background image");
		surface.draw_image(image, Rect::new(0.0, 0.0, iw, ih), dst);

		// shades the image only; plain fills are never tinted
		if style.overlay != 0 {
			let shade = if style.overlay < 0 { 255 } else { 0 };
			surface.save();
			surface.set_fill(Fill::Color(ResolvedColor::Rgba {
				r: shade,
				g: shade,
				b: shade,
				a: style.overlay.unsigned_abs() as f32 / 100.0,
			}));
			surface.fill_rect(full)?;
			surface.restore();
		}
	}
	Ok(())
}
