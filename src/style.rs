//! Everything a render needs to know about how the card should look.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
	color::{parse_css_color, resolve_color},
	error::ConfigError,
};

/// Weight used for families missing from [`FONT_WEIGHTS`].
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// Families whose regular cut is too heavy for body text get a lighter weight.
pub const FONT_WEIGHTS: &[(&str, u16)] = &[("Noto Serif KR", 300), ("Noto Sans KR", 200), ("Pretendard", 200), ("KoPub Batang", 300)];

pub fn font_weight_for(family: &str) -> u16 {
	FONT_WEIGHTS.iter().find(|(name, _)| *name == family).map_or(DEFAULT_FONT_WEIGHT, |(_, weight)| *weight)
}

/// Output size preset.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AspectRatio {
	#[default]
	#[serde(rename = "1:1")]
	Square,
	#[serde(rename = "4:5")]
	Portrait,
	#[serde(rename = "16:9")]
	Landscape,
}

impl AspectRatio {
	pub fn dimensions(self) -> (u32, u32) {
		match self {
			Self::Square => (1080, 1080),
			Self::Portrait => (1080, 1350),
			Self::Landscape => (1920, 1080),
		}
	}
}

impl fmt::Display for AspectRatio {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Square => "1:1",
			Self::Portrait => "4:5",
			Self::Landscape => "16:9",
		})
	}
}

impl FromStr for AspectRatio {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"1:1" => Ok(Self::Square),
			"4:5" => Ok(Self::Portrait),
			"16:9" => Ok(Self::Landscape),
			other => Err(ConfigError::UnknownVariant {
				kind: "aspect ratio",
				value: other.to_owned(),
				expected: "1:1, 4:5, 16:9",
			}),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
	Left,
	Center,
	Right,
	#[default]
	Justify,
}

impl FromStr for Align {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"left" => Ok(Self::Left),
			"center" => Ok(Self::Center),
			"right" => Ok(Self::Right),
			"justify" => Ok(Self::Justify),
			other => Err(ConfigError::UnknownVariant {
				kind: "alignment",
				value: other.to_owned(),
				expected: "left, center, right, justify",
			}),
		}
	}
}

/// Wrapping granularity.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakMode {
	#[default]
	Word,
	Char,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
	Solid,
	#[default]
	Gradient,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum GradientDirection {
	#[serde(rename = "to top")]
	ToTop,
	#[serde(rename = "to bottom")]
	ToBottom,
	#[serde(rename = "to left")]
	ToLeft,
	#[serde(rename = "to right")]
	ToRight,
	#[serde(rename = "to top left")]
	ToTopLeft,
	#[serde(rename = "to top right")]
	ToTopRight,
	#[serde(rename = "to bottom left")]
	ToBottomLeft,
	#[default]
	#[serde(rename = "to bottom right")]
	ToBottomRight,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
	#[default]
	Cover,
	Contain,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum VerticalAnchor {
	Top,
	#[default]
	Middle,
	Bottom,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HorizontalAnchor {
	Left,
	#[default]
	Center,
	Right,
}

/// Where a background image sits inside the leftover space, written `"<vertical>-<horizontal>"`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageAnchor {
	pub vertical: VerticalAnchor,
	pub horizontal: HorizontalAnchor,
}

impl FromStr for ImageAnchor {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let unknown = || ConfigError::UnknownVariant {
			kind: "image anchor",
			value: s.to_owned(),
			expected: "{top,middle,bottom}-{left,center,right}",
		};
		let (v, h) = s.split_once('-').ok_or_else(unknown)?;
		let vertical = match v {
			"top" => VerticalAnchor::Top,
			"middle" => VerticalAnchor::Middle,
			"bottom" => VerticalAnchor::Bottom,
			_ => return Err(unknown()),
		};
		let horizontal = match h {
			"left" => HorizontalAnchor::Left,
			"center" => HorizontalAnchor::Center,
			"right" => HorizontalAnchor::Right,
			_ => return Err(unknown()),
		};
		Ok(Self { vertical, horizontal })
	}
}

impl TryFrom<String> for ImageAnchor {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<ImageAnchor> for String {
	fn from(anchor: ImageAnchor) -> Self {
		let v = match anchor.vertical {
			VerticalAnchor::Top => "top",
			VerticalAnchor::Middle => "middle",
			VerticalAnchor::Bottom => "bottom",
		};
		let h = match anchor.horizontal {
			HorizontalAnchor::Left => "left",
			HorizontalAnchor::Center => "center",
			HorizontalAnchor::Right => "right",
		};
		format!("{v}-{h}")
	}
}

/// Typography of the author/title line.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FooterFont {
	pub family: String,
	pub regular_weight: u16,
	pub bold_weight: u16,
}

impl Default for FooterFont {
	fn default() -> Self {
		Self {
			family: "Pretendard".into(),
			regular_weight: 200,
			bold_weight: 400,
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BackgroundStyle {
	pub mode: BackgroundMode,
	pub color: String,
	pub gradient_start: String,
	pub gradient_end: String,
	pub gradient_direction: GradientDirection,
	pub image: Option<PathBuf>,
	pub image_fit: ImageFit,
	pub image_anchor: ImageAnchor,
	/// Percent of the fitted size.
	pub image_scale: f32,
	/// Negative lightens, positive darkens, in percent.
	pub overlay: i32,
}

impl Default for BackgroundStyle {
	fn default() -> Self {
		Self {
			mode: BackgroundMode::default(),
			color: "#E6E6FA".into(),
			gradient_start: "#ec4447".into(),
			gradient_end: "#8c5af2".into(),
			gradient_direction: GradientDirection::default(),
			image: None,
			image_fit: ImageFit::default(),
			image_anchor: ImageAnchor::default(),
			image_scale: 100.0,
			overlay: 0,
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LogoStyle {
	/// Key into the `[logos]` table; no badge when unset.
	pub platform: Option<String>,
	/// Badge diameter in pixels.
	pub size: f32,
}

impl Default for LogoStyle {
	fn default() -> Self {
		Self { platform: None, size: 100.0 }
	}
}

/// The words on the card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardText {
	pub quote: String,
	pub author: String,
	pub title: String,
}

/// Complete, self-contained description of one card.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct StyleConfig {
	pub ratio: AspectRatio,
	pub font_family: String,
	pub font_size: f32,
	pub line_height: f32,
	pub paragraph_spacing: f32,
	pub padding: f32,
	pub align: Align,
	pub line_break: BreakMode,
	pub indentation: bool,
	pub text_color: String,
	pub footer: FooterFont,
	pub background: BackgroundStyle,
	pub logo: LogoStyle,
	#[serde(skip)]
	pub text: CardText,
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self {
			ratio: AspectRatio::default(),
			font_family: "Noto Serif KR".into(),
			font_size: 40.0,
			line_height: 1.6,
			paragraph_spacing: 20.0,
			padding: 100.0,
			align: Align::default(),
			line_break: BreakMode::default(),
			indentation: false,
			text_color: "#ffffff".into(),
			footer: FooterFont::default(),
			background: BackgroundStyle::default(),
			logo: LogoStyle::default(),
			text: CardText::default(),
		}
	}
}

impl StyleConfig {
	pub fn font_weight(&self) -> u16 {
		font_weight_for(&self.font_family)
	}

	/// Reject settings the composers cannot lay out on a canvas of this ratio.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.validate_for(self.ratio.dimensions().0)
	}

	/// Like [`validate`](Self::validate), with padding checked against a canvas `width` pixels wide.
	pub fn validate_for(&self, width: u32) -> Result<(), ConfigError> {
		positive("font_size", self.font_size)?;
		positive("line_height", self.line_height)?;
		positive("background.image_scale", self.background.image_scale)?;
		positive("logo.size", self.logo.size)?;
		if !(self.paragraph_spacing.is_finite() && self.paragraph_spacing >= 0.0) {
			return Err(ConfigError::invalid("paragraph_spacing", format!("must be zero or more, got {}", self.paragraph_spacing)));
		}

		if !(self.padding.is_finite() && self.padding >= 0.0 && self.padding * 2.0 < width as f32) {
			return Err(ConfigError::invalid("padding", format!("must leave room for text on a {width}px wide canvas, got {}", self.padding)));
		}
		if !(-100..=100).contains(&self.background.overlay) {
			return Err(ConfigError::invalid("background.overlay", format!("must be within -100..=100, got {}", self.background.overlay)));
		}
		if self.font_family.trim().is_empty() {
			return Err(ConfigError::invalid("font_family", "must not be empty"));
		}
		if self.footer.family.trim().is_empty() {
			return Err(ConfigError::invalid("footer.family", "must not be empty"));
		}

		for (field, value) in [
			("text_color", &self.text_color),
			("background.color", &self.background.color),
			("background.gradient_start", &self.background.gradient_start),
			("background.gradient_end", &self.background.gradient_end),
		] {
			let resolved = resolve_color(value).to_string();
			parse_css_color(&resolved).map_err(|reason| ConfigError::invalid(field, reason))?;
		}
		Ok(())
	}
}

/// A named background + text colour combination, stored under `[presets.<name>]`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ColorPreset {
	pub mode: BackgroundMode,
	/// Solid colour, or the gradient's first stop.
	pub start: String,
	/// Gradient's last stop; unused for solid presets.
	#[serde(default)]
	pub end: String,
	pub text: String,
}

impl ColorPreset {
	/// Switch `style` to this preset's background mode and colours. Other settings are kept.
	pub fn apply(&self, style: &mut StyleConfig) {
		style.background.mode = self.mode;
		style.text_color = self.text.clone();
		match self.mode {
			BackgroundMode::Solid => style.background.color = self.start.clone(),
			BackgroundMode::Gradient => {
				style.background.gradient_start = self.start.clone();
				style.background.gradient_end = self.end.clone();
			}
		}
	}
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(ConfigError::invalid(field, format!("must be a positive number, got {value}")))
	}
}
