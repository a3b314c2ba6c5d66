use std::{io::Write as _, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr as _, eyre};
use quote_card::{
	config::{self, AppConfig, Quote},
	render::{Scene, render_card},
	style::{AspectRatio, CardText},
	typography::{to_curly_quotes, to_straight_quotes},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quote_card")]
#[command(about = "Render a quote onto a shareable card image")]
struct Args {
	/// Quote text, paragraphs separated by newlines. If not provided, a random quote from the config is used.
	quote: Option<String>,
	#[arg(long)]
	author: Option<String>,
	#[arg(long)]
	title: Option<String>,
	/// One of 1:1, 4:5, 16:9
	#[arg(long)]
	ratio: Option<AspectRatio>,
	/// Colour preset, by its name under `[presets]`
	#[arg(long)]
	preset: Option<String>,
	/// Logo badge, by its name under `[logos]`
	#[arg(long)]
	platform: Option<String>,
	#[arg(long)]
	background_image: Option<PathBuf>,
	/// Turn straight quotation marks in the quote into typographic ones
	#[arg(long, conflicts_with = "straight_quotes")]
	curly_quotes: bool,
	/// Turn typographic quotation marks in the quote back into straight ones
	#[arg(long)]
	straight_quotes: bool,
	#[arg(short, long)]
	config: Option<PathBuf>,
	/// Where to write the PNG; `-` for stdout
	#[arg(short, long, default_value = "quote_card.png")]
	output: PathBuf,
	/// Start from the style of the previous render instead of the config's
	#[arg(long)]
	last: bool,
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	init_tracing(args.verbose);
	run(args)
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(args: Args) -> Result<()> {
	let app_config = AppConfig::read(args.config.as_deref())?;
	let last_style_path = config::last_style_path();

	let mut style = if args.last {
		let path = last_style_path.as_deref().ok_or_else(|| eyre!("No state directory to read the previous style from"))?;
		config::load_last_style(path)?
	} else {
		app_config.style.clone()
	};
	if let Some(name) = args.preset.as_deref() {
		app_config.preset(name)?.apply(&mut style);
	}
	if let Some(ratio) = args.ratio {
		style.ratio = ratio;
	}
	if args.platform.is_some() {
		style.logo.platform = args.platform.clone();
	}
	if args.background_image.is_some() {
		style.background.image = args.background_image.clone();
	}

	let quote = match args.quote {
		Some(text) => Quote {
			text,
			author: args.author,
			title: args.title,
		},
		None => {
			let picked = app_config.random_quote().ok_or_else(|| {
				eyre!(
					"No quote provided and none configured.\n\
					Pass one as an argument: quote_card \"<text>\""
				)
			})?;
			Quote {
				text: picked.text.clone(),
				author: args.author.or_else(|| picked.author.clone()),
				title: args.title.or_else(|| picked.title.clone()),
			}
		}
	};
	info!(quote = ?quote.text, author = ?quote.author, title = ?quote.title, "selected quote");

	style.text = CardText {
		quote: match (args.curly_quotes, args.straight_quotes) {
			(true, _) => to_curly_quotes(&quote.text),
			(_, true) => to_straight_quotes(&quote.text),
			_ => quote.text,
		},
		author: quote.author.unwrap_or_default(),
		title: quote.title.unwrap_or_default(),
	};

	let logo = match style.logo.platform.as_deref() {
		Some(platform) => Some(app_config.logo_path(platform)?),
		None => None,
	};
	let scene = Scene::load(style, logo);
	let canvas = render_card(&scene, app_config.fonts.load())?;
	let png = canvas.to_png()?;

	if args.output.as_os_str() == "-" {
		std::io::stdout().lock().write_all(&png).wrap_err("Failed to write PNG to stdout")?;
	} else {
		std::fs::write(&args.output, &png).wrap_err_with(|| format!("Failed to write {}", args.output.display()))?;
		info!(path = %args.output.display(), bytes = png.len(), ratio = %scene.style.ratio, "card written");
	}

	// Remember the style for `--last`
	if let Some(path) = last_style_path {
		if let Err(e) = config::save_last_style(&path, &scene.style) {
			warn!(path = %path.display(), error = %e, "failed to store style");
		}
	}

	Ok(())
}
