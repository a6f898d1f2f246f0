mod crayola;
mod runner;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use gogol_core::{load_sheet_file, GogolError, ImageCache, Sequence, Sprite};

use crate::crayola::Crayola;

#[derive(Parser, Debug)]
#[command(name = "gogol_demo", about = "Tile an animated sprite sequence across a window")]
struct Args {
    /// Window title.
    #[arg(long, default_value = "crayola")]
    title: String,

    /// Sprite sheet image (PNG or BMP, RGBA).
    #[arg(long, default_value = "images/crayola.png")]
    image: PathBuf,

    #[arg(long, default_value_t = 16)]
    clip_width: u32,

    #[arg(long, default_value_t = 16)]
    clip_height: u32,

    /// First frame; negative values count from the end.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    from: isize,

    /// Last frame, inclusive; negative values count from the end.
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    to: isize,

    /// Frames per second; negative plays backwards.
    #[arg(long, default_value_t = 7.0, allow_hyphen_values = true)]
    speed: f64,

    /// Initial zoom factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Start in borderless full screen.
    #[arg(long)]
    full_screen: bool,

    /// JSON sheet file; replaces --image, clip size, range and speed.
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Sequence to play from the sheet. Defaults to the first by name.
    #[arg(long, requires = "sheet")]
    sequence: Option<String>,
}

fn build_sequence(args: &Args, cache: &mut ImageCache) -> Result<Sequence, GogolError> {
    let Some(sheet_path) = &args.sheet else {
        let image = cache.load(&args.image)?;
        let sprite = Arc::new(Sprite::new(image, args.clip_width, args.clip_height)?);
        log::info!(
            "Loaded {} clips from {}",
            sprite.len(),
            args.image.display()
        );
        return Ok(sprite.sequence(args.from, args.to)?.with_speed(args.speed));
    };

    let mut sheet = load_sheet_file(sheet_path)?.build(cache)?;
    let name = match &args.sequence {
        Some(name) => name.clone(),
        None => sheet.sequences.keys().next().cloned().unwrap_or_default(),
    };
    log::info!("Playing sequence '{name}' from {}", sheet_path.display());
    sheet.sequences.remove(&name).ok_or_else(|| GogolError::Sheet {
        path: sheet_path.clone(),
        reason: format!("no sequence named '{name}'"),
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut cache = ImageCache::new();
    let sequence = match build_sequence(&args, &mut cache) {
        Ok(sequence) => sequence,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let handler = Crayola::new(args.title, sequence, args.scale, args.full_screen);
    if let Err(err) = runner::run(handler) {
        log::error!("Event loop failed: {err}");
        std::process::exit(1);
    }
}
