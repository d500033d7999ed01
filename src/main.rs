use clap::Parser;
use epd_convert::{convert_file, profile, BackgroundPolicy};
use image::Rgb;
use std::error::Error;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
struct Args {
    file: PathBuf,
    out_file: PathBuf,
    /// Panel model to encode for.
    #[clap(long, default_value = "TC_P74_230")]
    panel: String,
    /// Number of 90 degree rotations applied before resizing.
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    rotate: i32,
    /// Fixed background gray value; defaults to the median of the resized
    /// image when absent.
    #[clap(long)]
    background: Option<u8>,
    #[clap(long)]
    dithered_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(LevelFilter::INFO).init();
    let args = Args::parse();

    let panel = profile::by_name(&args.panel)?;
    let background = match args.background {
        Some(v) => BackgroundPolicy::Fixed(Rgb::from([v, v, v])),
        None => BackgroundPolicy::Median,
    };
    convert_file(
        &args.file,
        &args.out_file,
        panel,
        background,
        args.rotate,
        args.dithered_file.as_deref(),
    )?;
    Ok(())
}
