use std::path::PathBuf;

use clap::Parser;

mod app;
mod audio;
mod config;
mod library;
mod player;
mod playlist;
mod runtime;
mod ui;

#[derive(Debug, Parser)]
#[command(name = "tunedex")]
#[command(version, about = "Play the audio files of one folder from the terminal")]
pub struct Cli {
    /// Folder to load (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Start with shuffle enabled
    #[arg(long)]
    pub shuffle: bool,

    /// Initial volume between 0.0 and 1.0
    #[arg(long, value_parser = parse_volume)]
    pub volume: Option<f32>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is not between 0.0 and 1.0"))
    }
}

fn main() -> anyhow::Result<()> {
    runtime::run(Cli::parse())
}
