//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fontpix - render one glyph from a font file
#[derive(Parser, Debug)]
#[command(name = "fontpix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a character and report its metrics
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Describe a font face and the active defaults
    #[command(alias = "i")]
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Character to render
    #[arg(short = 'c', long = "char")]
    pub ch: char,

    /// Character size in points (default: FONTPIX_PT or 12)
    #[arg(short = 's', long = "size")]
    pub size: Option<f32>,

    /// Resolution in dots per inch (default: FONTPIX_DPI or 72)
    #[arg(short = 'r', long = "dpi")]
    pub dpi: Option<u32>,

    /// Render 1-bit instead of anti-aliased
    #[arg(short = 'm', long = "mono")]
    pub mono: bool,

    /// Write the glyph image here; the extension picks the format (png)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print metrics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file to inspect; without one only the defaults are shown
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args() {
        let cli = Cli::try_parse_from([
            "fontpix", "render", "-f", "font.ttf", "--char", "g", "--size", "48", "--mono", "-o",
            "g.png",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.font_file, PathBuf::from("font.ttf"));
        assert_eq!(args.face_index, 0);
        assert_eq!(args.ch, 'g');
        assert_eq!(args.size, Some(48.0));
        assert_eq!(args.dpi, None);
        assert!(args.mono);
        assert_eq!(args.output, Some(PathBuf::from("g.png")));
        assert!(!args.json);
    }

    #[test]
    fn test_render_needs_a_single_character() {
        assert!(Cli::try_parse_from(["fontpix", "render", "-f", "a.ttf", "-c", "ab"]).is_err());
        assert!(Cli::try_parse_from(["fontpix", "render", "-c", "a"]).is_err());
    }

    #[test]
    fn test_info_font_is_optional() {
        let cli = Cli::try_parse_from(["fontpix", "-v", "info"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Info(InfoArgs {
                font_file: None,
                face_index: 0
            })
        ));
    }
}
