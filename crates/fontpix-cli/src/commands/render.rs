//! Render command: one character to a PNG and a metrics report

use anyhow::{Context, Result};
use fontpix::{FaceConfig, GlyphMetrics, RgbaImage};

use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let config = face_config(args, &FaceConfig::global());
    log::info!(
        "Rendering {:?} at {}pt/{}dpi{}",
        args.ch,
        config.points,
        config.dpi,
        if config.monochrome { " mono" } else { "" }
    );

    let (library, face) = super::open_face(&args.font_file, args.face_index, &config)?;
    let (image, metrics) = face
        .glyph(args.ch)
        .with_context(|| format!("rendering {:?}", args.ch))?;

    if let Some(output) = &args.output {
        if image.is_empty() {
            log::warn!("{:?} has no pixels; {} not written", args.ch, output.display());
        } else {
            fontpix_export::save(&image, output)
                .with_context(|| format!("writing {}", output.display()))?;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report(args.ch, &image, &metrics))?);
    } else {
        print_metrics(args.ch, &image, &metrics);
    }

    face.done()?;
    library.done()?;
    Ok(())
}

/// Command-line values over the environment defaults
fn face_config(args: &RenderArgs, defaults: &FaceConfig) -> FaceConfig {
    FaceConfig {
        points: args.size.unwrap_or(defaults.points),
        dpi: args.dpi.unwrap_or(defaults.dpi),
        monochrome: args.mono || defaults.monochrome,
    }
}

fn report(ch: char, image: &RgbaImage, metrics: &GlyphMetrics) -> serde_json::Value {
    serde_json::json!({
        "char": ch.to_string(),
        "code": ch as u32,
        "width": image.width,
        "height": image.height,
        "metrics": metrics,
    })
}

fn print_metrics(ch: char, image: &RgbaImage, m: &GlyphMetrics) {
    println!("Glyph {:?} (U+{:04X})", ch, ch as u32);
    println!("  Image:      {}x{}", image.width, image.height);
    println!("  Bearing:    ({}, {})", m.horizontal_bearing_x, m.horizontal_bearing_y);
    println!("  Advance:    {}", m.advance_width);
    println!("  V bearing:  ({}, {})", m.vertical_bearing_x, m.vertical_bearing_y);
    println!("  V advance:  {}", m.advance_height);
}
