//! Info command: face capabilities and the active defaults

use anyhow::Result;
use fontpix::{config, Engine, FaceConfig, SkrifaEngine};

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let defaults = FaceConfig::global();

    println!("Fontpix v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Engine: {}", SkrifaEngine::new().name());
    println!();
    println!("Defaults:");
    println!("  Size:       {}pt  ({})", defaults.points, config::ENV_POINTS);
    println!("  Resolution: {}dpi ({})", defaults.dpi, config::ENV_DPI);
    println!("  Monochrome: {}  ({})", defaults.monochrome, config::ENV_MONO);

    if let Some(path) = &args.font_file {
        let (library, face) = super::open_face(path, args.face_index, &defaults)?;
        println!();
        println!("Face {} of {}:", face.face_index(), path.display());
        println!("  Color glyphs: {}", if face.has_color()? { "yes" } else { "no" });
        face.done()?;
        library.done()?;
    }

    println!();
    println!("Output formats:");
    println!("  png               - PNG (RGBA)");
    Ok(())
}
