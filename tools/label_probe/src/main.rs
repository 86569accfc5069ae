//! Font discovery and label geometry probe
//!
//! Points the label engine at a content folder, lists the fonts it finds
//! and prints the mesh it would build for a piece of text.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};

use label_text::assets::{ContentSource, DirectoryContent};
use label_text::config::{Config, LabelTextConfig};
use label_text::foundation::logging;
use label_text::labels::LabelTextSystem;
use label_text::render::text::FontRegistry;
use label_text::render::HeadlessResources;

const DEFAULT_CONTENT_ROOT: &str = "Textures";
const DEFAULT_TEXT: &str = "FLOOR LABEL";

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("label_probe")
        .about("Lists discovered fonts and prints the label mesh built for a text")
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Content root containing the Fonts folder")
                .default_value(DEFAULT_CONTENT_ROOT),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Label configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("font")
                .short('f')
                .long("font")
                .value_name("NAME")
                .help("Font to build with (defaults to the registry default)"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("Only list discovered fonts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("vertices")
                .short('v')
                .long("vertices")
                .help("Print every vertex and UV")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("text")
                .value_name("TEXT")
                .help("Label text")
                .default_value(DEFAULT_TEXT),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => LabelTextConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => LabelTextConfig::default(),
    };

    let root = matches
        .get_one::<String>("root")
        .map_or(DEFAULT_CONTENT_ROOT, String::as_str);
    let content = Arc::new(DirectoryContent::new(root));
    if !content.root().is_dir() {
        bail!("Content root {} is not a directory", content.root().display());
    }

    let registry = FontRegistry::new(config, Arc::clone(&content) as Arc<dyn ContentSource>);
    let mut labels = LabelTextSystem::new(registry, HeadlessResources::new());
    let default_font = labels.registry().default_font_name();

    println!("Fonts under {root}:");
    for font in labels.registry().fonts() {
        let marker = if default_font.as_deref() == Some(font.name()) { "*" } else { " " };
        match font.atlas() {
            Some(atlas) => {
                let (columns, rows) = atlas.grid();
                let bytes = content
                    .image_data(atlas.texture_handle())
                    .map_or(0, |image| image.size_bytes());
                println!(
                    " {marker} {:<24} {columns}x{rows} grid, {} characters, {} KiB{}",
                    font.name(),
                    atlas.character_count(),
                    bytes / 1024,
                    if font.preview_texture().is_some() { ", preview" } else { "" }
                );
            }
            None => println!(" {marker} {:<24} (unusable)", font.name()),
        }
    }

    if matches.get_flag("list") {
        return Ok(());
    }

    let text = matches
        .get_one::<String>("text")
        .map_or(DEFAULT_TEXT, String::as_str);
    let font = matches.get_one::<String>("font").map(String::as_str);

    let Some(draw) = labels.request_label_mesh(font, text, None) else {
        bail!("Nothing to draw for {text:?}");
    };

    println!();
    println!("Label {text:?}:");
    println!("  glyphs:    {}", draw.mesh.glyph_count());
    println!("  vertices:  {}", draw.mesh.vertices().len());
    println!("  indices:   {}", draw.mesh.indices().len());
    println!("  width:     {:.2}", draw.width);
    println!("  material:  {:?}", draw.material);

    if matches.get_flag("vertices") {
        for (position, uv) in draw.mesh.vertices().iter().zip(draw.mesh.uvs()) {
            println!(
                "  ({:>7.3}, {:>7.3}, {:>7.3})  uv ({:.4}, {:.4})",
                position[0], position[1], position[2], uv[0], uv[1]
            );
        }
    }

    log::debug!("Probe finished with {} cached mesh(es)", labels.mesh_cache().len());
    Ok(())
}
