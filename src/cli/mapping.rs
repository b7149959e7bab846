//! Photo mapping listing (`bingo mapping`).

use std::path::PathBuf;

use anyhow::Result;
use bingocard::ImageMap;
use clap::Args;

/// Arguments for `bingo mapping`.
#[derive(Args, Debug)]
pub struct MappingArgs {
    /// Folder holding exactly 25 JPEG photos.
    #[arg(default_value = "media")]
    pub media: PathBuf,
}

/// Execute `bingo mapping`.
pub fn handle(args: MappingArgs) -> Result<()> {
    let map = ImageMap::load(&args.media)?;
    print_mapping(&map);
    Ok(())
}

pub fn print_mapping(map: &ImageMap) {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("IMAGE MAPPING (Number -> Filename)");
    println!("{}", rule);
    for (value, path) in map.iter() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        println!("{:2} -> {}", value, name);
    }
    println!("{}", rule);
}
