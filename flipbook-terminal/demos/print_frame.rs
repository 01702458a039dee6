/// Example: Print the strip transforms of a page turn at a given progress
///
/// Usage: cargo run --example print_frame -- [progress] [left|right]

use flipbook_core::{Face, FlipConfig, FlipDirection, PageFlip};
use std::env;
use std::io;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let progress = match args.get(1) {
        Some(arg) => arg.parse::<f64>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid progress {:?}: {}", arg, e),
            )
        })?,
        None => 0.5,
    };
    let direction = match args.get(2).map(String::as_str) {
        Some("right") => FlipDirection::Right,
        _ => FlipDirection::Left,
    };

    let flip = PageFlip::new(FlipConfig::default())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    for face in [Face::Front, Face::Back] {
        let frame = flip.polygons(progress, direction, face);
        println!("{:?} face at {:.2} ({:?})", face, frame.progress, direction);
        for polygon in &frame.polygons {
            println!(
                "  #{} z={} visible={} x={:.1}..{:.1} transform: {}",
                polygon.index,
                polygon.z_index,
                polygon.visible,
                polygon.x0,
                polygon.x1,
                polygon.transform()
            );
        }
        match frame.bounds() {
            Some((min_x, max_x)) => println!("  bounds {:.1}..{:.1}", min_x, max_x),
            None => println!("  bounds unavailable (degenerate projection)"),
        }
    }

    Ok(())
}
