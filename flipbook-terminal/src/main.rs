/// Flipbook Terminal Preview - animated page turn
///
/// Usage: flipbook-terminal [config.json]
///
/// Controls:
///   - A/D / Arrow Keys: Turn forward / backward
///   - Space: Pause
///   - +/-: Speed
///   - Q/ESC: Quit
///
/// Set FLIPBOOK_LOG to a level name (e.g. `debug`) for diagnostics on stderr.

use flipbook_core::{FlipConfig, PageFlip};
use flipbook_terminal::TerminalApp;
use std::env;
use std::fs;
use std::io;
use tracing::Level;

fn init_logging() {
    let level = env::var("FLIPBOOK_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> io::Result<FlipConfig> {
    let Some(path) = path else {
        return Ok(FlipConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Failed to read config {}: {}", path, e),
        )
    })?;
    serde_json::from_str(&text).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse config {}: {}", path, e),
        )
    })
}

fn main() -> io::Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let config = load_config(args.get(1).map(String::as_str))?;
    tracing::info!(?config, "loaded flip configuration");

    let flip = PageFlip::new(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    println!("Starting page turn preview (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(flip)?;
    app.run()?;

    println!("Thank you for using the Flipbook terminal preview!");
    Ok(())
}
