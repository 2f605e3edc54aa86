mod renderer;
mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use dimscale_core::{Responsive, ScaleConfig};
use log::info;

use crate::terminal::TerminalHost;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: dimscale [config.json]");
        std::process::exit(1);
    }

    let config = match args.get(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            let data = std::fs::read(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            ScaleConfig::from_json(&data)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ScaleConfig::default(),
    };
    info!(
        "reference {}x{}, font cap {}, tablet side {}",
        config.reference_width,
        config.reference_height,
        config.font_scale_cap,
        config.tablet_min_side
    );

    let responsive = Responsive::with_config(TerminalHost::new(), config);
    renderer::render_tui(&responsive)?;
    Ok(())
}
