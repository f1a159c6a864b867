//! air_kiosk — interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use air_kiosk::app::{run, AppConfig, InputMode};
use hand_cursor::EngineConfig;

#[derive(Debug, Parser)]
#[command(name = "air_kiosk", about = "Touchless kiosk: hover or pinch to order")]
struct Cli {
    /// TOML file with engine settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = InputMode::Mouse)]
    input: InputMode,

    /// Hover time before a panel activates.
    #[arg(long)]
    dwell_ms: Option<u64>,

    /// Minimum time between two activations.
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Do not mirror the camera image horizontally.
    #[arg(long)]
    no_mirror: bool,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,
}

impl Cli {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut cfg = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(v) = self.dwell_ms    { cfg.dwell_ms = v; }
        if let Some(v) = self.cooldown_ms { cfg.cooldown_ms = v; }
        if let Some(v) = self.width       { cfg.screen.width = v; }
        if let Some(v) = self.height      { cfg.screen.height = v; }
        if self.no_mirror                 { cfg.screen.mirror = false; }
        cfg.validate().context("invalid engine configuration")?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("air_kiosk=info,hand_cursor=info")),
        )
        .init();

    let cli = Cli::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Air Kiosk — hover or pinch to place an order        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Built with LeapMotion support");
    #[cfg(not(feature = "leap"))]
    println!("  Mouse simulation only  (use --features leap for hardware)");
    println!();

    let cfg = AppConfig { engine: cli.engine_config()?, input: cli.input };
    run(cfg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "air_kiosk", "--dwell-ms", "1200", "--no-mirror", "--width", "800", "--input", "leap",
        ]).unwrap();
        let cfg = cli.engine_config().unwrap();
        assert_eq!(cfg.dwell_ms, 1200);
        assert_eq!(cfg.cooldown_ms, 300);
        assert!(!cfg.screen.mirror);
        assert_eq!(cfg.screen.width, 800);
        assert_eq!(cli.input, InputMode::Leap);
    }

    #[test]
    fn zero_dwell_is_rejected() {
        let cli = Cli::try_parse_from(["air_kiosk", "--dwell-ms", "0"]).unwrap();
        assert!(cli.engine_config().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["air_kiosk", "--config", "/nonexistent/kiosk.toml"]).unwrap();
        assert!(cli.engine_config().is_err());
    }
}
