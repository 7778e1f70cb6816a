use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use fortuna_core::{Style, render, resolve_prize};
use fortuna_bridge::settings::load_config;
use fortuna_bridge::util::{init_tracing, install_panic_hook};
use fortuna_bridge::{DriverSettings, SvgCanvas, WheelDriver, WheelEvent, WheelWidget};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "fortuna")]
#[command(about = "Spin the prize wheel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Wheel config (JSON). Defaults to the per-user config, then built-ins.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the wheel, spin it and announce the prize
    Spin {
        /// Seed for a reproducible spin
        #[arg(long)]
        seed: Option<u64>,

        /// Save the resting wheel as SVG
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Draw the wheel at a fixed angle
    Render {
        /// Rotation in radians
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        angle: f64,

        /// Destination SVG file
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the segment under the pointer for a resting angle
    Resolve {
        /// Rotation in radians
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    install_panic_hook();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Spin { seed, out } => {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let canvas = SvgCanvas::new(config.size);
            let widget = WheelWidget::attach(Some(canvas), &config)?
                .ok_or_else(|| anyhow!("wheel declined to attach"))?;

            let settings = DriverSettings::from(&config);
            let (driver, mut events) = WheelDriver::start(widget, rng, settings);
            driver.open().await?;
            driver.spin().await?;

            while let Some(event) = events.recv().await {
                match event {
                    WheelEvent::SpinIgnored => return Err(anyhow!("spin was not accepted")),
                    WheelEvent::PrizeAnnounced { message, .. } => {
                        println!("{}", message);
                        break;
                    }
                    _ => {}
                }
            }

            let widget = driver.shutdown().await?;
            if let Some(out) = out {
                widget
                    .canvas()
                    .save(&out)
                    .with_context(|| format!("writing {}", out.display()))?;
            }
        }

        Commands::Render { angle, out } => {
            let mut canvas = SvgCanvas::new(config.size);
            render(&mut canvas, &config.segments, angle, &Style::from(&config));
            canvas
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
        }

        Commands::Resolve { angle } => {
            let prize = resolve_prize(angle, &config.segments).context("wheel has no segments")?;
            println!("{} {}", prize.index, prize.label);
        }
    }

    Ok(())
}
