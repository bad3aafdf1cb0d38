mod animation;
mod config;
mod error;
mod graphics;
mod input;
mod lighting;
mod math;
mod pipeline;
mod primitives;
mod scene;
mod state;
mod vertex;
mod widget;

use crate::config::Settings;
use crate::error::AppError;
use crate::state::AppState;
use crate::widget::HydrantWidget;
use clap::Parser;
use druid::{AppLauncher, WindowDesc};
use std::path::PathBuf;

/// Interactive 3D fire-hydrant cabinet
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show the debug overlay
    #[arg(short, long)]
    debug: bool,

    /// Start with lighting disabled
    #[arg(long)]
    no_lighting: bool,

    /// Degrees the door turns per animation tick
    #[arg(long, value_name = "DEGREES")]
    door_step: Option<f64>,

    /// Animation period in milliseconds
    #[arg(long, value_name = "MS")]
    period_ms: Option<u64>,
}

impl Cli {
    /// Loads the settings file, if any, and layers the flags on top
    fn settings(&self) -> Result<Settings, AppError> {
        let mut settings = match &self.config {
            Some(path) => {
                log::info!("loading settings from {}", path.display());
                Settings::load(path)?
            }
            None => Settings::default(),
        };
        if self.debug {
            settings.debug = true;
        }
        if self.no_lighting {
            settings.lighting = false;
        }
        if let Some(step) = self.door_step {
            settings.animation.door_step = step;
        }
        if let Some(period) = self.period_ms {
            settings.animation.period_ms = period;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn print_instructions() {
    println!();
    println!("===== 3D Fire Hydrant Cabinet =====");
    println!("Controls:");
    println!("  x/X: Rotate around X-axis");
    println!("  y/Y: Rotate around Y-axis");
    println!("  z/Z: Rotate around Z-axis");
    println!("  Arrow Keys: Rotate view");
    println!("  o/O: Open door");
    println!("  c/C: Close door");
    println!("  l/L: Toggle lighting");
    println!("  +/-: Zoom in/out");
    println!("  ESC: Exit");
    println!("===================================");
    println!();
}

/// Main function
fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    print_instructions();

    let window = &settings.window;
    log::info!("opening {}x{} window", window.width, window.height);
    let main_window = WindowDesc::new(HydrantWidget::new(&settings.animation))
        .title(window.title.clone())
        .window_size((window.width, window.height));

    AppLauncher::with_window(main_window).launch(AppState::new(&settings))?;

    log::info!("shutting down");
    Ok(())
}
