// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "arcent")]
#[command(about = "The First Arcent - an animated Sierpinski fractal", long_about = None)]
pub struct Cli {
    /// Hide the parameter panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON file with startup settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Animation time advanced per frame
    #[arg(long)]
    pub speed: Option<f64>,

    /// Initial animation time, clamped to [0, 5]
    #[arg(long = "start-time")]
    pub start_time: Option<f64>,

    /// Stop at the ends of the time range instead of looping
    #[arg(long = "no-loop", default_value = "false")]
    pub no_loop: bool,

    /// Start with the animation paused
    #[arg(long, default_value = "false")]
    pub paused: bool,

    /// Run the frame loop without a window
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u64,
}
