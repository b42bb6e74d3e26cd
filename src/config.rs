use crate::layout::DEFAULT_SCALE;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "ws281x-emulator", version, about = "Emulated WS281x strip drawn as a spiral")]
pub struct Cli {
    /// Number of pixels on the emulated strip
    #[arg(short = 'n', long = "num-pixels", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_pixels: u32,

    /// Spiral scale (distance between rings)
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Radius of each drawn pixel
    #[arg(long, default_value_t = 20.0)]
    pub radius: f32,

    /// Delay between two polls of the pixel colors
    #[arg(long = "poll-interval-ms", default_value_t = 16)]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorConfig {
    pub num_pixels: usize,
    pub scale: f64,
    pub marker_radius: f32,
    pub poll_interval: Duration,
}

impl From<Cli> for EmulatorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            num_pixels: cli.num_pixels as usize,
            scale: cli.scale,
            marker_radius: cli.radius,
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
        }
    }
}
