use clap::Parser;
use iced::Application;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use ws281x_emulator::config::{Cli, EmulatorConfig};
use ws281x_emulator::emulator::{self, AppContext, Emulator};
use ws281x_emulator::layout::spiral_layout;
use ws281x_emulator::server::LedServer;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EmulatorConfig::from(Cli::parse());
    let layout = spiral_layout(config.num_pixels, config.scale);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("led-server")
        .build()?;

    let server = Arc::new(LedServer::new(&layout, runtime.handle().clone()));
    let handle = server.start();
    runtime.spawn(async move {
        let started_at = handle.started_at();
        handle.wait_until_stop().await;
        info!("Server started at {} has stopped", started_at);
    });

    let result = Emulator::run(emulator::settings(AppContext {
        server: server.clone(),
        layout,
        config,
    }));

    server.stop();
    runtime.shutdown_timeout(Duration::from_secs(1));
    result.map_err(|e| anyhow::anyhow!("emulator window failed: {}", e))
}
