mod caps;
mod config;
mod device;
mod dump;
mod input;
mod output;
mod pointer;
mod session;

use clap::Parser;

use crate::config::{Cli, Command, Config};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(&cli);

    if let Some(Command::Dump) = cli.command {
        return dump::run_dump(&config);
    }

    log::info!(
        "mtpad starting (device={}, swap_xy={}, invert_x={}, invert_y={}, grab={})",
        config.device,
        config.swap_xy,
        config.invert_x,
        config.invert_y,
        config.grab
    );

    let caps = session::configure(&config)?;
    let uinput = output::create_pointer_device(&caps, config.pointer_options())?;
    if let Ok(name) = uinput.sysname() {
        log::info!(
            "pointer device ready: /sys/devices/virtual/input/{}",
            name.to_string_lossy()
        );
    }

    session::run(&config, &caps, &uinput)
}
