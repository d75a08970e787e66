mod cli;
mod file;

pub use cli::{Cli, Command};

use crate::pointer::PointerOptions;

const DEFAULT_DEVICE: &str = "/dev/input/event0";

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub device: String,
    pub swap_xy: bool,
    pub invert_x: bool,
    pub invert_y: bool,
    pub grab: bool,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        Self {
            device: cli
                .device
                .clone()
                .or(file_config.device)
                .unwrap_or_else(|| DEFAULT_DEVICE.into()),
            swap_xy: cli.swap_xy || file_config.swap_xy,
            invert_x: cli.invert_x || file_config.invert_x,
            invert_y: cli.invert_y || file_config.invert_y,
            grab: if cli.no_grab { false } else { file_config.grab },
        }
    }

    pub fn pointer_options(&self) -> PointerOptions {
        PointerOptions {
            swap_xy: self.swap_xy,
            invert_x: self.invert_x,
            invert_y: self.invert_y,
        }
    }
}
