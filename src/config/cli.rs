use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mtpad")]
#[command(about = "Expose a type A multitouch screen as a virtual pointer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Touch input device path
    #[arg(long, env = "MTPAD_DEVICE")]
    pub device: Option<String>,

    /// Swap the X and Y axes
    #[arg(long)]
    pub swap_xy: bool,

    /// Invert the X axis
    #[arg(long)]
    pub invert_x: bool,

    /// Invert the Y axis
    #[arg(long)]
    pub invert_y: bool,

    /// Don't grab the device exclusively
    #[arg(long)]
    pub no_grab: bool,

    /// Path to config file
    #[arg(long, env = "MTPAD_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dump raw input events for debugging
    Dump,
}
