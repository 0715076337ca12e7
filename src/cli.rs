use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "formkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Field masks, decimal entry, password strength and photo crop from the command line")]
pub struct Cli {
    /// TOML file with `[decimal]` and `[password]` tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Format values with a mask (preset name or raw pattern)
    Mask { pattern: String, values: Vec<String> },
    /// Type keys into a masked field one at a time, then submit it
    MaskType { pattern: String, keys: String },
    /// Strip a mask's literals from displayed values
    Unmask { pattern: String, values: Vec<String> },
    /// Decimal display helpers
    Decimal {
        #[command(subcommand)]
        action: DecimalAction,
    },
    /// Score a password
    Strength {
        password: String,
        /// Also compare against this confirmation
        #[arg(long)]
        confirm: Option<String>,
    },
    /// List the named masks
    Presets,
    /// Center-crop an image and encode it as JPEG
    Crop {
        input: PathBuf,
        /// Width / height; 0 leaves the box free
        #[arg(long, default_value_t = 1.0)]
        ratio: f64,
        #[arg(long, default_value_t = crop::DEFAULT_MAX_SIZE_MB)]
        max_mb: f64,
        /// Write the JPEG here instead of printing a data URL
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DecimalAction {
    /// Render numbers for display
    Format {
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Read displayed values back
    Parse { values: Vec<String> },
    /// Type keys into a decimal field one at a time, then submit it
    Type { keys: String },
}
