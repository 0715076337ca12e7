mod cli;
mod field;

use clap::Parser;
use cli::{Cli, Command, DecimalAction};
use crop::{CommitOptions, ContainerSize, CropError, CropSession, ImageFile, JPEG_QUALITY};
use decimal::DecimalConfig;
use field::FieldKind;
use mask::MaskRegistry;
use password::PasswordPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{fs, io};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Side length assumed for the crop area when there is no modal to measure.
const CLI_CONTAINER: f32 = 400.0;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    decimal: DecimalConfig,
    password: PasswordPolicy,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error(transparent)]
    Bind(#[from] forms::BindError),
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

fn load_config(path: Option<&Path>) -> Result<FileConfig, CliError> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Mask { pattern, values } => {
            let pattern = MaskRegistry::new().resolve(&pattern);
            for v in values {
                println!("{}", pattern.apply(&v));
            }
        }
        Command::Unmask { pattern, values } => {
            let pattern = MaskRegistry::new().resolve(&pattern);
            for v in values {
                println!("{}", pattern.unmask(&v));
            }
        }
        Command::MaskType { pattern, keys } => field::simulate(FieldKind::Mask(&pattern), &keys)?,
        Command::Decimal { action } => run_decimal(action, &config.decimal)?,
        Command::Strength { password, confirm } => {
            let strength = password::evaluate(&password, &config.password);
            println!("{} ({}/100)", strength.level.label(), strength.score);
            for req in password::Requirement::ALL {
                let mark = if strength.requirements.is_met(req) { "x" } else { " " };
                println!("  [{mark}] {}", req.key());
            }
            if let Some(confirm) = confirm {
                println!("confirmation: {:?}", password::confirmation(&password, &confirm));
            }
        }
        Command::Presets => {
            for (name, alias, pattern) in mask::presets::PRESETS {
                println!("{name:<16} {alias:<16} {pattern}");
            }
        }
        Command::Crop {
            input,
            ratio,
            max_mb,
            output,
        } => run_crop(&input, ratio, max_mb, output.as_deref())?,
    }
    Ok(())
}

fn run_decimal(action: DecimalAction, cfg: &DecimalConfig) -> Result<(), CliError> {
    match action {
        DecimalAction::Format { values } => {
            for v in values {
                println!("{}", decimal::format(v, cfg));
            }
        }
        DecimalAction::Parse { values } => {
            for v in values {
                println!("{}", decimal::parse(&v, cfg));
            }
        }
        DecimalAction::Type { keys } => field::simulate(FieldKind::Decimal(cfg), &keys)?,
    }
    Ok(())
}

fn run_crop(input: &Path, ratio: f64, max_mb: f64, output: Option<&Path>) -> Result<(), CliError> {
    let file = ImageFile::read(input)?;
    let prepared = crop::prepare(Some(file), max_mb)?;
    let session = CropSession::initialize(
        prepared,
        ratio,
        ContainerSize::new(CLI_CONTAINER, CLI_CONTAINER),
    )?;
    let cropped = session.commit(&CommitOptions::default());
    log::info!("cropped to {}x{}", cropped.width(), cropped.height());

    match output {
        Some(path) => {
            let bytes = cropped.to_jpeg_bytes(JPEG_QUALITY)?;
            fs::write(path, bytes).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        None => println!("{}", cropped.to_jpeg_data_url(JPEG_QUALITY)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let CliError::Crop(crop_err) = &err {
                eprintln!("{}", crop_err.user_message());
            }
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
