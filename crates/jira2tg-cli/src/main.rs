//! jira2tg - Jira wiki markup to Telegram MarkdownV2

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use jira2tg_config::Config;
use jira2tg_markup::Converter;

#[derive(Parser)]
#[command(name = "jira2tg")]
#[command(version, about = "Convert Jira wiki markup to Telegram MarkdownV2", long_about = None)]
#[command(after_help = "EXAMPLES:
    jira2tg issue.txt                 Convert a file to stdout
    jira2tg < issue.txt -o msg.md     Convert stdin to a file
    jira2tg --code-language rust -    Override the default fence language
    jira2tg --code-language rust --write-config
                                      Save the setting to the config file")]
struct Cli {
    /// Input file, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Config file (defaults to ~/.config/jira2tg/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fence language for `{code}` blocks without one
    #[arg(long, value_name = "LANG")]
    code_language: Option<String>,

    /// Link destination used when a link has no URL
    #[arg(long, value_name = "URL")]
    placeholder_url: Option<String>,

    /// Save the effective settings to the config file instead of converting
    #[arg(long, conflicts_with_all = ["input", "output"])]
    write_config: bool,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli
        .config
        .as_deref()
        .map(|path| Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()));

    let mut config = load_config(config_path.as_deref(), cli.write_config)?;
    if let Some(language) = &cli.code_language {
        config.default_code_language = language.clone();
    }
    if let Some(url) = &cli.placeholder_url {
        config.placeholder_url = url.clone();
    }

    if cli.write_config {
        return write_config(config_path.as_deref(), &config);
    }

    let input = read_input(cli.input.as_deref())?;
    let output = Converter::new(config.options()).convert(&input);
    write_output(cli.output.as_deref(), &output)
}

/// Loads the config named on the command line, or the default one.
///
/// A missing default config means defaults. A missing explicit config is an
/// error unless it is about to be written.
fn load_config(explicit: Option<&Path>, creating: bool) -> Result<Config> {
    let Some(config_path) = explicit else {
        return match Config::load()? {
            Some(config) => {
                log::debug!("Loaded config from {}", Config::config_path().display());
                Ok(config)
            }
            None => {
                log::debug!(
                    "No config at {}, using defaults",
                    Config::config_path().display()
                );
                Ok(Config::default())
            }
        };
    };

    match Config::load_from_path(config_path)? {
        Some(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        }
        None if creating => Ok(Config::default()),
        None => anyhow::bail!("config file not found: {}", config_path.display()),
    }
}

fn write_config(explicit: Option<&Path>, config: &Config) -> Result<()> {
    match explicit {
        Some(path) => {
            config
                .save_to_path(path)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote config to {}", path.display());
        }
        None => {
            config.save().with_context(|| {
                format!("writing {}", Config::config_path().display())
            })?;
            log::info!("Wrote config to {}", Config::config_path().display());
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut bytes = Vec::new();
    match path {
        Some(path) if path != Path::new("-") => {
            bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        }
        _ => {
            io::stdin()
                .read_to_end(&mut bytes)
                .context("reading stdin")?;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, output).with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes()).context("writing stdout")?;
            stdout.flush().context("writing stdout")
        }
    }
}
