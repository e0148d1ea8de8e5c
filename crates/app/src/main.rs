mod guide;
mod observability;
mod terminal;

use std::fmt;
use std::path::PathBuf;

use backend::{BackendConfig, ConfigError};
use career_core::model::{GuideStageId, RoleId};
use services::{AppServices, Clock, GuideConfig};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingRoleId,
    UnknownArg(String),
    InvalidId { raw: String },
    InvalidConcurrency { raw: String },
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingRoleId => f.write_str("role requires a role id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidId { raw } => write!(f, "invalid id: {raw:?}"),
            ArgsError::InvalidConcurrency { raw } => {
                write!(f, "invalid --concurrency value: {raw}")
            }
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- test  [--api <url>]");
    eprintln!("  cargo run -p app -- guide [<stage-id>] [--api <url>] [--catalog <path>] [--concurrency <n>]");
    eprintln!("  cargo run -p app -- role  <role-id> [--api <url>] [--catalog <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", backend::config::DEFAULT_BASE_URL);
    eprintln!("  --concurrency {}", services::GuideService::DEFAULT_CONCURRENCY);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CAREER_API_URL, CAREER_API_TOKEN, CAREER_API_TIMEOUT_SECS,");
    eprintln!("  CAREER_GUIDE_CATALOG, CAREER_GUIDE_CONCURRENCY, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Test,
    Guide(Option<GuideStageId>),
    Role(RoleId),
}

#[derive(Debug)]
struct Args {
    command: Command,
    backend: BackendConfig,
    guide: GuideConfig,
}

impl Args {
    fn parse(
        argv: impl IntoIterator<Item = String>,
        backend: BackendConfig,
        guide: GuideConfig,
    ) -> Result<Option<Self>, ArgsError> {
        let mut args = argv.into_iter();
        let mut parsed = Self {
            command: Command::Test,
            backend,
            guide,
        };
        let mut positional: Vec<String> = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(&mut args, "--api")?;
                    parsed.backend = parsed.backend.with_base_url(value)?;
                }
                "--catalog" => {
                    let value = require_value(&mut args, "--catalog")?;
                    parsed.guide.catalog_path = Some(PathBuf::from(value));
                }
                "--concurrency" => {
                    let value = require_value(&mut args, "--concurrency")?;
                    parsed.guide.concurrency = match value.parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(ArgsError::InvalidConcurrency { raw: value }),
                    };
                }
                "--help" | "-h" => return Ok(None),
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        parsed.command = match positional.next().as_deref() {
            None | Some("test") => Command::Test,
            Some("guide") => Command::Guide(
                positional
                    .next()
                    .map(|raw| raw.parse().map_err(|_| ArgsError::InvalidId { raw }))
                    .transpose()?,
            ),
            Some("role") => {
                let raw = positional.next().ok_or(ArgsError::MissingRoleId)?;
                Command::Role(raw.parse().map_err(|_| ArgsError::InvalidId { raw })?)
            }
            Some(other) => return Err(ArgsError::UnknownArg(other.to_string())),
        };
        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Some(parsed))
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let backend = BackendConfig::from_env()?;
    let guide = GuideConfig::from_env()?;
    let Some(args) =
        Args::parse(std::env::args().skip(1), backend, guide).map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?
    else {
        print_usage();
        return Ok(());
    };

    let services = AppServices::http(args.backend, &args.guide, Clock::default())?;

    match args.command {
        Command::Test => terminal::run_test(&services).await?,
        Command::Guide(None) => print!("{}", guide::format_catalog(services.guide().catalog())),
        Command::Guide(Some(id)) => {
            let result = services.guide().stage_view(&id).await?;
            print!("{}", guide::format_stage(&result));
        }
        Command::Role(id) => {
            let view = services.guide().role_profile(&id).await?;
            print!("{}", guide::format_role(&view));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    observability::init();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
