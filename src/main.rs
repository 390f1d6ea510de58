//! turtle CLI - main entry point
//!
//! Share a file to Telegram with a single flag. Flow errors are printed as
//! status lines; the process still exits successfully.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use turtle::{commands, ConfigStore, StdinConfirm, TELEGRAM_API_URL};

const EXAMPLES: &str = "\
Examples:
  turtle -id \"123456:ABC-DEF1234ghIkl\"
  turtle -f document.pdf
  turtle -clean";

#[derive(Parser, Debug)]
#[command(name = "turtle")]
#[command(about = "🐢 turtle - Telegram File Sharing Tool", long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// File path to share
    #[arg(short = 'f', long = "file", value_name = "PATH", allow_hyphen_values = true)]
    file: Option<PathBuf>,

    /// Set Telegram Bot Token (first-time setup)
    #[arg(long = "id", value_name = "TOKEN", allow_hyphen_values = true)]
    id: Option<String>,

    /// Remove configuration
    #[arg(long)]
    clean: bool,

    /// Show version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Config file (default: ~/.turtle_config.json)
    #[arg(long, env = "TURTLE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Telegram Bot API base URL
    #[arg(long, env = "TURTLE_API_URL", default_value = TELEGRAM_API_URL)]
    api_url: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Help,
    Version,
    Clean,
    Setup(String),
    Send(PathBuf),
}

impl Cli {
    /// help > version > clean > id > file
    fn action(&self) -> Action {
        if self.version {
            Action::Version
        } else if self.clean {
            Action::Clean
        } else if let Some(token) = &self.id {
            Action::Setup(token.clone())
        } else if let Some(file) = &self.file {
            Action::Send(file.clone())
        } else {
            Action::Help
        }
    }

    fn store(&self) -> turtle::Result<ConfigStore> {
        match &self.config {
            Some(path) => Ok(ConfigStore::new(path)),
            None => ConfigStore::at_home(),
        }
    }
}

/// Long flags that are also accepted with a single dash (`-id`, `-clean`).
const LONG_FLAGS: &[&str] = &["id", "clean", "file", "config", "api-url", "version", "help"];

/// Flags whose next argument is a value and must be left untouched.
const VALUE_FLAGS: &[&str] = &["-f", "--file", "--id", "--config", "--api-url"];

/// Rewrite single-dash long flags to their double-dash form.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut expect_value = false;

    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        let arg = match arg.to_str().and_then(rewrite_single_dash) {
            Some(rewritten) => OsString::from(rewritten),
            None => arg,
        };
        expect_value = arg.to_str().is_some_and(|s| VALUE_FLAGS.contains(&s));
        out.push(arg);
    }

    out
}

fn rewrite_single_dash(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    LONG_FLAGS.contains(&name).then(|| format!("-{}", arg))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for status lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("turtle=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if let Err(err) = execute(&cli).await {
        println!("❌ {}", err);
    }

    Ok(())
}

async fn execute(cli: &Cli) -> turtle::Result<()> {
    match cli.action() {
        Action::Help => {
            Cli::command().print_help()?;
            println!();
        }
        Action::Version => {
            println!("🐢 turtle v{}", env!("CARGO_PKG_VERSION"));
        }
        Action::Clean => {
            commands::clean::run(&cli.store()?)?;
        }
        Action::Setup(token) => {
            commands::setup::run(&token, &cli.store()?, &cli.api_url, &mut StdinConfirm).await?;
        }
        Action::Send(file) => {
            commands::send::run(&file, &cli.store()?, &cli.api_url).await?;
        }
    }

    Ok(())
}
