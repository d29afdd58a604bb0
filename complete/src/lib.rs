//! Offline Bash and PowerShell completion script generation.
//!
//! Given a command tree (anything implementing [`CommandInfo`]), this crate
//! emits a self-contained completion script. The script carries its own
//! copy of the command surface and a multi-tier fuzzy matcher, so completion
//! runs entirely inside the user's shell without calling back into the
//! program.
//!
//! # Main entry points
//!
//! - [`generate`]: script text for a shell name (`bash`, `pwsh`,
//!   `powershell`).
//! - [`generate_with_config`]: same, with explicit matcher tunables.
//! - [`collect`]: the normalized [`CommandModel`] both emitters render.
//! - [`Matcher`] / [`complete`]: the matching and resolution logic the
//!   scripts run, callable from Rust.
//!
//! # Example
//!
//! ```
//! use cmdflag_complete::{CommandInfo, generate};
//! use cmdflag_core::{CommandDef, FlagDef};
//!
//! let tree = CommandDef::new("prog")
//!     .with_flag(FlagDef::enumeration(None, Some("mode"), &["dev", "prod", "test"]))
//!     .with_subcommand(CommandDef::new("start"))
//!     .with_subcommand(CommandDef::new("stop"));
//!
//! let script = generate(Some(&tree as &dyn CommandInfo), "bash").unwrap();
//! assert!(script.contains("complete -F _prog prog"));
//!
//! let script = generate(Some(&tree as &dyn CommandInfo), "pwsh").unwrap();
//! assert!(script.contains("Register-ArgumentCompleter -Native"));
//!
//! assert!(generate(None, "fish").is_err());
//! ```

mod bash;
mod capability;
mod collector;
mod config;
mod error;
mod escape;
mod matcher;
mod names;
mod pool;
mod powershell;
mod resolve;
mod template;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tracing::debug;

pub use capability::{CommandInfo, FlagInfo};
pub use collector::{ArgRequirement, CommandModel, ContextPath, FlagParam, collect};
pub use config::{
    CompletionConfig, DEFAULT_CACHE_MAX_SIZE, DEFAULT_FUZZY_ENABLED, DEFAULT_MAX_CANDIDATES,
    DEFAULT_MAX_RESULTS, DEFAULT_MIN_PATTERN_LENGTH, DEFAULT_SCORE_THRESHOLD,
};
pub use error::{CompletionError, Result};
pub use escape::{bash_word, escape_bash, escape_powershell, powershell_literal};
pub use matcher::{Matcher, PREFIX_SCORE, ScoreCache, Tier, compute_score};
pub use names::{bash_identifier, powershell_name};
pub use resolve::{Completion, complete, is_flag, list_paths, resolve_context};

/// Target shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    Bash,
    PowerShell,
}

impl Shell {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::PowerShell => "pwsh",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shell {
    type Err = CompletionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bash" => Ok(Self::Bash),
            "pwsh" | "powershell" => Ok(Self::PowerShell),
            other => Err(CompletionError::UnsupportedShell(other.to_string())),
        }
    }
}

/// Generates a completion script with the default matcher tunables.
///
/// `shell` is one of `bash`, `pwsh` or `powershell`. A missing root yields
/// a minimal script registered for the running executable's name.
///
/// # Errors
///
/// Returns [`CompletionError::UnsupportedShell`] for any other shell name.
pub fn generate(root: Option<&dyn CommandInfo>, shell: &str) -> Result<String> {
    let shell: Shell = shell.parse()?;
    generate_with_config(root, shell, &CompletionConfig::default())
}

/// Generates a completion script with explicit tunables.
///
/// # Errors
///
/// Returns [`CompletionError::InvalidConfig`] if `config` fails
/// [`CompletionConfig::validate`].
pub fn generate_with_config(
    root: Option<&dyn CommandInfo>,
    shell: Shell,
    config: &CompletionConfig,
) -> Result<String> {
    config.validate()?;

    let model = collect(root);
    let program = names::program_name(root);

    let mut buf = pool::SCRIPT_BUFFERS.acquire();
    match shell {
        Shell::Bash => bash::render(&model, &program, config, &mut buf),
        Shell::PowerShell => powershell::render(&model, &program, config, &mut buf),
    }

    debug!(
        shell = %shell,
        program = %program,
        contexts = model.context_count(),
        bytes = buf.len(),
        "Generated completion script"
    );
    Ok(buf.as_str().to_owned())
}

/// Generates a script and writes it to `writer`.
pub fn write_script<W: Write>(
    writer: &mut W,
    root: Option<&dyn CommandInfo>,
    shell: Shell,
    config: &CompletionConfig,
) -> Result<()> {
    let script = generate_with_config(root, shell, config)?;
    writer.write_all(script.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Generates a script and prints it to standard output.
pub fn gen_and_print(root: Option<&dyn CommandInfo>, shell: &str) -> Result<()> {
    let shell: Shell = shell.parse()?;
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_script(&mut lock, root, shell, &CompletionConfig::default())
}
