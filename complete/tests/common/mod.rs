//! Helpers shared by the integration tests: a sample tree and runners that
//! source generated scripts in real shells.
//!
//! Shell runners return `None` when the shell is not installed (or too old),
//! so callers can skip instead of failing.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use cmdflag_complete::{CommandInfo, bash_word, generate};
use cmdflag_core::{CommandDef, FlagDef};

/// `prog` with `start`, `stop` and `--mode` (enum dev/prod/test).
pub fn sample_tree() -> CommandDef {
    CommandDef::new("prog")
        .with_flag(FlagDef::enumeration(Some("m"), Some("mode"), &["dev", "prod", "test"]))
        .with_subcommand(CommandDef::new("start"))
        .with_subcommand(CommandDef::new("stop"))
}

/// A richer tree: nested contexts, aliases, string and bool flags.
pub fn nested_tree() -> CommandDef {
    CommandDef::new("prog")
        .with_flag(FlagDef::enumeration(Some("m"), Some("mode"), &["dev", "prod", "test"]))
        .with_flag(FlagDef::boolean(Some("v"), Some("verbose")))
        .with_flag(FlagDef::string(Some("c"), Some("config")))
        .with_subcommand(CommandDef::new("start"))
        .with_subcommand(CommandDef::new("stop"))
        .with_subcommand(
            CommandDef::new("remote")
                .with_short("r")
                .with_flag(FlagDef::enumeration(None, Some("proto"), &["ssh", "https", "git"]))
                .with_subcommand(CommandDef::new("add"))
                .with_subcommand(CommandDef::new("remove").with_short("rm")),
        )
}

pub fn script(tree: &CommandDef, shell: &str) -> String {
    generate(Some(tree as &dyn CommandInfo), shell).expect("generation succeeds")
}

fn shell_version(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Returns `true` if bash 4.2 or newer is on `PATH`.
pub fn bash_available() -> bool {
    let Some(version) = shell_version(
        "bash",
        &["--norc", "--noprofile", "-c", "echo ${BASH_VERSINFO[0]} ${BASH_VERSINFO[1]}"],
    ) else {
        return false;
    };
    let mut parts = version.split_whitespace().map(|p| p.parse::<u32>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    major > 4 || (major == 4 && minor >= 2)
}

/// Returns `true` if `pwsh` is on `PATH`.
pub fn pwsh_available() -> bool {
    shell_version("pwsh", &["-NoProfile", "-NonInteractive", "-Command", "$PSVersionTable.PSVersion.Major"])
        .is_some()
}

/// Sources `script` in bash and runs `body`, returning stdout.
pub fn run_bash(script: &str, body: &str, cwd: &Path) -> Option<String> {
    if !bash_available() {
        return None;
    }
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("completion.bash");
    std::fs::write(&path, script).expect("write script");

    let program = format!("source {}\n{body}", bash_word(&path.to_string_lossy()));
    let output = Command::new("bash")
        .args(["--norc", "--noprofile", "-c", &program])
        .current_dir(cwd)
        .output()
        .expect("bash runs");
    assert!(
        output.status.success(),
        "bash failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs the `_prog` completion function for `words` (the last word is the
/// one being completed) and returns `COMPREPLY`.
pub fn bash_complete(script: &str, words: &[&str], cwd: &Path) -> Option<Vec<String>> {
    let quoted: Vec<String> = words.iter().map(|w| bash_word(w)).collect();
    let body = format!(
        "COMP_WORDS=({})\nCOMP_CWORD={}\nCOMPREPLY=()\n_prog\nprintf '%s\\n' \"${{COMPREPLY[@]}}\"\n",
        quoted.join(" "),
        words.len().saturating_sub(1)
    );
    let stdout = run_bash(script, &body, cwd)?;
    Some(stdout.lines().filter(|l| !l.is_empty()).map(str::to_string).collect())
}

/// Dot-sources `script` in pwsh and runs `body`, returning stdout.
pub fn run_pwsh(script: &str, body: &str, cwd: &Path) -> Option<String> {
    if !pwsh_available() {
        return None;
    }
    let dir = tempfile::tempdir().expect("temp dir");
    let script_path = dir.path().join("completion.ps1");
    std::fs::write(&script_path, script).expect("write script");

    let driver = format!(
        "$ErrorActionPreference = 'Stop'\n. {}\n{body}",
        pwsh_quote(&script_path.to_string_lossy())
    );
    let driver_path = dir.path().join("driver.ps1");
    std::fs::write(&driver_path, driver).expect("write driver");

    let output = Command::new("pwsh")
        .args(["-NoProfile", "-NonInteractive", "-File"])
        .arg(&driver_path)
        .current_dir(cwd)
        .output()
        .expect("pwsh runs");
    assert!(
        output.status.success(),
        "pwsh failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Plain PowerShell single-quoted literal (no runtime decoding involved).
pub fn pwsh_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// PowerShell array literal of `items`.
pub fn pwsh_array<S: AsRef<str>>(items: &[S]) -> String {
    let literals: Vec<String> = items.iter().map(|i| pwsh_quote(i.as_ref())).collect();
    format!("@({})", literals.join(", "))
}
