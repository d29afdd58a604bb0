//! Program and identifier names used in generated scripts.

use std::sync::LazyLock;

use regex::Regex;

use crate::capability::{CommandInfo, present};

static NON_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex must compile"));
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").expect("static regex must compile"));

const FALLBACK_PROGRAM: &str = "app";
const FALLBACK_POWERSHELL_NAME: &str = "App";

/// Name the completion is registered for.
///
/// Uses the root's long name, or the running executable's file stem when
/// there is no root or its name is empty.
pub(crate) fn program_name(root: Option<&dyn CommandInfo>) -> String {
    if let Some(name) = root.and_then(|r| present(Some(r.long_name()))) {
        return name.to_string();
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_PROGRAM.to_string())
}

/// Bash identifier fragment: everything outside `[A-Za-z0-9_]` becomes `_`.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::bash_identifier;
///
/// assert_eq!(bash_identifier("my-tool"), "my_tool");
/// assert_eq!(bash_identifier("kubectl"), "kubectl");
/// ```
pub fn bash_identifier(program: &str) -> String {
    let ident = NON_IDENT_RE.replace_all(program, "_").into_owned();
    if ident.is_empty() {
        FALLBACK_PROGRAM.to_string()
    } else {
        ident
    }
}

/// PowerShell name fragment: alphanumeric segments, each capitalized.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::powershell_name;
///
/// assert_eq!(powershell_name("my-tool"), "MyTool");
/// assert_eq!(powershell_name("git.exe"), "GitExe");
/// assert_eq!(powershell_name("---"), "App");
/// ```
pub fn powershell_name(program: &str) -> String {
    let name: String = SEGMENT_RE
        .find_iter(program)
        .map(|segment| capitalize(segment.as_str()))
        .collect();
    if name.is_empty() {
        FALLBACK_POWERSHELL_NAME.to_string()
    } else {
        name
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
