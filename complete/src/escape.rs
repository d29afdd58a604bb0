//! Shell-specific escaping for text embedded in generated scripts.
//!
//! Both functions are total: every input produces output that is safe to
//! embed in the quoting convention the emitters use.
//!
//! - Bash: minimally-quoted tokens (array elements, associative-array keys,
//!   `complete` arguments). Every shell metacharacter gets a backslash.
//! - PowerShell: single-quoted literals. Single quotes are doubled; the
//!   backtick/backslash sequences are decoded once by the emitted runtime.

/// Characters that get a backslash prefix in Bash tokens.
const BASH_SPECIAL: &[char] = &[
    '\\', '"', ' ', '$', '`', '|', '&', ';', '(', ')', '<', '>', '*', '?', '[', ']', '{', '}',
    '~', '#', '\'', '!', '\t', '\n',
];

/// Characters that get a backtick prefix in PowerShell literals.
const POWERSHELL_BACKTICK: &[char] = &['$', '`', '"', '&', '|', ';', '<', '>', '(', ')'];

/// Every character PowerShell accepts as a single-quote delimiter.
const POWERSHELL_SINGLE_QUOTES: &[char] = &['\'', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

/// Escapes text for use as an unquoted Bash word.
///
/// NUL characters cannot be represented in a Bash script and are dropped.
/// A newline becomes a line continuation, so it never splits the word.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::escape_bash;
///
/// assert_eq!(escape_bash("run now"), r"run\ now");
/// assert_eq!(escape_bash("$(rm -rf ~)"), r"\$\(rm\ -rf\ \~\)");
/// assert_eq!(escape_bash("--mode"), "--mode");
/// ```
pub fn escape_bash(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        if ch == '\0' {
            continue;
        }
        if BASH_SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escapes text as one Bash word, spelling the empty string as `''`.
pub fn bash_word(s: &str) -> String {
    let escaped = escape_bash(s);
    if escaped.is_empty() {
        "''".to_string()
    } else {
        escaped
    }
}

/// Escapes text for embedding inside a PowerShell single-quoted literal.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::escape_powershell;
///
/// assert_eq!(escape_powershell("it's"), "it''s");
/// assert_eq!(escape_powershell("$env:HOME"), "`$env:HOME");
/// assert_eq!(escape_powershell(r"C:\tmp"), r"C:\\tmp");
/// ```
pub fn escape_powershell(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        if POWERSHELL_SINGLE_QUOTES.contains(&ch) {
            out.push(ch);
            out.push(ch);
        } else if ch == '\\' {
            out.push_str("\\\\");
        } else if POWERSHELL_BACKTICK.contains(&ch) {
            out.push('`');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Wraps escaped text in single quotes.
pub fn powershell_literal(s: &str) -> String {
    format!("'{}'", escape_powershell(s))
}
