//! Context resolution and candidate selection for one command line.
//!
//! This mirrors what the emitted scripts do on every keystroke, so the
//! logic can be driven from Rust (`cmdflag complete`) and tested without a
//! shell.

use std::path::Path;

use cmdflag_core::ValueKind;
use tracing::debug;

use crate::collector::{CommandModel, ContextPath, FlagParam};
use crate::matcher::Matcher;

/// What to offer for the word under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Matched options or enum values.
    Candidates(Vec<String>),
    /// Filesystem entries for a string-valued flag; directories end in `/`.
    Paths(Vec<String>),
}

impl Completion {
    pub fn items(&self) -> &[String] {
        match self {
            Self::Candidates(items) | Self::Paths(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<String> {
        match self {
            Self::Candidates(items) | Self::Paths(items) => items,
        }
    }
}

/// Returns `true` for tokens that look like flags.
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Walks `words` (program name first) down the context tree.
///
/// Stops at the first flag or at the first word with no matching child
/// context.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::{CommandInfo, collect, resolve_context};
/// use cmdflag_core::{CommandDef, FlagDef};
///
/// let tree = CommandDef::new("prog")
///     .with_subcommand(CommandDef::new("sub").with_flag(FlagDef::string(None, Some("flag"))));
/// let model = collect(Some(&tree as &dyn CommandInfo));
///
/// let ctx = resolve_context(&model, &["prog", "sub", "--flag", "val"]);
/// assert_eq!(ctx.as_str(), "/sub/");
/// ```
pub fn resolve_context<S: AsRef<str>>(model: &CommandModel, words: &[S]) -> ContextPath {
    let mut current = ContextPath::root();
    for word in words.iter().skip(1).map(AsRef::as_ref) {
        if is_flag(word) {
            break;
        }
        let next = current.child(word);
        if !model.has_context(&next) {
            break;
        }
        current = next;
    }
    current
}

/// Completes the last word of `words`.
///
/// `words` is the whole command line split into words, program name first;
/// the last element is the (possibly empty) word being completed.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::{CommandInfo, CompletionConfig, Matcher, collect, complete};
/// use cmdflag_core::{CommandDef, FlagDef};
///
/// let tree = CommandDef::new("prog")
///     .with_flag(FlagDef::enumeration(None, Some("mode"), &["dev", "prod", "test"]))
///     .with_subcommand(CommandDef::new("start"))
///     .with_subcommand(CommandDef::new("stop"));
/// let model = collect(Some(&tree as &dyn CommandInfo));
/// let mut matcher = Matcher::new(CompletionConfig::default());
///
/// let result = complete(&model, &mut matcher, &["prog", "--mode", "pr"]);
/// assert_eq!(result.items(), ["prod"]);
///
/// let result = complete(&model, &mut matcher, &["prog", "st"]);
/// assert_eq!(result.items(), ["start", "stop"]);
/// ```
pub fn complete<S: AsRef<str>>(
    model: &CommandModel,
    matcher: &mut Matcher,
    words: &[S],
) -> Completion {
    let (current, prior) = match words.split_last() {
        Some((current, prior)) => (current.as_ref(), prior),
        None => ("", words),
    };
    let context = resolve_context(model, prior);
    debug!(context = %context, current, "Resolved completion context");

    // `--flag=value` completes the value of that flag; otherwise the previous
    // word decides.
    let (flag, value, prefix) = match current.split_once('=') {
        Some((flag, value)) if is_flag(flag) => (Some(flag), value, format!("{flag}=")),
        _ => {
            let previous = prior.last().map(AsRef::as_ref).filter(|word| is_flag(word));
            (previous, current, String::new())
        }
    };

    if let Some(param) = flag.and_then(|flag| model.flag_param(&context, flag)) {
        if let Some(completion) = complete_value(matcher, param, value) {
            return prefixed(completion, &prefix);
        }
    }

    let options: Vec<&str> = model
        .options(&context)
        .map(|opts| opts.iter().map(String::as_str).collect())
        .unwrap_or_default();
    Completion::Candidates(matcher.filter(current, &options))
}

fn complete_value(matcher: &mut Matcher, param: &FlagParam, pattern: &str) -> Option<Completion> {
    match param.kind {
        ValueKind::Enum => Some(Completion::Candidates(
            matcher.filter(pattern, &param.enum_options),
        )),
        ValueKind::String => Some(Completion::Paths(list_paths(pattern))),
        ValueKind::Bool => None,
    }
}

fn prefixed(completion: Completion, prefix: &str) -> Completion {
    if prefix.is_empty() {
        return completion;
    }
    let add = |items: Vec<String>| items.into_iter().map(|i| format!("{prefix}{i}")).collect();
    match completion {
        Completion::Candidates(items) => Completion::Candidates(add(items)),
        Completion::Paths(items) => Completion::Paths(add(items)),
    }
}

/// Lists filesystem entries starting with `word`, sorted.
///
/// Hidden entries are listed only when the typed name starts with `.`.
/// Unreadable directories yield an empty list.
pub fn list_paths(word: &str) -> Vec<String> {
    let (dir_part, name_part) = match word.rfind('/') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };
    let dir = if dir_part.is_empty() {
        Path::new(".")
    } else {
        Path::new(dir_part)
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "Path listing failed");
            return Vec::new();
        }
    };

    let mut out: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !name.starts_with(name_part) || (name.starts_with('.') && !name_part.starts_with('.'))
            {
                return None;
            }
            let is_dir = entry.path().is_dir();
            let suffix = if is_dir { "/" } else { "" };
            Some(format!("{dir_part}{name}{suffix}"))
        })
        .collect();
    out.sort();
    out
}
