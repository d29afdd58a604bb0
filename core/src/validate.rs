//! Command tree validation.
//!
//! Catches structural errors such as duplicate flags, malformed flag names,
//! and subcommand recursion before a tree reaches the completion generator,
//! which trusts its input to be well formed.
//!
//! # Examples
//!
//! ```
//! use cmdflag_core::*;
//!
//! let tree = CommandDef::new("app").with_flag(FlagDef::boolean(Some("v"), Some("verbose")));
//! assert!(validate_tree(&tree).is_empty());
//!
//! // Invalid: flag names are stored without dashes
//! let bad = CommandDef::new("app").with_flag(FlagDef::boolean(None, Some("--verbose")));
//! assert!(!validate_tree(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandDef, FlagDef, ValueKind};

/// Command tree validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// A flag has neither short nor long form.
    #[error("flag must define short or long form")]
    MissingFlagName,
    /// Flag name is empty, dashed, or contains whitespace or `=`.
    #[error("invalid flag name: {0}")]
    InvalidFlagName(String),
    /// An enum flag declares no values.
    #[error("enum flag has no values: {0}")]
    EmptyEnum(String),
    /// Two flags of one command share a name.
    #[error("duplicate flag in scope: {0}")]
    DuplicateFlag(String),
    /// A subcommand declares a short alias that is empty or whitespace-only.
    #[error("subcommand has an empty short alias: {0}")]
    EmptyAlias(String),
    /// Two subcommands of one parent share a name or alias.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
    /// A subcommand repeats a name already on its path (e.g., `git remote git`).
    #[error("subcommand cycle detected at path: {0}")]
    SubcommandCycle(String),
}

/// Validates a command tree.
///
/// Stops at the first problem found and returns it; an empty vector means
/// the tree is safe to hand to the completion generator.
///
/// # Examples
///
/// ```
/// use cmdflag_core::*;
///
/// let tree = CommandDef::new("git")
///     .with_subcommand(CommandDef::new("remote").with_subcommand(CommandDef::new("git")));
/// let errors = validate_tree(&tree);
/// assert!(matches!(errors[0], ValidationError::SubcommandCycle(_)));
/// ```
pub fn validate_tree(root: &CommandDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if root.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName);
        return errors;
    }

    errors.extend(validate_flags(&root.flags));
    if !errors.is_empty() {
        return errors;
    }

    let mut path = vec![root.name.clone()];
    errors.extend(validate_subcommands(&root.subcommands, &mut path));

    errors
}

fn validate_subcommands(subcommands: &[CommandDef], path: &mut Vec<String>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for sub in subcommands {
        let name = sub.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyCommandName);
            return errors;
        }

        let short = sub.short.as_deref().map(str::trim);
        if short == Some("") {
            errors.push(ValidationError::EmptyAlias(name.to_string()));
            return errors;
        }

        for alias in std::iter::once(name).chain(short) {
            if !seen.insert(alias) {
                errors.push(ValidationError::DuplicateSubcommand(alias.to_string()));
                return errors;
            }
        }

        if path.iter().any(|segment| segment == name) {
            let cycle_path = path
                .iter()
                .cloned()
                .chain(std::iter::once(name.to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            errors.push(ValidationError::SubcommandCycle(cycle_path));
            return errors;
        }

        errors.extend(validate_flags(&sub.flags));
        if !errors.is_empty() {
            return errors;
        }

        path.push(name.to_string());
        errors.extend(validate_subcommands(&sub.subcommands, path));
        path.pop();
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_flags(flags: &[FlagDef]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for flag in flags {
        if flag.short.is_none() && flag.long.is_none() {
            errors.push(ValidationError::MissingFlagName);
            return errors;
        }

        let dashed = flag.short_flag().into_iter().chain(flag.long_flag());
        for (raw, name) in flag.short.iter().chain(flag.long.iter()).zip(dashed) {
            if !is_valid_flag_name(raw) {
                errors.push(ValidationError::InvalidFlagName(raw.clone()));
                return errors;
            }
            if !seen.insert(name.clone()) {
                errors.push(ValidationError::DuplicateFlag(name));
                return errors;
            }
        }

        if flag.kind == ValueKind::Enum && flag.values.is_empty() {
            errors.push(ValidationError::EmptyEnum(flag.canonical_name()));
            return errors;
        }
    }

    errors
}

fn is_valid_flag_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}
