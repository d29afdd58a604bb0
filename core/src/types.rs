//! Command tree type definitions.
//!
//! This module defines the concrete data model an application uses to
//! describe its command-line surface: commands with long and short names,
//! their flags, and nested subcommands. The types serialize with [`serde`]
//! so a tree can be stored as JSON or YAML and fed to the completion
//! generator without linking the application itself.

use serde::{Deserialize, Serialize};

/// Kind of value a flag consumes.
///
/// # Examples
///
/// ```
/// use cmdflag_core::ValueKind;
///
/// assert_eq!(ValueKind::default(), ValueKind::Bool);
/// assert!(ValueKind::Enum.takes_value());
/// assert!(!ValueKind::Bool.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Switch without a value (the default).
    #[default]
    Bool,
    /// Free-form string value.
    String,
    /// One of a fixed list of values.
    Enum,
}

impl ValueKind {
    /// Returns `true` when the flag must be followed by a value.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Bool)
    }

    /// Lowercase name used in serialized trees and emitted scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Enum => "enum",
        }
    }
}

/// A flag definition.
///
/// Names are stored without their leading dashes: a flag spelled `--mode`
/// on the command line has `long = Some("mode")`, and `-m` has
/// `short = Some("m")`.
///
/// # Examples
///
/// ```
/// use cmdflag_core::{FlagDef, ValueKind};
///
/// let verbose = FlagDef::boolean(Some("v"), Some("verbose"));
/// assert_eq!(verbose.canonical_name(), "--verbose");
/// assert_eq!(verbose.short_flag().as_deref(), Some("-v"));
///
/// let mode = FlagDef::enumeration(None, Some("mode"), &["dev", "prod"]);
/// assert_eq!(mode.kind, ValueKind::Enum);
/// assert_eq!(mode.values, vec!["dev", "prod"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDef {
    /// Short form without the dash (e.g. "v")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Long form without the dashes (e.g. "verbose")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Kind of value the flag consumes
    #[serde(default)]
    pub kind: ValueKind,
    /// Allowed values for enum flags, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl FlagDef {
    fn new(short: Option<&str>, long: Option<&str>, kind: ValueKind) -> Self {
        Self {
            short: short.map(String::from),
            long: long.map(String::from),
            kind,
            values: Vec::new(),
        }
    }

    /// Creates a boolean switch.
    pub fn boolean(short: Option<&str>, long: Option<&str>) -> Self {
        Self::new(short, long, ValueKind::Bool)
    }

    /// Creates a flag that takes a free-form string value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdflag_core::FlagDef;
    ///
    /// let output = FlagDef::string(Some("o"), Some("output"));
    /// assert!(output.kind.takes_value());
    /// ```
    pub fn string(short: Option<&str>, long: Option<&str>) -> Self {
        Self::new(short, long, ValueKind::String)
    }

    /// Creates a flag restricted to `values`.
    pub fn enumeration(short: Option<&str>, long: Option<&str>, values: &[&str]) -> Self {
        let mut flag = Self::new(short, long, ValueKind::Enum);
        flag.values = values.iter().map(|v| (*v).to_string()).collect();
        flag
    }

    /// Returns the dashed long form, if any.
    pub fn long_flag(&self) -> Option<String> {
        self.long.as_deref().map(|name| format!("--{name}"))
    }

    /// Returns the dashed short form, if any.
    pub fn short_flag(&self) -> Option<String> {
        self.short.as_deref().map(|name| format!("-{name}"))
    }

    /// Returns the canonical dashed name (long form preferred).
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdflag_core::FlagDef;
    ///
    /// assert_eq!(FlagDef::boolean(Some("q"), None).canonical_name(), "-q");
    /// ```
    pub fn canonical_name(&self) -> String {
        self.long_flag()
            .or_else(|| self.short_flag())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// A command and its nested subcommands.
///
/// The root of a tree describes the program itself; its `name` is the
/// executable name completion scripts register for.
///
/// # Examples
///
/// ```
/// use cmdflag_core::{CommandDef, FlagDef};
///
/// let tree = CommandDef::new("deploy")
///     .with_flag(FlagDef::boolean(Some("v"), Some("verbose")))
///     .with_subcommand(CommandDef::new("start").with_short("s"))
///     .with_subcommand(CommandDef::new("stop"));
///
/// assert_eq!(tree.subcommands[0].short.as_deref(), Some("s"));
/// assert_eq!(tree.node_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDef {
    /// Long name of the command (the program name at the root)
    pub name: String,
    /// Optional short alias
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Flags accepted directly by this command
    #[serde(default)]
    pub flags: Vec<FlagDef>,
    /// Nested subcommands
    #[serde(default)]
    pub subcommands: Vec<CommandDef>,
}

impl CommandDef {
    /// Creates a command with the given long name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the short alias.
    pub fn with_short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    /// Adds a flag.
    pub fn with_flag(mut self, flag: FlagDef) -> Self {
        self.flags.push(flag);
        self
    }

    /// Adds a nested subcommand.
    pub fn with_subcommand(mut self, sub: CommandDef) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Counts this command and all of its descendants.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdflag_core::CommandDef;
    ///
    /// let tree = CommandDef::new("git")
    ///     .with_subcommand(CommandDef::new("remote").with_subcommand(CommandDef::new("add")));
    /// assert_eq!(tree.node_count(), 3);
    /// ```
    pub fn node_count(&self) -> usize {
        1 + self
            .subcommands
            .iter()
            .map(CommandDef::node_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_def_creation() {
        let flag = FlagDef::boolean(Some("v"), Some("verbose"));

        assert_eq!(flag.short, Some("v".to_string()));
        assert_eq!(flag.long, Some("verbose".to_string()));
        assert_eq!(flag.kind, ValueKind::Bool);
        assert_eq!(flag.canonical_name(), "--verbose");
    }

    #[test]
    fn test_dashed_forms() {
        let flag = FlagDef::string(Some("o"), Some("output"));

        assert_eq!(flag.short_flag().as_deref(), Some("-o"));
        assert_eq!(flag.long_flag().as_deref(), Some("--output"));
        assert_eq!(FlagDef::string(None, None).canonical_name(), "unknown");
    }

    #[test]
    fn test_help_text_keys_are_ignored() {
        let json = r#"{"name": "app", "description": "An app", "flags": [{"long": "v", "description": "x"}]}"#;
        let tree: CommandDef = serde_json::from_str(json).unwrap();

        assert_eq!(tree.flags[0].long.as_deref(), Some("v"));
        assert!(!serde_json::to_string(&tree).unwrap().contains("description"));
    }

    #[test]
    fn test_tree_deserializes_with_defaults() {
        let json = r#"{
            "name": "app",
            "flags": [{"long": "mode", "kind": "enum", "values": ["dev", "prod"]}],
            "subcommands": [{"name": "run", "short": "r"}]
        }"#;
        let tree: CommandDef = serde_json::from_str(json).unwrap();

        assert_eq!(tree.flags[0].kind, ValueKind::Enum);
        assert_eq!(tree.flags[0].short, None);
        assert_eq!(tree.subcommands[0].short.as_deref(), Some("r"));
        assert!(tree.subcommands[0].flags.is_empty());
    }
}
