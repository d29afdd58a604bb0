//! The read-only surface the generator needs from a command tree.
//!
//! Applications that keep their own command registry implement
//! [`CommandInfo`] and [`FlagInfo`] for it; the concrete
//! [`CommandDef`]/[`FlagDef`] types from `cmdflag-core` implement them here.
//!
//! Names are reported without dashes. An empty name is treated the same as
//! a missing one.

use cmdflag_core::{CommandDef, FlagDef, ValueKind};

/// Read-only view of one flag.
pub trait FlagInfo {
    /// Long name without the leading `--`.
    fn long_name(&self) -> Option<&str>;
    /// Short name without the leading `-`.
    fn short_name(&self) -> Option<&str>;
    /// Kind of value the flag consumes.
    fn value_kind(&self) -> ValueKind;
    /// Allowed values for [`ValueKind::Enum`] flags, in declaration order.
    fn enum_values(&self) -> &[String];
}

/// Read-only view of one command node.
///
/// The generator assumes the tree reachable through [`sub_commands`] is
/// acyclic; registries that can form cycles must reject them before
/// generating (see `cmdflag_core::validate_tree`).
///
/// [`sub_commands`]: CommandInfo::sub_commands
pub trait CommandInfo {
    /// Long name (the program name at the root).
    fn long_name(&self) -> &str;
    /// Optional short alias.
    fn short_name(&self) -> Option<&str>;
    /// Flags accepted directly by this command.
    fn flags(&self) -> Vec<&dyn FlagInfo>;
    /// Direct subcommands.
    fn sub_commands(&self) -> Vec<&dyn CommandInfo>;
}

impl FlagInfo for FlagDef {
    fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    fn short_name(&self) -> Option<&str> {
        self.short.as_deref()
    }

    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn enum_values(&self) -> &[String] {
        &self.values
    }
}

impl CommandInfo for CommandDef {
    fn long_name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> Option<&str> {
        self.short.as_deref()
    }

    fn flags(&self) -> Vec<&dyn FlagInfo> {
        self.flags.iter().map(|f| f as &dyn FlagInfo).collect()
    }

    fn sub_commands(&self) -> Vec<&dyn CommandInfo> {
        self.subcommands
            .iter()
            .map(|c| c as &dyn CommandInfo)
            .collect()
    }
}

/// Returns `Some(name)` only for non-empty names.
pub(crate) fn present(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}
