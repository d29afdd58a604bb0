//! Command tree types and structural validation.
//!
//! This crate defines the data model an application uses to describe its
//! command-line surface:
//!
//! - [`CommandDef`]: a command with a long name, optional short alias,
//!   flags, and nested subcommands.
//! - [`FlagDef`]: a flag with short/long forms and a [`ValueKind`].
//!
//! Validation ([`validate_tree`]) catches malformed flag names, duplicate
//! names within a scope, and subcommand recursion. Trees load from JSON or
//! YAML with [`load_tree`].
//!
//! # Example
//!
//! ```
//! use cmdflag_core::*;
//!
//! let tree = CommandDef::new("deploy")
//!     .with_flag(FlagDef::boolean(Some("v"), Some("verbose")))
//!     .with_flag(FlagDef::enumeration(Some("m"), Some("mode"), &["dev", "prod", "test"]))
//!     .with_subcommand(
//!         CommandDef::new("start").with_flag(FlagDef::string(None, Some("config"))),
//!     );
//!
//! assert_eq!(tree.node_count(), 2);
//! assert!(validate_tree(&tree).is_empty());
//! ```

mod load;
mod types;
mod validate;

pub use load::{Result, TreeError, load_tree};
pub use types::*;
pub use validate::{ValidationError, validate_tree};
