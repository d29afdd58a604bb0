//! Builds the normalized completion model from a command tree.
//!
//! The walk is breadth-first from the root's children. A node with both a
//! long and a short name is visited once per alias, so each alias gets its
//! own [`ContextPath`] and typing either one resolves to the same options.
//!
//! The tree must be acyclic. The walk does not re-check this; callers that
//! accept trees from an untrusted registry should run
//! `cmdflag_core::validate_tree` first.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;

use cmdflag_core::ValueKind;
use tracing::debug;

use crate::capability::{CommandInfo, present};

/// Normalized key of one node in the command tree.
///
/// Always starts and ends with `/`; the root is `/`.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::ContextPath;
///
/// let root = ContextPath::root();
/// let sub = root.child("remote").child("add");
/// assert_eq!(root.as_str(), "/");
/// assert_eq!(sub.as_str(), "/remote/add/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextPath(String);

impl ContextPath {
    /// The root context, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// The context reached by typing `name` in this context.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}{name}/", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a flag must be followed by a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgRequirement {
    /// The flag consumes the next word (string and enum flags).
    Required,
    /// The flag is a switch.
    None,
}

impl ArgRequirement {
    fn for_kind(kind: ValueKind) -> Self {
        if kind.takes_value() {
            Self::Required
        } else {
            Self::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::None => "none",
        }
    }
}

/// One completable flag name in one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagParam {
    /// Context the flag is accepted in.
    pub command_path: ContextPath,
    /// Dashed name (`--mode` or `-m`).
    pub name: String,
    pub requirement: ArgRequirement,
    pub kind: ValueKind,
    /// Allowed values for enum flags.
    pub enum_options: Vec<String>,
}

/// Output of [`collect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandModel {
    /// Options completable at the root.
    pub root_options: BTreeSet<String>,
    /// Options per non-root context. Every reachable context has an entry,
    /// even when it offers nothing.
    pub contexts: BTreeMap<ContextPath, BTreeSet<String>>,
    /// Flag parameters, unique by `(command_path, name)`, in walk order.
    pub flag_params: Vec<FlagParam>,
}

impl CommandModel {
    /// Every context with its options, root first.
    pub fn all_contexts(&self) -> impl Iterator<Item = (ContextPath, &BTreeSet<String>)> {
        std::iter::once((ContextPath::root(), &self.root_options))
            .chain(self.contexts.iter().map(|(path, opts)| (path.clone(), opts)))
    }

    /// Options offered in `path`, if the context exists.
    pub fn options(&self, path: &ContextPath) -> Option<&BTreeSet<String>> {
        if path.is_root() {
            Some(&self.root_options)
        } else {
            self.contexts.get(path)
        }
    }

    /// Returns `true` if `path` names a reachable context.
    pub fn has_context(&self, path: &ContextPath) -> bool {
        path.is_root() || self.contexts.contains_key(path)
    }

    /// Looks up the flag parameter `name` accepted in `path`.
    pub fn flag_param(&self, path: &ContextPath, name: &str) -> Option<&FlagParam> {
        self.flag_params
            .iter()
            .find(|param| &param.command_path == path && param.name == name)
    }

    /// Number of contexts including the root.
    pub fn context_count(&self) -> usize {
        self.contexts.len() + 1
    }
}

/// Walks a command tree and builds its [`CommandModel`].
///
/// A missing root yields an empty model.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::{CommandInfo, ContextPath, collect};
/// use cmdflag_core::{CommandDef, FlagDef};
///
/// let tree = CommandDef::new("app")
///     .with_flag(FlagDef::boolean(Some("v"), Some("verbose")))
///     .with_subcommand(CommandDef::new("start").with_short("s"));
///
/// let model = collect(Some(&tree as &dyn CommandInfo));
/// assert!(model.root_options.contains("--verbose"));
/// assert!(model.root_options.contains("s"));
/// assert!(model.has_context(&ContextPath::root().child("start")));
/// assert!(model.has_context(&ContextPath::root().child("s")));
/// ```
pub fn collect(root: Option<&dyn CommandInfo>) -> CommandModel {
    let mut model = CommandModel::default();
    let Some(root) = root else {
        return model;
    };

    let mut seen_params: HashSet<(ContextPath, String)> = HashSet::new();
    let root_path = ContextPath::root();
    model.root_options = direct_options(root);
    push_flag_params(&mut model.flag_params, &mut seen_params, &root_path, root);

    let mut queue: VecDeque<(ContextPath, &dyn CommandInfo)> = VecDeque::new();
    enqueue_children(&mut queue, &root_path, root);

    while let Some((path, node)) = queue.pop_front() {
        model
            .contexts
            .entry(path.clone())
            .or_default()
            .extend(direct_options(node));
        push_flag_params(&mut model.flag_params, &mut seen_params, &path, node);
        enqueue_children(&mut queue, &path, node);
    }

    debug!(
        contexts = model.context_count(),
        flag_params = model.flag_params.len(),
        "Collected completion model"
    );
    model
}

fn enqueue_children<'a>(
    queue: &mut VecDeque<(ContextPath, &'a dyn CommandInfo)>,
    parent: &ContextPath,
    node: &'a dyn CommandInfo,
) {
    for child in node.sub_commands() {
        let aliases = [present(Some(child.long_name())), present(child.short_name())];
        for alias in aliases.into_iter().flatten() {
            queue.push_back((parent.child(alias), child));
        }
    }
}

fn direct_options(node: &dyn CommandInfo) -> BTreeSet<String> {
    let mut options = BTreeSet::new();
    for flag in node.flags() {
        if let Some(long) = present(flag.long_name()) {
            options.insert(format!("--{long}"));
        }
        if let Some(short) = present(flag.short_name()) {
            options.insert(format!("-{short}"));
        }
    }
    for child in node.sub_commands() {
        if let Some(long) = present(Some(child.long_name())) {
            options.insert(long.to_string());
        }
        if let Some(short) = present(child.short_name()) {
            options.insert(short.to_string());
        }
    }
    options
}

fn push_flag_params(
    params: &mut Vec<FlagParam>,
    seen: &mut HashSet<(ContextPath, String)>,
    path: &ContextPath,
    node: &dyn CommandInfo,
) {
    for flag in node.flags() {
        let kind = flag.value_kind();
        let names = [
            present(flag.long_name()).map(|long| format!("--{long}")),
            present(flag.short_name()).map(|short| format!("-{short}")),
        ];
        for name in names.into_iter().flatten() {
            if !seen.insert((path.clone(), name.clone())) {
                continue;
            }
            let enum_options = if kind == ValueKind::Enum {
                flag.enum_values().to_vec()
            } else {
                Vec::new()
            };
            params.push(FlagParam {
                command_path: path.clone(),
                name,
                requirement: ArgRequirement::for_kind(kind),
                kind,
                enum_options,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use cmdflag_core::{CommandDef, FlagDef};

    use super::*;

    fn model_of(tree: &CommandDef) -> CommandModel {
        collect(Some(tree as &dyn CommandInfo))
    }

    #[test]
    fn test_collect_none_is_empty() {
        let model = collect(None);
        assert_eq!(model, CommandModel::default());
        assert_eq!(model.context_count(), 1);
    }

    #[test]
    fn test_root_options_include_flags_and_subcommands() {
        let tree = CommandDef::new("prog")
            .with_flag(FlagDef::enumeration(Some("m"), Some("mode"), &["dev", "prod"]))
            .with_subcommand(CommandDef::new("start").with_short("s"))
            .with_subcommand(CommandDef::new("stop"));
        let model = model_of(&tree);

        let root: Vec<&str> = model.root_options.iter().map(String::as_str).collect();
        assert_eq!(root, vec!["--mode", "-m", "s", "start", "stop"]);
    }

    #[test]
    fn test_aliases_get_separate_contexts_with_same_options() {
        let tree = CommandDef::new("prog").with_subcommand(
            CommandDef::new("remote")
                .with_short("r")
                .with_flag(FlagDef::boolean(None, Some("force")))
                .with_subcommand(CommandDef::new("add")),
        );
        let model = model_of(&tree);

        let long = ContextPath::root().child("remote");
        let short = ContextPath::root().child("r");
        assert_eq!(model.options(&long), model.options(&short));
        assert!(model.has_context(&long.child("add")));
        assert!(model.has_context(&short.child("add")));
        assert_eq!(model.context_count(), 5);
    }

    #[test]
    fn test_empty_leaf_still_gets_context() {
        let tree = CommandDef::new("prog").with_subcommand(CommandDef::new("leaf"));
        let model = model_of(&tree);

        let leaf = ContextPath::root().child("leaf");
        assert_eq!(model.options(&leaf).map(BTreeSet::len), Some(0));
    }

    #[test]
    fn test_same_flag_under_two_paths_gives_two_params() {
        let tree = CommandDef::new("prog")
            .with_subcommand(CommandDef::new("a").with_flag(FlagDef::string(None, Some("out"))))
            .with_subcommand(CommandDef::new("b").with_flag(FlagDef::string(None, Some("out"))));
        let model = model_of(&tree);

        let outs: Vec<&str> = model
            .flag_params
            .iter()
            .filter(|p| p.name == "--out")
            .map(|p| p.command_path.as_str())
            .collect();
        assert_eq!(outs, vec!["/a/", "/b/"]);
    }

    #[test]
    fn test_revisited_path_yields_one_param() {
        // Short alias equal to the long name enqueues the same path twice.
        let tree = CommandDef::new("prog").with_subcommand(
            CommandDef::new("run")
                .with_short("run")
                .with_flag(FlagDef::enumeration(Some("l"), Some("level"), &["1", "2"])),
        );
        let model = model_of(&tree);

        let run = ContextPath::root().child("run");
        let level: Vec<&FlagParam> = model
            .flag_params
            .iter()
            .filter(|p| p.command_path == run && p.name == "--level")
            .collect();
        assert_eq!(level.len(), 1);
        assert_eq!(level[0].enum_options, vec!["1", "2"]);
        assert_eq!(model.flag_params.len(), 2);
    }

    #[test]
    fn test_flag_param_requirement_follows_kind() {
        let tree = CommandDef::new("prog")
            .with_flag(FlagDef::boolean(Some("v"), None))
            .with_flag(FlagDef::string(None, Some("config")));
        let model = model_of(&tree);
        let root = ContextPath::root();

        let verbose = model.flag_param(&root, "-v").unwrap();
        assert_eq!(verbose.requirement, ArgRequirement::None);
        assert!(verbose.enum_options.is_empty());

        let config = model.flag_param(&root, "--config").unwrap();
        assert_eq!(config.requirement, ArgRequirement::Required);
        assert_eq!(config.kind, ValueKind::String);
    }

    #[test]
    fn test_non_enum_flags_drop_stray_values() {
        let mut flag = FlagDef::string(None, Some("name"));
        flag.values = vec!["ignored".to_string()];
        let tree = CommandDef::new("prog").with_flag(flag);
        let model = model_of(&tree);

        assert!(model.flag_params[0].enum_options.is_empty());
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let tree = CommandDef::new("prog")
            .with_flag(FlagDef::boolean(Some(""), Some("all")))
            .with_subcommand(CommandDef::new("go").with_short(""));
        let model = model_of(&tree);

        assert!(!model.root_options.contains("-"));
        assert!(!model.has_context(&ContextPath::root().child("")));
        assert_eq!(model.context_count(), 2);
    }
}
