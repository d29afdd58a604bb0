//! PowerShell script emitter.
//!
//! Static data becomes an array of hashtables per context and per flag
//! parameter. The runtime turns them into ordinal dictionaries on first use.

use std::fmt::Write as _;
use std::sync::LazyLock;

use crate::collector::CommandModel;
use crate::config::CompletionConfig;
use crate::escape::{escape_powershell, powershell_literal};
use crate::names::powershell_name;
use crate::template::Template;

static TEMPLATE: LazyLock<Template> =
    LazyLock::new(|| Template::parse(include_str!("../templates/completion.ps1")));

fn literal_array<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let literals: Vec<String> = items.into_iter().map(|item| powershell_literal(item)).collect();
    format!("@({})", literals.join(", "))
}

/// Appends the PowerShell completion script for `program` to `out`.
pub(crate) fn render(
    model: &CommandModel,
    program: &str,
    config: &CompletionConfig,
    out: &mut String,
) {
    let name = powershell_name(program);
    let program_text = escape_powershell(program);

    let mut contexts = String::new();
    for (path, options) in model.all_contexts() {
        let _ = writeln!(
            contexts,
            "        @{{ Path = {}; Options = {} }}",
            powershell_literal(path.as_str()),
            literal_array(options)
        );
    }

    let mut flag_params = String::new();
    for param in &model.flag_params {
        let _ = writeln!(
            flag_params,
            "        @{{ Path = {}; Name = {}; Requirement = '{}'; Kind = '{}'; Options = {} }}",
            powershell_literal(param.command_path.as_str()),
            powershell_literal(&param.name),
            param.requirement.as_str(),
            param.kind.as_str(),
            literal_array(&param.enum_options)
        );
    }

    let fuzzy_enabled = if config.fuzzy_enabled { "$true" } else { "$false" };
    let max_candidates = config.max_candidates.to_string();
    let min_pattern_length = config.min_pattern_length.to_string();
    let score_threshold = config.score_threshold.to_string();
    let max_results = config.max_results.to_string();
    let cache_max_size = config.cache_max_size.to_string();

    TEMPLATE.render_into(
        out,
        &[
            ("NAME", name.as_str()),
            ("PROGRAM", program_text.as_str()),
            ("FUZZY_ENABLED", fuzzy_enabled),
            ("MAX_CANDIDATES", max_candidates.as_str()),
            ("MIN_PATTERN_LENGTH", min_pattern_length.as_str()),
            ("SCORE_THRESHOLD", score_threshold.as_str()),
            ("MAX_RESULTS", max_results.as_str()),
            ("CACHE_MAX_SIZE", cache_max_size.as_str()),
            ("CONTEXTS", contexts.as_str()),
            ("FLAG_PARAMS", flag_params.as_str()),
        ],
    );
}
