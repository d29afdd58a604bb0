//! Bash script emitter.
//!
//! Static data becomes associative arrays keyed by context path and by
//! `context|flag`; option and enum lists become indexed arrays the runtime
//! reaches through indirect expansion.

use std::fmt::Write as _;
use std::sync::LazyLock;

use cmdflag_core::ValueKind;

use crate::collector::CommandModel;
use crate::config::CompletionConfig;
use crate::escape::{bash_word, escape_bash};
use crate::names::bash_identifier;
use crate::template::Template;

static TEMPLATE: LazyLock<Template> =
    LazyLock::new(|| Template::parse(include_str!("../templates/completion.bash")));

/// Appends the Bash completion script for `program` to `out`.
pub(crate) fn render(
    model: &CommandModel,
    program: &str,
    config: &CompletionConfig,
    out: &mut String,
) {
    let ident = bash_identifier(program);
    let program_word = bash_word(program);

    let mut context_entries = String::new();
    let mut option_arrays = String::new();
    for (idx, (path, options)) in model.all_contexts().enumerate() {
        let _ = writeln!(context_entries, "    [{}]={idx}", escape_bash(path.as_str()));
        let words: Vec<String> = options.iter().map(|o| bash_word(o)).collect();
        let _ = writeln!(
            option_arrays,
            "declare -ga _{ident}_opts_{idx}=({})",
            words.join(" ")
        );
    }

    let mut kind_entries = String::new();
    let mut enum_entries = String::new();
    let mut enum_arrays = String::new();
    let mut enum_count = 0usize;
    for param in &model.flag_params {
        let key = escape_bash(&format!("{}|{}", param.command_path, param.name));
        let _ = writeln!(kind_entries, "    [{key}]={}", param.kind.as_str());
        if param.kind == ValueKind::Enum {
            let _ = writeln!(enum_entries, "    [{key}]={enum_count}");
            let words: Vec<String> = param.enum_options.iter().map(|v| bash_word(v)).collect();
            let _ = writeln!(
                enum_arrays,
                "declare -ga _{ident}_enum_{enum_count}=({})",
                words.join(" ")
            );
            enum_count += 1;
        }
    }

    let fuzzy_enabled = if config.fuzzy_enabled { "1" } else { "0" };
    let max_candidates = config.max_candidates.to_string();
    let min_pattern_length = config.min_pattern_length.to_string();
    let score_threshold = config.score_threshold.to_string();
    let max_results = config.max_results.to_string();
    let cache_max_size = config.cache_max_size.to_string();

    TEMPLATE.render_into(
        out,
        &[
            ("IDENT", ident.as_str()),
            ("PROGRAM", program_word.as_str()),
            ("FUZZY_ENABLED", fuzzy_enabled),
            ("MAX_CANDIDATES", max_candidates.as_str()),
            ("MIN_PATTERN_LENGTH", min_pattern_length.as_str()),
            ("SCORE_THRESHOLD", score_threshold.as_str()),
            ("MAX_RESULTS", max_results.as_str()),
            ("CACHE_MAX_SIZE", cache_max_size.as_str()),
            ("CONTEXT_ENTRIES", context_entries.as_str()),
            ("OPTION_ARRAYS", option_arrays.as_str()),
            ("FLAG_KIND_ENTRIES", kind_entries.as_str()),
            ("FLAG_ENUM_ENTRIES", enum_entries.as_str()),
            ("ENUM_ARRAYS", enum_arrays.as_str()),
        ],
    );
}
