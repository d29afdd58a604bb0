//! Drives the generated Bash completion function the way readline would and
//! compares it with the Rust resolver.

mod common;

use cmdflag_complete::{CommandInfo, CompletionConfig, Matcher, collect, complete};
use cmdflag_core::{CommandDef, FlagDef};

use common::{bash_complete, nested_tree, run_bash, sample_tree, script};

fn rust_complete(tree: &CommandDef, words: &[&str]) -> Vec<String> {
    let model = collect(Some(tree as &dyn CommandInfo));
    let mut matcher = Matcher::new(CompletionConfig::default());
    complete(&model, &mut matcher, words).into_items()
}

#[test]
fn enum_value_completion() {
    let script = script(&sample_tree(), "bash");
    let Some(reply) = bash_complete(&script, &["prog", "--mode", "pr"], &std::env::temp_dir())
    else {
        return;
    };
    assert_eq!(reply, vec!["prod"]);
}

#[test]
fn root_prefix_completion() {
    let script = script(&sample_tree(), "bash");
    let Some(reply) = bash_complete(&script, &["prog", "st"], &std::env::temp_dir()) else {
        return;
    };
    assert_eq!(reply, vec!["start", "stop"]);
}

#[test]
fn equals_forms_complete_values() {
    let script = script(&sample_tree(), "bash");
    let cwd = std::env::temp_dir();

    // Word kept whole (`=` not in COMP_WORDBREAKS).
    let Some(reply) = bash_complete(&script, &["prog", "--mode=te"], &cwd) else {
        return;
    };
    assert_eq!(reply, vec!["--mode=test"]);

    // Word split at `=` by readline.
    let reply = bash_complete(&script, &["prog", "--mode", "=", "te"], &cwd).unwrap();
    assert_eq!(reply, vec!["test"]);
    let reply = bash_complete(&script, &["prog", "--mode", "="], &cwd).unwrap();
    assert_eq!(reply, vec!["dev", "prod", "test"]);
}

#[test]
fn matches_rust_resolver() {
    let tree = nested_tree();
    let script = script(&tree, "bash");
    let lines: &[&[&str]] = &[
        &["prog", ""],
        &["prog", "st"],
        &["prog", "ST"],
        &["prog", "sr"],
        &["prog", "--v"],
        &["prog", "-m", ""],
        &["prog", "--verbose", "re"],
        &["prog", "remote", ""],
        &["prog", "r", "--proto", "ht"],
        &["prog", "remote", "rm", ""],
        &["prog", "remote", "--proto", "ssh", "a"],
        &["prog", "nope", "st"],
        &["prog", "rmote", ""],
        &["prog", "--mode=p"],
        &["prog", "--verbose=x"],
    ];

    for words in lines {
        let Some(reply) = bash_complete(&script, words, &std::env::temp_dir()) else {
            return;
        };
        assert_eq!(reply, rust_complete(&tree, words), "words {words:?}");
    }
}

#[test]
fn string_flag_lists_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("alpha")).unwrap();
    std::fs::write(dir.path().join("alpine.txt"), "").unwrap();
    std::fs::write(dir.path().join("beta"), "").unwrap();

    let tree = nested_tree();
    let script = script(&tree, "bash");
    let Some(mut reply) = bash_complete(&script, &["prog", "--config", "al"], dir.path()) else {
        return;
    };
    reply.sort();
    assert_eq!(reply, vec!["alpha/", "alpine.txt"]);
}

#[test]
fn path_listing_hides_dotfiles_and_sorts_like_rust() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".secret"), "").unwrap();
    std::fs::write(dir.path().join("visible"), "").unwrap();
    std::fs::write(dir.path().join("a-b"), "").unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();

    let tree = nested_tree();
    let script = script(&tree, "bash");
    let Some(reply) = bash_complete(&script, &["prog", "--config", ""], dir.path()) else {
        return;
    };
    assert_eq!(reply, vec!["a-b", "a/", "visible"]);

    let reply = bash_complete(&script, &["prog", "--config", ".s"], dir.path()).unwrap();
    assert_eq!(reply, vec![".secret"]);
}

#[test]
fn hostile_names_are_not_executed() {
    let dir = tempfile::tempdir().unwrap();
    let hostile = "a$(touch PWNED)b";
    let tree = CommandDef::new("prog").with_subcommand(
        CommandDef::new(hostile).with_flag(FlagDef::enumeration(None, Some("x"), &["`touch PWNED2`"])),
    );
    let script = script(&tree, "bash");

    let Some(reply) = bash_complete(&script, &["prog", "a"], dir.path()) else {
        return;
    };
    assert_eq!(reply, vec![hostile]);

    let reply = bash_complete(&script, &["prog", hostile, ""], dir.path()).unwrap();
    assert_eq!(reply, vec!["--x"]);

    let reply = bash_complete(&script, &["prog", hostile, "--x", ""], dir.path()).unwrap();
    assert_eq!(reply, vec!["`touch PWNED2`"]);

    assert!(!dir.path().join("PWNED").exists());
    assert!(!dir.path().join("PWNED2").exists());
}

#[test]
fn empty_tree_script_loads() {
    let tree = CommandDef::new("prog");
    let script = script(&tree, "bash");
    let Some(reply) = bash_complete(&script, &["prog", ""], &std::env::temp_dir()) else {
        return;
    };
    assert!(reply.is_empty());
}

#[test]
fn registers_completion_function() {
    let script = script(&sample_tree(), "bash");
    let Some(stdout) = run_bash(&script, "complete -p prog\n", &std::env::temp_dir()) else {
        return;
    };
    assert_eq!(stdout.trim(), "complete -F _prog prog");
}

#[test]
fn debug_function_reports_state() {
    let script = script(&sample_tree(), "bash");
    let Some(stdout) = run_bash(
        &script,
        "_prog_completion_debug prog --mode pr\n",
        &std::env::temp_dir(),
    ) else {
        return;
    };

    assert!(stdout.contains("program: prog\n"));
    assert!(stdout.contains("max_candidates: 150\n"));
    assert!(stdout.contains("contexts: 3\n"));
    assert!(stdout.contains("flag_params: 2\n"));
    assert!(stdout.contains("context: /\n"));
    assert!(stdout.contains("candidate: prod\n"));
}
