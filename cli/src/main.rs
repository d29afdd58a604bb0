use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cmdflag_complete::{
    Completion, CommandInfo, CompletionConfig, Matcher, Shell, collect, complete, compute_score,
    write_script,
};
use cmdflag_core::{CommandDef, load_tree, validate_tree};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "cmdflag")]
#[command(about = "Generate and inspect offline shell completion scripts")]
#[command(version)]
struct Cli {
    /// Log debug details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a completion script from a command tree file.
    Generate(GenerateArgs),
    /// Validate one or more command tree files.
    Validate(ValidateArgs),
    /// Rank candidates against a pattern with the completion matcher.
    Score(ScoreArgs),
    /// Print the context paths and flag parameters of a command tree.
    Contexts(ContextsArgs),
    /// Complete a command line the way the generated scripts would.
    Complete(CompleteArgs),
}

/// Matcher tunables shared by the subcommands that rank candidates.
#[derive(Debug, Args)]
struct TuningArgs {
    /// YAML file with matcher tunables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Disable the fuzzy-score tier.
    #[arg(long)]
    no_fuzzy: bool,
    /// Candidate count above which only prefix matching runs.
    #[arg(long)]
    max_candidates: Option<usize>,
    /// Shortest pattern the fuzzy tier accepts.
    #[arg(long)]
    min_pattern_length: Option<usize>,
    /// Minimum fuzzy score (0-100).
    #[arg(long)]
    score_threshold: Option<u32>,
    /// Maximum number of fuzzy results.
    #[arg(long)]
    max_results: Option<usize>,
    /// Score memo size bound.
    #[arg(long)]
    cache_max_size: Option<usize>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Target shell: bash, pwsh, or powershell.
    #[arg(long)]
    shell: String,
    /// Command tree file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long)]
    input: PathBuf,
    /// Write the script here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Skip structural validation of the tree.
    #[arg(long)]
    skip_validation: bool,
    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Command tree files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ScoreArgs {
    /// Typed pattern.
    #[arg(long, allow_hyphen_values = true)]
    pattern: String,
    /// Candidates to rank.
    #[arg(allow_hyphen_values = true)]
    candidates: Vec<String>,
    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(Debug, Args)]
struct ContextsArgs {
    /// Command tree file.
    #[arg(long)]
    input: PathBuf,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CompleteArgs {
    /// Command tree file.
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    tuning: TuningArgs,
    /// Command line words, program name first; the last word is completed.
    #[arg(last = true)]
    words: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::Score(args) => run_score(args),
        Command::Contexts(args) => run_contexts(args),
        Command::Complete(args) => run_complete(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let shell: Shell = args.shell.parse().map_err(|err| format!("{err}"))?;
    let config = resolve_config(&args.tuning)?;
    let tree = load_checked(&args.input, !args.skip_validation)?;
    let root = Some(&tree as &dyn CommandInfo);

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            let mut file = fs::File::create(path)
                .map_err(|err| format!("Failed to create '{}': {err}", path.display()))?;
            write_script(&mut file, root, shell, &config).map_err(|err| err.to_string())?;
            eprintln!(
                "Wrote {shell} completion for '{}' to '{}'.",
                tree.name,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_script(&mut lock, root, shell, &config).map_err(|err| err.to_string())?;
        }
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;
    for path in &args.inputs {
        match load_checked(path, true) {
            Ok(tree) => println!(
                "{}: ok ({} command(s))",
                path.display(),
                tree.node_count()
            ),
            Err(err) => {
                eprintln!("{err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} command tree file(s) failed validation",
            args.inputs.len()
        ));
    }
    println!("Validated {} command tree file(s).", args.inputs.len());
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), String> {
    let config = resolve_config(&args.tuning)?;
    let mut matcher = Matcher::new(config);
    let (tier, matches) = matcher.filter_with_tier(&args.pattern, &args.candidates);

    match tier {
        Some(tier) => println!("tier: {tier}"),
        None => println!("tier: none"),
    }
    for candidate in matches {
        println!("{:>3}  {candidate}", compute_score(&args.pattern, &candidate));
    }
    Ok(())
}

fn run_contexts(args: ContextsArgs) -> Result<(), String> {
    let tree = load_checked(&args.input, false)?;
    let model = collect(Some(&tree as &dyn CommandInfo));

    if args.json {
        let contexts: Vec<serde_json::Value> = model
            .all_contexts()
            .map(|(path, options)| {
                serde_json::json!({
                    "path": path.as_str(),
                    "options": options,
                })
            })
            .collect();
        let flag_params: Vec<serde_json::Value> = model
            .flag_params
            .iter()
            .map(|param| {
                serde_json::json!({
                    "path": param.command_path.as_str(),
                    "name": param.name,
                    "requirement": param.requirement.as_str(),
                    "kind": param.kind.as_str(),
                    "options": param.enum_options,
                })
            })
            .collect();
        let raw = serde_json::to_string_pretty(&serde_json::json!({
            "contexts": contexts,
            "flag_params": flag_params,
        }))
        .map_err(|err| format!("Failed to serialize contexts: {err}"))?;
        println!("{raw}");
        return Ok(());
    }

    let mut out = std::io::stdout().lock();
    let write_err = |err: std::io::Error| format!("Failed to write output: {err}");
    writeln!(out, "Contexts:").map_err(write_err)?;
    for (path, options) in model.all_contexts() {
        let options: Vec<&str> = options.iter().map(String::as_str).collect();
        writeln!(out, "  {path}  {}", options.join(" ")).map_err(write_err)?;
    }
    writeln!(out, "Flag parameters:").map_err(write_err)?;
    for param in &model.flag_params {
        let mut line = format!(
            "  {}  {}  {}  {}",
            param.command_path,
            param.name,
            param.kind.as_str(),
            param.requirement.as_str()
        );
        if !param.enum_options.is_empty() {
            line.push_str(&format!("  [{}]", param.enum_options.join(", ")));
        }
        writeln!(out, "{line}").map_err(write_err)?;
    }
    Ok(())
}

fn run_complete(args: CompleteArgs) -> Result<(), String> {
    let config = resolve_config(&args.tuning)?;
    let tree = load_checked(&args.input, false)?;
    let model = collect(Some(&tree as &dyn CommandInfo));
    let mut matcher = Matcher::new(config);

    let mut words = args.words;
    if words.is_empty() {
        words.push(tree.name.clone());
    }
    if words.len() == 1 {
        words.push(String::new());
    }

    let completion = complete(&model, &mut matcher, &words);
    debug!(
        paths = matches!(completion, Completion::Paths(_)),
        count = completion.items().len(),
        "Completed command line"
    );
    for item in completion.items() {
        println!("{item}");
    }
    Ok(())
}

/// Loads a tree, optionally rejecting it when validation finds problems.
fn load_checked(path: &Path, validate: bool) -> Result<CommandDef, String> {
    let tree = load_tree(path).map_err(|err| format!("{}: {err}", path.display()))?;
    if validate {
        let errors = validate_tree(&tree);
        if let Some(first) = errors.first() {
            return Err(format!("{}: {first}", path.display()));
        }
    }
    Ok(tree)
}

/// Builds the matcher config from an optional file plus flag overrides.
fn resolve_config(tuning: &TuningArgs) -> Result<CompletionConfig, String> {
    let mut config = match &tuning.config {
        Some(path) => CompletionConfig::load(path)
            .map_err(|err| format!("{}: {err}", path.display()))?,
        None => CompletionConfig::default(),
    };

    if tuning.no_fuzzy {
        config.fuzzy_enabled = false;
    }
    if let Some(value) = tuning.max_candidates {
        config.max_candidates = value;
    }
    if let Some(value) = tuning.min_pattern_length {
        config.min_pattern_length = value;
    }
    if let Some(value) = tuning.score_threshold {
        config.score_threshold = value;
    }
    if let Some(value) = tuning.max_results {
        config.max_results = value;
    }
    if let Some(value) = tuning.cache_max_size {
        config.cache_max_size = value;
    }

    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}
