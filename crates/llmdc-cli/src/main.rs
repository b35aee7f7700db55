/// `llmdc`: compile Markdown-like source into LLMD, a compact
/// line-oriented representation meant to cost an LLM fewer tokens than
/// the source it was compiled from.
///
/// ```text
/// llmdc <PATH>... [OPTIONS]
///
/// Options:
///   -o, --output <PATH>        Write to file instead of stdout
///   -c, --compression <0-3>    Override compression level
///       --dict <PATH>          Dictionary JSON (repeatable, c3 only)
///       --scope-mode <MODE>    flat | concat | stacked
///       --keep-urls            Retain URLs at compression >= 2
///       --sentence-split       One emitted line per sentence
///       --anchor-every <N>     Re-emit last @scope every N lines
///       --config <PATH>        Config file (else auto-detected)
/// ```
///
/// Exit code 0 on success; non-zero on a fatal error (unreadable
/// input, no matching files, malformed config or dictionary JSON).
mod discover;

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use llmdc_dict::DictionaryFile;
use llmdc_driver::CompileConfig;

/// Command-line arguments for the `llmdc` compiler.
#[derive(Parser)]
#[command(name = "llmdc", version, about = "Compile Markdown into LLMD")]
struct Cli {
    /// Input files or directories (directories are walked recursively;
    /// only `.md`, `.markdown`, and `.llmd` files are admitted).
    paths: Vec<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the compression level (0-3; 3 only takes effect with
    /// at least one `--dict`).
    #[arg(short, long)]
    compression: Option<u8>,

    /// Dictionary JSON file for c3 substitution. Repeatable.
    #[arg(long = "dict")]
    dicts: Vec<PathBuf>,

    /// Scope resolution strategy: `flat`, `concat`, or `stacked`.
    #[arg(long)]
    scope_mode: Option<String>,

    /// Retain link/image URLs at compression >= 2.
    #[arg(long)]
    keep_urls: bool,

    /// Split prose into one emitted line per sentence.
    #[arg(long)]
    sentence_split: bool,

    /// Re-emit the most recent `@scope` line every N non-scope lines.
    #[arg(long)]
    anchor_every: Option<usize>,

    /// Config file path. Without this flag, `llmdc.config.json` then
    /// `config/llmdc.config.json` are tried in the current directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;

    let files = discover::discover_inputs(&cli.paths)?;
    if files.is_empty() {
        anyhow::bail!("no input files matched (looked for .md, .markdown, .llmd)");
    }

    let dicts = load_dictionaries(&cli.dicts)?;

    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
        sources.push(text);
    }
    let combined = sources.join("\n\n");

    let output = llmdc_driver::compile(&combined, &config, &dicts)?;

    match cli.output {
        Some(path) => fs::write(&path, output).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{output}"),
    }
    Ok(())
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<CompileConfig> {
    let candidate = explicit.map(PathBuf::from).or_else(|| {
        [PathBuf::from("llmdc.config.json"), PathBuf::from("config/llmdc.config.json")]
            .into_iter()
            .find(|p| p.is_file())
    });

    match candidate {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(CompileConfig::default()),
    }
}

fn apply_overrides(config: &mut CompileConfig, cli: &Cli) -> Result<()> {
    if let Some(c) = cli.compression {
        config.compression = c;
    }
    if let Some(mode) = &cli.scope_mode {
        config.scope_mode = mode.parse().map_err(anyhow::Error::msg)?;
    }
    if cli.keep_urls {
        config.keep_urls = true;
    }
    if cli.sentence_split {
        config.sentence_split = true;
    }
    if let Some(n) = cli.anchor_every {
        config.anchor_every = n;
    }
    Ok(())
}

fn load_dictionaries(paths: &[PathBuf]) -> Result<Vec<DictionaryFile>> {
    let mut dicts = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(path).with_context(|| format!("reading dictionary {}", path.display()))?;
        let dict = llmdc_dict::load(&text).with_context(|| format!("parsing dictionary {}", path.display()))?;
        dicts.push(dict);
    }
    Ok(dicts)
}
