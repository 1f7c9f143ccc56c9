//! Marrow CLI - Collect prioritized project context for LLM assistants.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use marrow::builder::{ContextBuilder, DEFAULT_MAX_EMBEDDED_FILES};
use marrow::errors::{exit_code, MarrowError};
use marrow::filter::match_pattern;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "marrow")]
#[command(about = "Collect prioritized project context for LLM assistants")]
#[command(version)]
struct Cli {
    /// Root directory of the project
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Additional exclusion pattern, matched against file and directory
    /// names (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Embed file contents in full
    #[arg(long)]
    no_truncate: bool,

    /// Maximum number of files whose content is embedded
    #[arg(long, default_value_t = DEFAULT_MAX_EMBEDDED_FILES)]
    max_files: usize,

    /// Emit a JSON manifest instead of the text document
    #[arg(long)]
    json: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum)]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "marrow", &mut std::io::stdout());
        return;
    }

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let json_output = cli.json;

    if let Err(e) = run(cli) {
        if json_output {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }

            let payload = ErrorOutput {
                error: e.to_string(),
            };

            let json = serde_json::to_string(&payload)
                .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
            eprintln!("{json}");
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<(), MarrowError> {
    let mut builder = ContextBuilder::new(&cli.path).max_embedded_files(cli.max_files);
    if cli.no_truncate {
        builder = builder.no_truncation();
    }

    for pattern in cli.exclude {
        builder.add_filter(format!("cli:{pattern}"), move |path| {
            path.file_name()
                .map(|n| n.to_string_lossy())
                .is_some_and(|name| match_pattern(&name, &pattern))
        });
    }

    let result = builder.build()?;

    log::info!(
        "collected {} files, embedding {}",
        result.total_files,
        result.records.len()
    );

    let payload = if cli.json {
        let mut json = serde_json::to_string_pretty(&result.manifest())?;
        json.push('\n');
        json
    } else {
        result.render()
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, payload).map_err(|source| MarrowError::WriteOutput {
                path: path.clone(),
                source,
            })?;
            log::info!("wrote context to {}", path.display());
        }
        None => print!("{payload}"),
    }

    Ok(())
}
