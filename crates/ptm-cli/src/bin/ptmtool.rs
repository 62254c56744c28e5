use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ptm_cli::commands::{complete_ops, config_ops, suggest_ops, word_ops};
use ptm_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "ptmtool", about = "Predictive translation memory diagnostics")]
struct Cli {
    /// Write JSONL traces to this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    /// Settings TOML to use instead of the built-in defaults
    #[arg(long, global = true)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the suggestions a segment would display for some typed text
    Suggest {
        /// Translation-service response (JSON) for the text's editing prefix
        response_file: String,
        /// Chunk id of each source token, comma-separated
        #[arg(long)]
        chunks: String,
        /// Text typed so far
        #[arg(long, default_value = "")]
        text: String,
        /// Caret position in characters (default: end of text)
        #[arg(long)]
        caret: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resolve the continuation of one candidate at a target index
    Resolve {
        /// Translation-service response (JSON)
        response_file: String,
        /// Chunk id of each source token, comma-separated
        #[arg(long)]
        chunks: String,
        /// Target token index where the continuation starts
        #[arg(long)]
        index: usize,
        /// Candidate rank to resolve
        #[arg(long, default_value = "0")]
        candidate: usize,
    },
    /// Complete a partial word from a prediction-service response
    Complete {
        /// Prediction-service response (JSON)
        predictions_file: String,
        /// Partial word
        partial: String,
    },
    /// Show word-level alternatives for one source token
    Words {
        /// Word-query response (JSON) for the token
        response_file: String,
        /// Source sentence, whitespace-tokenized
        #[arg(long)]
        source: String,
        /// Source token index to look up
        #[arg(long)]
        index: usize,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _trace = init_tracing(cli.trace_dir.as_deref());

    if let Some(file) = &cli.settings {
        if let Err(e) = config_ops::load_settings(file) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Suggest {
            response_file,
            chunks,
            text,
            caret,
            json,
        } => suggest_ops::suggest_cmd(&response_file, &chunks, &text, caret, json),
        Command::Resolve {
            response_file,
            chunks,
            index,
            candidate,
        } => suggest_ops::resolve_cmd(&response_file, &chunks, index, candidate),
        Command::Complete {
            predictions_file,
            partial,
        } => complete_ops::complete_cmd(&predictions_file, &partial),
        Command::Words {
            response_file,
            source,
            index,
        } => word_ops::words_cmd(&response_file, &source, index),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
