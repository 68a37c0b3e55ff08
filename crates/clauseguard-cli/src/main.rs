//! `clauseguard` command-line entry point.

mod display;
mod report;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use clauseguard_core::{AuthorityChunk, EngineConfig, Rulebook};
use clauseguard_engine::{
    ComplianceVerifier, DecisionEngine, DocumentInput, NarrativeBrief, RedFlagDetector,
    summarize_compliance,
};
use serde::Serialize;
use tracing::Level;

/// Flag non-compliant clauses and missing mandatory clauses in real-estate
/// agreements.
#[derive(Parser, Debug)]
#[command(name = "clauseguard", version, about, long_about = None)]
struct Cli {
    /// Verbose logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON rulebook specification. The built-in rulebook is used when absent.
    #[arg(long, env = "CLAUSEGUARD_RULEBOOK", global = true)]
    rulebook: Option<PathBuf>,

    /// JSON engine configuration.
    #[arg(long, env = "CLAUSEGUARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Fire violation rules only when authority text corroborates them.
    #[arg(long, global = true)]
    require_authority_support: bool,

    /// Print JSON instead of cards.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the rules of the active rulebook.
    Rules {
        /// Print the rulebook specification as JSON.
        #[arg(long)]
        export: bool,
    },

    /// Detect red flags in a single clause (`-` reads stdin).
    Detect {
        clause: PathBuf,

        /// JSON array of authority chunks `{text, source_id}`.
        #[arg(long)]
        authority: Option<PathBuf>,
    },

    /// Check a document for mandatory clauses.
    Check { document: PathBuf },

    /// Evaluate a document input `{full_text, clauses?, query?, authority?, document?}`.
    Evaluate {
        input: PathBuf,

        /// Retrieved context text to prepend to the narrative brief.
        #[arg(long)]
        context: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("clauseguard v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("could not evaluate document: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let rulebook = load_rulebook(cli.rulebook.as_deref())?;
    let mut config = load_config(cli.config.as_deref())?;
    if cli.require_authority_support {
        config.require_authority_support = true;
    }

    match cli.command {
        Commands::Rules { export } => {
            if export || cli.json {
                println!("{}", rulebook.to_spec().to_json_pretty()?);
            } else {
                display::print_rules(&rulebook);
            }
        }
        Commands::Detect { clause, authority } => {
            let text = read_text(&clause)?;
            let authority = match authority {
                Some(path) => load_authority(&path)?,
                None => Vec::new(),
            };
            let findings = RedFlagDetector::new(&rulebook, config.authority_preview_chars).detect(
                &text,
                &authority,
                config.require_authority_support,
            );
            if cli.json {
                print_json(&findings)?;
            } else {
                display::print_findings(&findings);
            }
        }
        Commands::Check { document } => {
            let text = read_text(&document)?;
            let results = ComplianceVerifier::new(&rulebook).verify(&text);
            let summary = summarize_compliance(&results);
            if cli.json {
                print_json(&serde_json::json!({ "results": results, "summary": summary }))?;
            } else {
                display::print_compliance(&results, &summary);
            }
        }
        Commands::Evaluate {
            input: input_path,
            context,
        } => {
            let raw = read_text(&input_path)?;
            let input: DocumentInput = serde_json::from_str(&raw)
                .with_context(|| format!("parsing document input {}", input_path.display()))?;
            let retrieved = match context {
                Some(path) => read_text(&path)?,
                None => String::new(),
            };

            let engine = DecisionEngine::new(rulebook, config);
            let decision = engine.evaluate(&input);
            let brief = NarrativeBrief::build(
                &decision,
                input.query.as_deref().unwrap_or_default(),
                &retrieved,
                engine.config(),
            );

            if cli.json {
                print_json(&report::Report::new(
                    engine.rulebook().version(),
                    &decision,
                    &brief,
                ))?;
            } else {
                display::print_decision(&decision, &brief);
            }
        }
    }

    Ok(())
}

// ── Loading ──

fn load_rulebook(path: Option<&Path>) -> anyhow::Result<Arc<Rulebook>> {
    let rulebook = match path {
        Some(path) => {
            let json = read_text(path)?;
            Rulebook::from_json(&json)
                .with_context(|| format!("loading rulebook {}", path.display()))?
        }
        None => Rulebook::builtin().context("compiling built-in rulebook")?,
    };
    Ok(Arc::new(rulebook))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = read_text(path)?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("parsing engine config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_authority(path: &Path) -> anyhow::Result<Vec<AuthorityChunk>> {
    let json = read_text(path)?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing authority chunks {}", path.display()))
}

/// Read a file, or stdin when the path is `-`.
fn read_text(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detect_with_authority() {
        let cli = Cli::try_parse_from([
            "clauseguard",
            "detect",
            "clause.txt",
            "--authority",
            "chunks.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Detect { clause, authority } => {
                assert_eq!(clause, PathBuf::from("clause.txt"));
                assert_eq!(authority, Some(PathBuf::from("chunks.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "clauseguard",
            "evaluate",
            "input.json",
            "--json",
            "--require-authority-support",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.require_authority_support);
        assert!(matches!(cli.command, Commands::Evaluate { .. }));
    }

    #[test]
    fn parse_rules_export() {
        let cli = Cli::try_parse_from(["clauseguard", "rules", "--export"]).unwrap();
        assert!(matches!(cli.command, Commands::Rules { export: true }));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["clauseguard"]).is_err());
    }

    #[test]
    fn missing_rulebook_file_is_an_error() {
        let err = load_rulebook(Some(Path::new("/nonexistent/rulebook.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("reading /nonexistent/rulebook.json"));
    }

    #[test]
    fn builtin_rulebook_loads_without_a_path() {
        let rulebook = load_rulebook(None).unwrap();
        assert_eq!(rulebook.version(), "2024.1");
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }
}
