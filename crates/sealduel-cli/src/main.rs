use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

use sealduel_core::config::{DuelConfig, REFERENCE_VIEW_COUNT};
use sealduel_core::normalizer::{self, ACCEPTED_FORMATS};
use sealduel_core::source;
use sealduel_core::{validate_source, Scoreboard};

/// Seal Duel — check a student's video against the Saxophone Seal
///
/// Validate the edited page constants, normalize video ids, and compute
/// the comparison the page displays.
#[derive(Parser)]
#[command(name = "sealduel", version, about, long_about = None)]
struct Cli {
    /// Suppress human-readable output on stdout
    #[arg(long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate studentVidID and studentViewCount in a page script (CI)
    Validate {
        /// Path to the page script
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reduce a raw id or URL to its canonical 11-character id
    Normalize {
        /// Raw id, watch/embed/short URL, or id with parameters
        input: String,
    },

    /// Compare a view count against the reference
    Compare {
        /// Subject view count (`_` and `,` separators allowed)
        #[arg(value_parser = parse_count)]
        subject: u64,
        /// Reference view count
        #[arg(long, value_parser = parse_count, default_value_t = REFERENCE_VIEW_COUNT)]
        reference: u64,
        /// Subject video id or URL; when omitted the subject is assumed present
        #[arg(long)]
        video: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the full scoreboard for a page script
    Scoreboard {
        /// Path to the page script
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn parse_count(raw: &str) -> Result<u64, String> {
    source::parse_view_count(raw).map_err(|e| e.to_string())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!(
                "sealduel_core={level},sealduel={level}",
                level = default_level
            ))
        });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn read_source(file: &Path) -> Result<String, i32> {
    std::fs::read_to_string(file).map_err(|e| {
        tracing::error!(path = %file.display(), error = %e, "failed to read source");
        eprintln!("{} cannot read {}: {}", "error:".red().bold(), file.display(), e);
        2
    })
}

fn print_json(value: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("{} serialization failed: {}", "error:".red().bold(), e);
            2
        }
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_validate(file: &Path, json: bool, quiet: bool) -> i32 {
    let text = match read_source(file) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let report = validate_source(&text);
    let code = if report.is_valid() { 0 } else { 1 };

    if json {
        let output = serde_json::json!({
            "valid": report.is_valid(),
            "errors": report.errors().len(),
            "diagnostics": report.diagnostics,
            "raw_video": report.raw_video,
            "video_id": report.video_id,
            "shape": report.shape,
            "view_count": report.view_count,
        });
        return match print_json(&output) {
            0 => code,
            err => err,
        };
    }

    for diagnostic in report.errors() {
        eprintln!("{} {}", "✗".red(), diagnostic);
    }

    if !quiet {
        match (&report.raw_video, &report.video_id) {
            (Some(raw), Some(id)) => {
                println!("{} studentVidID '{}' → {}", "✓".green(), raw, id.as_str().bold());
            }
            (Some(raw), None) => println!("{} studentVidID '{}'", "✗".red(), raw),
            (None, _) => println!("{} studentVidID not found", "✗".red()),
        }
        match (&report.raw_views, report.view_count) {
            (Some(_), Some(count)) => println!(
                "{} studentViewCount {}",
                "✓".green(),
                sealduel_core::format_count(count).bold()
            ),
            (Some(raw), None) => println!("{} studentViewCount '{}'", "✗".red(), raw),
            (None, _) => println!("{} studentViewCount not found", "✗".red()),
        }
        println!();
        if report.is_valid() {
            println!("{}", "All validations passed! Ready for deployment!".green().bold());
        } else {
            println!("{}", "Validation failed! Please fix the errors above.".red().bold());
            println!();
            println!("Accepted id formats:");
            for (label, example) in ACCEPTED_FORMATS {
                println!("  - {}: {}", label, example);
            }
        }
    }

    code
}

fn cmd_normalize(input: &str) -> i32 {
    match normalizer::normalize_with_shape(Some(input)) {
        Some((id, shape)) => {
            tracing::info!(%shape, "normalized identifier");
            println!("{}", id);
            0
        }
        None => {
            eprintln!(
                "{} no 11-character video id found in '{}'",
                "error:".red().bold(),
                input
            );
            1
        }
    }
}

fn cmd_compare(subject: u64, reference: u64, video: Option<String>, json: bool, quiet: bool) -> i32 {
    let config = DuelConfig {
        subject_video: video,
        subject_views: subject,
        reference_views: reference,
        ..DuelConfig::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("{} {}", "error:".red().bold(), e);
        return 1;
    }

    let result = config.comparison();
    let has_video = config.subject_video.is_none() || config.subject_id().is_some();
    let classification = sealduel_core::classify(subject, reference, has_video);

    if json {
        let output = serde_json::json!({
            "comparison": result,
            "classification": classification,
            "message": classification.message(),
            "style": classification.style(),
        });
        return print_json(&output);
    }

    if !quiet {
        println!(
            "subject   {:>14}  {:>7.2}%  ({}%)",
            sealduel_core::format_count(subject),
            result.subject_share,
            result.subject_percent
        );
        println!(
            "reference {:>14}  {:>7.2}%  ({}%)",
            sealduel_core::format_count(reference),
            result.reference_share,
            result.reference_percent
        );
        println!("{}", classification.message());
    }
    0
}

fn cmd_scoreboard(file: &Path, json: bool, quiet: bool) -> i32 {
    let text = match read_source(file) {
        Ok(text) => text,
        Err(code) => return code,
    };
    let board = match source::extract(&text).and_then(|config| Scoreboard::build(&config)) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return 1;
        }
    };

    if json {
        return match serde_json::to_value(&board) {
            Ok(value) => print_json(&value),
            Err(e) => {
                eprintln!("{} serialization failed: {}", "error:".red().bold(), e);
                2
            }
        };
    }

    if !quiet {
        match &board.subject.embed_url {
            Some(url) => println!("video     {}", url),
            None => println!("video     (placeholder: your video goes here!)"),
        }
        println!(
            "subject   {:>14}  {:>5}",
            board.subject.views_label, board.subject.percent_label
        );
        println!(
            "reference {:>14}  {:>5}",
            board.reference.views_label, board.reference.percent_label
        );
        println!("{} [{}]", board.message, board.style);
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Validate { file, json } => cmd_validate(&file, json, cli.quiet),
        Commands::Normalize { input } => cmd_normalize(&input),
        Commands::Compare {
            subject,
            reference,
            video,
            json,
        } => cmd_compare(subject, reference, video, json, cli.quiet),
        Commands::Scoreboard { file, json } => cmd_scoreboard(&file, json, cli.quiet),
        Commands::Version => {
            println!("sealduel {}", env!("CARGO_PKG_VERSION"));
            0
        }
    };

    process::exit(exit_code);
}
