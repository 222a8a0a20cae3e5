//! vchk command-line front end.
//!
//! Parses a bcftools stats report, writes each requested section to
//! `<OUT_DIR>/<code>/<code>.txt` (and `.json` with `--json`), then echoes the
//! summary numbers to stdout. `--gzip` compresses the exported files.
//! Diagnostics go to stderr.

use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use vchk::formats::vchk::{describe, is_known, write_raw, write_section_json, write_section_text};
use vchk::io::Encoding;
use vchk::{StatsParser, KNOWN_SECTIONS};

#[derive(Parser)]
#[command(name = "vchk", version)]
#[command(about = "Split a bcftools stats (.vchk) report into per-section text and JSON files")]
#[command(long_about = None)]
#[command(after_help = section_help())]
struct Args {
    /// Input report (.vchk, optionally gzipped)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (created if missing)
    #[arg(value_name = "OUT_DIR")]
    out_dir: PathBuf,

    /// Section to export (repeatable, case-insensitive)
    #[arg(long, short = 's', value_name = "CODE", value_parser = parse_code)]
    section: Vec<String>,

    /// Export every known section
    #[arg(long, short = 'a')]
    all: bool,

    /// Section to leave out when using --all (repeatable)
    #[arg(long, short = 'x', value_name = "CODE", value_parser = parse_code)]
    exclude: Vec<String>,

    /// Also write each section's table as JSON
    #[arg(long)]
    json: bool,

    /// Gzip the exported files (<code>.txt.gz, <code>.json.gz)
    #[arg(long, short = 'z')]
    gzip: bool,

    /// Warn about superfluous input and log each step
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn section_help() -> String {
    let mut help = String::from("Sections:\n");
    for (code, description) in KNOWN_SECTIONS {
        help.push_str(&format!("  {code:<6}{description}\n"));
    }
    help
}

fn parse_code(code: &str) -> Result<String, String> {
    if is_known(code) {
        Ok(code.to_lowercase())
    } else {
        let known: Vec<_> = KNOWN_SECTIONS.iter().map(|(c, _)| *c).collect();
        Err(format!("unknown section '{code}' (expected one of: {})", known.join(", ")))
    }
}

impl Args {
    fn encoding(&self) -> Encoding {
        if self.gzip {
            Encoding::Gzip
        } else {
            Encoding::Plain
        }
    }

    /// Sections to export, in the order of [`KNOWN_SECTIONS`].
    fn actions(&self) -> Vec<String> {
        if self.all {
            if !self.section.is_empty() {
                log::warn!("Unnecessary section flags while --all is set");
            }
            KNOWN_SECTIONS
                .iter()
                .map(|(code, _)| code.to_string())
                .filter(|code| !self.exclude.contains(code))
                .collect()
        } else {
            if self.section.is_empty() {
                log::warn!("No sections have been chosen, only the summary will be printed");
            }
            if !self.exclude.is_empty() {
                log::warn!("--exclude has no effect without --all");
            }
            KNOWN_SECTIONS
                .iter()
                .map(|(code, _)| code.to_string())
                .filter(|code| self.section.contains(code))
                .collect()
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> vchk::Result<()> {
    let actions = args.actions();
    let stats = StatsParser::new()
        .with_sections(&actions)
        .parse_path(&args.input)?;

    for failure in stats.failures() {
        log::error!("Could not parse section {} properly", failure.code);
    }

    if args.out_dir.is_dir() {
        log::warn!("Output folder already exists, program will overwrite");
    } else {
        fs::create_dir_all(&args.out_dir)?;
    }

    let encoding = args.encoding();
    for code in &actions {
        let Some(section) = stats.section(code) else {
            if !stats.failed(code) {
                log::warn!(
                    "Section {} ({}) not present in input",
                    code,
                    describe(code).unwrap_or("unknown")
                );
            }
            continue;
        };

        // One section failing to write should not stop the rest
        if let Err(e) = write_section_text(&args.out_dir, section, encoding) {
            log::error!("Could not write section {code}: {e}");
            continue;
        }
        if args.json {
            if let Err(e) = write_section_json(&args.out_dir, section, encoding) {
                log::error!("Could not write section {code} as JSON: {e}");
            }
        }
    }

    // The raw text carries its own line endings
    if let Some(summary) = stats.summary() {
        let mut stdout = io::stdout().lock();
        write_raw(&mut stdout, summary)?;
        stdout.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_actions_follow_known_order() {
        let args = Args::parse_from(["vchk", "in.vchk", "out", "-s", "DP", "-s", "tstv"]);
        assert_eq!(args.actions(), vec!["tstv", "dp"]);
    }

    #[test]
    fn test_all_with_exclusions() {
        let args = Args::parse_from(["vchk", "in.vchk", "out", "-a", "-x", "psc", "-x", "HWE"]);
        let actions = args.actions();
        assert_eq!(actions.len(), KNOWN_SECTIONS.len() - 2);
        assert!(!actions.contains(&"psc".to_string()));
        assert!(!actions.contains(&"hwe".to_string()));
        assert!(actions.contains(&"sn".to_string()));
    }

    #[test]
    fn test_gzip_flag_selects_encoding() {
        let args = Args::parse_from(["vchk", "in.vchk", "out", "-z"]);
        assert_eq!(args.encoding(), Encoding::Gzip);

        let args = Args::parse_from(["vchk", "in.vchk", "out"]);
        assert_eq!(args.encoding(), Encoding::Plain);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(Args::try_parse_from(["vchk", "in.vchk", "out", "-s", "nope"]).is_err());
    }
}
