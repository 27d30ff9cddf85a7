//! toktab: The token table generator CLI.
//!
//! Usage:
//!   toktab [options] [INPUT]
//!
//! Reads a token specification and writes the token list and token data
//! include files for a hand-written C or C++ lexer.

use clap::{Parser as ClapParser, ValueEnum};
use std::path::Path;
use std::process;
use std::time::Instant;
use toktab_compiler::{Program, ProgramError};
use toktab_diagnostics::{Diagnostic, DiagnosticCollection};
use toktab_options::{
    default_project_file, parse_options_file, GeneratorOptions, PrefixOverlap, Separator, Strategy,
    Target, PROJECT_FILE_NAME,
};

#[derive(ClapParser, Debug)]
#[command(name = "toktab", version, about = "toktab - token tables for hand-written lexers")]
struct Cli {
    /// Token specification file.
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Path to toktab.json.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Target language of the generated tables.
    #[arg(long, value_enum)]
    target: Option<TargetArg>,

    /// How spellings are mapped back to tokens.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Field separator of the token file.
    #[arg(long, value_enum)]
    separator: Option<SeparatorArg>,

    /// Directory the output files are written to.
    #[arg(long = "out-dir")]
    out_dir: Option<String>,

    /// How a spelling that prefixes another one is reported.
    #[arg(long = "prefix-overlap", value_enum)]
    prefix_overlap: Option<OverlapArg>,

    /// Token returned by the linear chain when nothing matches.
    #[arg(long = "no-match")]
    no_match: Option<String>,

    /// Check the token file without writing outputs.
    #[arg(long = "no-emit")]
    no_emit: bool,

    /// Print the generated files instead of writing them.
    #[arg(long)]
    stdout: bool,

    /// Initialize a toktab.json file.
    #[arg(long)]
    init: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TargetArg {
    C,
    Cpp,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrategyArg {
    Trie,
    Linear,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SeparatorArg {
    Tab,
    Space,
    Comma,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OverlapArg {
    Allow,
    Warn,
    Deny,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::C => Target::C,
            TargetArg::Cpp => Target::Cpp,
        }
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Trie => Strategy::Trie,
            StrategyArg::Linear => Strategy::Linear,
        }
    }
}

impl From<SeparatorArg> for Separator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Tab => Separator::Tab,
            SeparatorArg::Space => Separator::Space,
            SeparatorArg::Comma => Separator::Comma,
        }
    }
}

impl From<OverlapArg> for PrefixOverlap {
    fn from(arg: OverlapArg) -> Self {
        match arg {
            OverlapArg::Allow => PrefixOverlap::Allow,
            OverlapArg::Warn => PrefixOverlap::Warn,
            OverlapArg::Deny => PrefixOverlap::Deny,
        }
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.init {
        process::exit(run_init());
    }

    process::exit(run_generate(&cli));
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_generate(cli: &Cli) -> i32 {
    let start = Instant::now();

    let options = match resolve_options(cli) {
        Ok(options) => options,
        Err(report) => {
            print_report(report);
            return 1;
        }
    };
    log::debug!("options: {:?}", options);

    let mut program = Program::new(options);
    if let Err(e) = program.load_input() {
        print_report(miette::Report::new(e));
        return 1;
    }

    let use_color = atty_is_terminal();

    if cli.no_emit {
        return match program.check() {
            Ok(diagnostics) => {
                print_diagnostics(&diagnostics, use_color);
                if diagnostics.has_errors() {
                    print_error_count(diagnostics.error_count(), use_color);
                    2
                } else {
                    0
                }
            }
            Err(e) => {
                print_report(miette::Report::new(e));
                1
            }
        };
    }

    let result = match program.emit() {
        Ok(result) => result,
        Err(ProgramError::Aborted { diagnostics }) => {
            print_diagnostics(&diagnostics, use_color);
            print_error_count(diagnostics.error_count(), use_color);
            return 2;
        }
        Err(e) => {
            print_report(miette::Report::new(e));
            return 1;
        }
    };
    print_diagnostics(&result.diagnostics, use_color);

    if cli.stdout {
        for file in &result.output_files {
            print!("{}", file.text);
        }
    } else if let Err(e) = program.write_output_files(&result) {
        print_report(miette::Report::new(e));
        return 1;
    }

    if use_color {
        eprintln!(
            "{}Generated {} file{} in {:.2}s.{}",
            GRAY,
            result.output_files.len(),
            if result.output_files.len() == 1 { "" } else { "s" },
            start.elapsed().as_secs_f64(),
            RESET
        );
    }

    0
}

/// Project file first, then command-line overrides.
fn resolve_options(cli: &Cli) -> miette::Result<GeneratorOptions> {
    let mut options = if let Some(ref project) = cli.project {
        parse_options_file(project)?
    } else if Path::new(PROJECT_FILE_NAME).exists() {
        parse_options_file(PROJECT_FILE_NAME)?
    } else {
        GeneratorOptions::default()
    };

    if cli.input.is_some() {
        options.input = cli.input.clone();
    }
    if let Some(target) = cli.target {
        options.target = target.into();
    }
    if let Some(strategy) = cli.strategy {
        options.strategy = strategy.into();
    }
    if let Some(separator) = cli.separator {
        options.format.separator = separator.into();
    }
    if cli.out_dir.is_some() {
        options.out_dir = cli.out_dir.clone();
    }
    if let Some(overlap) = cli.prefix_overlap {
        options.prefix_overlap = overlap.into();
    }
    if cli.no_match.is_some() {
        options.no_match = cli.no_match.clone();
    }

    Ok(options)
}

fn run_init() -> i32 {
    let path = Path::new(PROJECT_FILE_NAME);
    if path.exists() {
        print_error("A toktab.json file already exists in the current directory.");
        return 1;
    }

    match std::fs::write(path, default_project_file()) {
        Ok(()) => {
            println!("Successfully created a toktab.json file.");
            0
        }
        Err(e) => {
            print_error(&format!("Failed to create toktab.json: {}", e));
            1
        }
    }
}

fn print_diagnostics(diagnostics: &DiagnosticCollection, use_color: bool) {
    for diag in diagnostics.diagnostics() {
        print_diagnostic(diag, use_color);
        for related in &diag.related_information {
            eprint!("  ");
            print_diagnostic(related, use_color);
        }
    }
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if use_color {
        let color = if diag.is_error() { RED } else { YELLOW };
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}", CYAN, file, RESET);
            if let Some(line) = diag.line {
                eprint!(":{}", line);
            }
            eprint!(": ");
        } else if let Some(line) = diag.line {
            eprint!("line {}: ", line);
        }
        eprintln!(
            "{}{}{}{} {}TT{}{}: {}",
            BOLD, color, diag.category, RESET, CYAN, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn print_error_count(count: usize, use_color: bool) {
    let plural = if count == 1 { "" } else { "s" };
    if use_color {
        eprintln!("\n{}Found {} error{}.{}", RED, count, plural, RESET);
    } else {
        eprintln!("\nFound {} error{}.", count, plural);
    }
}

fn print_report(report: miette::Report) {
    eprintln!("{:?}", report);
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    // On Unix, check whether stderr is a terminal.
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
