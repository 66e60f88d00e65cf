mod config;
mod test_runner;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use crate::config::{EncodingChoice, RunConfig};

const SUBCOMMANDS: &[&str] = &["run", "eval", "test", "help"];

#[derive(Parser)]
#[command(name = "fizzbuzz", version, about = "FizzBuzz by embedding a tiny command language")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the FizzBuzz sequence
    Run(RunArgs),

    /// Interpret a program source file
    Eval(EvalArgs),

    /// Run .test.md test files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// First number (default 1)
    #[arg(short, long)]
    start: Option<u64>,

    /// Last number, inclusive (default 20)
    #[arg(short, long)]
    end: Option<u64>,

    /// Program encoding: direct, structures, continuation, or all
    #[arg(long)]
    encoding: Option<EncodingChoice>,

    /// TOML file with start, end and encoding; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct EvalArgs {
    /// Program source file
    file: String,

    /// Parse only, don't execute (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Print the parsed program in canonical form instead of running it
    #[arg(long)]
    show: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let args = normalize_args(std::env::args().collect());
    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(run_args) => do_run(run_args),
        Command::Eval(eval_args) => do_eval(eval_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// `fizzbuzz prog.fb` is shorthand for `fizzbuzz eval prog.fb`, and a bare
/// `fizzbuzz` (flags only, no help or version request) means `fizzbuzz run`.
fn normalize_args(mut args: Vec<String>) -> Vec<String> {
    let first_pos = args
        .iter()
        .skip(1)
        .position(|a| !a.starts_with('-'))
        .map(|i| i + 1);
    match first_pos {
        Some(pos) => {
            if !SUBCOMMANDS.contains(&args[pos].as_str()) {
                args.insert(pos, "eval".to_string());
            }
        }
        None => {
            let wants_info = args
                .iter()
                .skip(1)
                .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));
            if !wants_info {
                args.push("run".to_string());
            }
        }
    }
    args
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn do_run(args: RunArgs) {
    let config = match &args.config {
        Some(path) => match RunConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
        None => RunConfig::default(),
    };

    let (range, encodings) = match config.resolve(args.start, args.end, args.encoding) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match encodings.as_slice() {
        [encoding] => interpreter::run_range(&range, *encoding, &mut stdout),
        all => interpreter::run_encodings(&range, all, &mut stdout),
    };
    if let Err(e) = result {
        eprintln!("runtime error: {}", e);
        process::exit(1);
    }
}

fn do_eval(args: EvalArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let parser = dsl::parser::Parser::new(source, file_id);
    let program = match parser.parse() {
        Ok(p) => p,
        Err(errors) => {
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            for error in &errors {
                let diagnostic = error.to_diagnostic();
                let _ =
                    term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            }
            process::exit(1);
        }
    };

    if args.check {
        eprintln!("ok: {} parsed successfully", args.file);
        return;
    }

    let mut stdout = std::io::stdout().lock();
    let result = if args.show {
        writeln!(stdout, "{}", program).map_err(interpreter::RuntimeError::from)
    } else {
        interpreter::run_program(&program, &mut stdout)
    };

    if let Err(e) = result {
        eprintln!("runtime error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn bare_invocation_runs() {
        assert_eq!(normalized(&["fizzbuzz"]), vec!["fizzbuzz", "run"]);
        assert_eq!(normalized(&["fizzbuzz", "-v"]), vec!["fizzbuzz", "-v", "run"]);
    }

    #[test]
    fn help_and_version_are_left_alone() {
        assert_eq!(normalized(&["fizzbuzz", "--help"]), vec!["fizzbuzz", "--help"]);
        assert_eq!(normalized(&["fizzbuzz", "-V"]), vec!["fizzbuzz", "-V"]);
    }

    #[test]
    fn bare_file_means_eval() {
        assert_eq!(
            normalized(&["fizzbuzz", "prog.fb"]),
            vec!["fizzbuzz", "eval", "prog.fb"]
        );
        assert_eq!(
            normalized(&["fizzbuzz", "run", "--encoding", "all"]),
            vec!["fizzbuzz", "run", "--encoding", "all"]
        );
    }

    #[test]
    fn run_accepts_encoding_all() {
        let cli = Cli::parse_from(normalized(&["fizzbuzz", "run", "--encoding", "all"]));
        match cli.command {
            Command::Run(args) => assert_eq!(args.encoding, Some(EncodingChoice::All)),
            _ => panic!("expected the run subcommand"),
        }
    }
}
