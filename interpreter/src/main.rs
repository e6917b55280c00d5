// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

use std::{path::{Path, PathBuf}, process::exit, rc::Rc, time::Duration};

use clap::Subcommand;
use colored::Colorize;
use snek_interpreter::{
    snek::{Keyword, Lexer, ScriptCache},
    Builtin, CommandRegistry, ConfigRoot, ErrorPrinter, Logger, Program,
};

const EXIT_PARSE_ERROR: i32 = 1;
const EXIT_RUNTIME_ERROR: i32 = 2;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a script until it is done
    Run {
        file: PathBuf,

        /// Pause between two cycles, in milliseconds
        #[arg(long)]
        step_delay_ms: Option<u64>,

        /// Configuration file, instead of the `snek.toml` next to the script
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parses a script without running it
    Check {
        file: PathBuf,
    },

    /// Prints the tokens of a script
    Tokens {
        file: PathBuf,
    },

    /// Lists the keywords and built-in commands
    Builtins,
}

fn main() {
    let args = Args::parse_args();

    match args.command {
        Commands::Run { file, step_delay_ms, config } => {
            let config = match config {
                Some(path) => ConfigRoot::load(&path),
                None => ConfigRoot::discover(&file),
            };

            let config = config.unwrap_or_else(|e| {
                eprintln!("{}: {e}", "error".red().bold());
                exit(EXIT_PARSE_ERROR);
            });

            Logger::initialize(args.verbose || config.log.debug);

            let step_delay = step_delay_ms.map(Duration::from_millis).unwrap_or_else(|| config.step_delay());
            run(&file, &config, step_delay);
        }

        Commands::Check { file } => {
            Logger::initialize(args.verbose);
            check(&file);
        }

        Commands::Tokens { file } => {
            Logger::initialize(args.verbose);
            tokens(&file);
        }

        Commands::Builtins => builtins(),
    }
}

fn read_source(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("{}: could not read {}: {e}", "error".red().bold(), path.display());
        exit(EXIT_PARSE_ERROR);
    })
}

fn run(path: &Path, config: &ConfigRoot, step_delay: Duration) {
    let source = read_source(path);

    let start_variables = config.start_variables().unwrap_or_else(|e| {
        eprintln!("{}: {e}", "error".red().bold());
        exit(EXIT_PARSE_ERROR);
    });

    let cache = Rc::new(ScriptCache::new());
    let program = Program::new(cache, &source, start_variables, CommandRegistry::with_builtins());

    let mut program = match program {
        Ok(program) => program,
        Err(e) => {
            ErrorPrinter::new(path.display(), &source, e.location().as_zero_range(), &e).print();
            exit(EXIT_PARSE_ERROR);
        }
    };

    let name = config.run.name.clone().unwrap_or_else(|| path.display().to_string());
    program = program.named(name);

    if let Err(e) = program.run(step_delay) {
        ErrorPrinter::new(path.display(), &source, e.range, &e.kind).print();
        exit(EXIT_RUNTIME_ERROR);
    }
}

fn check(path: &Path) {
    let source = read_source(path);

    match ScriptCache::new().tokenize(&source) {
        Ok(script) => {
            println!("{}: {} statements", path.display().to_string().green().bold(), script.len());
        }

        Err(e) => {
            ErrorPrinter::new(path.display(), &source, e.location().as_zero_range(), &e).print();
            exit(EXIT_PARSE_ERROR);
        }
    }
}

fn tokens(path: &Path) {
    let source = read_source(path);
    let (tokens, errors) = Lexer::new(&source).collect_all();

    for token in &tokens {
        println!("{:>8}  {:<24} {}", token.begin.to_string().blue(), token.kind.name(), token);
    }

    for error in &errors {
        ErrorPrinter::new(path.display(), &source, error.location.as_zero_range(), error).print();
    }

    if !errors.is_empty() {
        exit(EXIT_PARSE_ERROR);
    }
}

fn builtins() {
    println!("{}", "Keywords".bold());
    for keyword in Keyword::iter_variants() {
        println!("  {:<12} {}", keyword.as_ref().green(), keyword.documentation());
    }

    println!();
    println!("{}", "Commands".bold());

    let registry = CommandRegistry::with_builtins();
    for name in registry.names() {
        println!("  {:<12} {}", name.green(), Builtin::documentation(name).unwrap_or_default());
    }
}
