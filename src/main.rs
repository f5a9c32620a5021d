use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use env_logger::{Builder, Env};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use lisplex::driver::LexSession;

#[derive(Parser)]
#[command(name = "lisplex")]
#[command(author, version, about = "Tokenizer for a small Lisp dialect", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One token per line (default)
    #[value(name = "text")]
    Text,
    /// JSON array of tokens with spans and positions
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// The source file to lex ("-" for stdin)
        input: PathBuf,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Show line and column of each token
        #[arg(long)]
        positions: bool,
    },

    /// Print the source with comments removed
    Strip {
        /// The source file ("-" for stdin)
        input: PathBuf,
    },

    /// Report input that no token pattern matches
    Check {
        /// The source file to check ("-" for stdin)
        input: PathBuf,

        /// Exit with an error if anything was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Count tokens per kind
    Stats {
        /// The source file ("-" for stdin)
        input: PathBuf,
    },
}

/// Logger configured from `env`; `--verbose` forces the global level to Debug
fn logger_builder(env: Env<'_>, verbose: bool) -> Builder {
    let mut builder = Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger_builder(Env::default().default_filter_or("info"), cli.verbose).init();

    let result = match cli.command {
        Commands::Tokens {
            input,
            format,
            positions,
        } => tokens(&input, format, positions),
        Commands::Strip { input } => strip(&input),
        Commands::Check { input, strict } => check(&input, strict),
        Commands::Stats { input } => stats(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn open(input: &Path) -> Result<LexSession> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read standard input")?;
        return Ok(LexSession::from_string("<stdin>", source));
    }

    LexSession::load(input).with_context(|| format!("Failed to open source file: {:?}", input))
}

fn tokens(input: &Path, format: OutputFormat, positions: bool) -> Result<()> {
    let session = open(input)?;

    match format {
        OutputFormat::Text => {
            println!("{}", "=== Tokens ===".blue().bold());
            println!("{}", session.render_text(positions));
        }
        OutputFormat::Json => println!("{}", session.render_json()?),
    }

    Ok(())
}

fn strip(input: &Path) -> Result<()> {
    let session = open(input)?;
    print!("{}", session.stripped());
    Ok(())
}

fn check(input: &Path, strict: bool) -> Result<()> {
    log::info!("Checking {:?}", input);
    let session = open(input)?;

    let writer = StandardStream::stderr(ColorChoice::Auto);
    session.emit_diagnostics(&mut writer.lock())?;

    session.check(strict)?;

    let skipped = session.skipped().len();
    if skipped == 0 {
        println!(
            "{}: {} lexed cleanly ({} tokens)",
            "success".green().bold(),
            session.source_name(),
            session.tokens().len()
        );
    } else {
        println!(
            "{}: {} span(s) skipped in {}",
            "warning".yellow().bold(),
            skipped,
            session.source_name()
        );
    }

    Ok(())
}

fn stats(input: &Path) -> Result<()> {
    let session = open(input)?;

    println!("{}", "=== Token kinds ===".blue().bold());
    for (kind, count) in session.kind_counts() {
        println!("{:>12}: {}", kind.to_string().cyan(), count);
    }
    println!("{:>12}: {}", "skipped".yellow(), session.skipped().len());

    Ok(())
}
