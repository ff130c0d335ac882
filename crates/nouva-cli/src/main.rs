//! Nouva command-line interface.
//!
//! Thin shell over the engine: `parse` dumps the AST, `transpile` prints
//! unvalidated target text, `compile` prints fully resolved output for a
//! chosen dialect.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nouva_engine::Target;
use std::io::Write;
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

#[derive(Parser)]
#[command(name = "nouva")]
#[command(about = "Nouva to JS/TS transpiler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Nouva file and dump its AST as JSON
    Parse {
        /// Input file (or inline source with --eval)
        source: String,
        /// Treat the argument as inline source text
        #[arg(short, long)]
        eval: bool,
    },

    /// Transpile without declaration validation
    Transpile {
        /// Input file (or inline source with --eval)
        source: String,
        /// Treat the argument as inline source text
        #[arg(short, long)]
        eval: bool,
    },

    /// Compile with declaration validation for a target dialect
    Compile {
        /// Input file (or inline source with --eval)
        source: String,
        /// Target dialect
        #[arg(short, long, value_enum, default_value_t = TargetArg::Js)]
        target: TargetArg,
        /// Treat the argument as inline source text
        #[arg(short, long)]
        eval: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    Js,
    Ts,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Js => Target::Js,
            TargetArg::Ts => Target::Ts,
        }
    }
}

fn read_source(source: &str, eval: bool) -> Result<String> {
    if eval {
        Ok(source.to_string())
    } else {
        let path = PathBuf::from(source);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse { source, eval } => {
            let text = read_source(&source, eval)?;
            let program = nouva_engine::parse(&text)?;
            println!("{}", serde_json::to_string_pretty(&program)?);
        }
        Commands::Transpile { source, eval } => {
            let text = read_source(&source, eval)?;
            let output = nouva_engine::transpile(&text)?;
            print!("{}", output);
        }
        Commands::Compile {
            source,
            target,
            eval,
        } => {
            let text = read_source(&source, eval)?;
            let output = nouva_engine::compile(&text, target.into())?;
            print!("{}", output);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(stderr, "error");
        let _ = stderr.reset();
        let _ = writeln!(stderr, ": {:#}", err);
        std::process::exit(1);
    }
}
