use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use enumflags2::BitFlags;
use log::{error, info, LevelFilter};
use simplify::{
    grammar::{ContextFreeGrammar, Pipeline, Simplification, Stage},
    input::{load_batch, to_batch_json},
    parser::parse_grammar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// G = (V, T, P, S) followed by the production list
    Definition,
    /// One table row per variable
    Table,
    /// The JSON batch format
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StageArg {
    Erasing,
    Unit,
    Useless,
}

impl From<StageArg> for Stage {
    fn from(stage: StageArg) -> Self {
        match stage {
            StageArg::Erasing => Stage::Erasing,
            StageArg::Unit => Stage::Unit,
            StageArg::Useless => Stage::Useless,
        }
    }
}

/// Removes ε-productions, unit productions and useless symbols from
/// context-free grammars.
#[derive(Debug, Parser)]
#[command(name = "simplify", version)]
struct Cli {
    /// JSON batch of named grammars, read from stdin when omitted
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Read a single grammar written as production lines (`S → AB | ε`)
    #[arg(long)]
    text: bool,

    /// Start symbol for --text input, defaults to the first left-hand side
    #[arg(long, value_name = "SYMBOL", requires = "text")]
    start: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Definition)]
    format: Format,

    /// Stages to run, always in the order erasing, unit, useless. Selecting
    /// unit also runs erasing
    #[arg(short, long, value_enum, value_delimiter = ',')]
    stages: Vec<StageArg>,

    /// Also print the nullable variables and the grammar after every stage
    #[arg(long)]
    trace: bool,

    /// Increase log verbosity (RUST_LOG takes precedence)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn pipeline(&self) -> Pipeline {
        if self.stages.is_empty() {
            Pipeline::default()
        } else {
            Pipeline::new(
                self.stages
                    .iter()
                    .map(|&stage| Stage::from(stage))
                    .collect::<BitFlags<_>>(),
            )
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) => {
                fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
            }
            None => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read stdin")?;
                Ok(input)
            }
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn render(grammar: &ContextFreeGrammar, format: Format) -> Result<String> {
    Ok(match format {
        Format::Definition => grammar.definition(),
        Format::Table => grammar.production_table(),
        Format::Json => to_batch_json([("grammar", grammar)])?,
    })
}

fn print_trace(simplification: &Simplification, format: Format) -> Result<()> {
    println!(
        "Nullable variables: {{{}}}",
        simplification
            .nullable
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    for (stage, grammar) in &simplification.steps {
        println!("After {stage}:\n{}", render(grammar, format)?);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<bool> {
    let input = cli.read_input()?;
    let pipeline = cli.pipeline();

    let cases = if cli.text {
        let grammar = parse_grammar(&input, cli.start.as_deref())?;
        [("grammar".to_string(), Ok(grammar))].into_iter().collect()
    } else {
        load_batch(&input)?
    };

    info!("Loaded {} grammars", cases.len());

    let mut simplified = Vec::new();
    let mut failed = 0;

    for (case, grammar) in &cases {
        let grammar = match grammar {
            Ok(grammar) => grammar,
            Err(e) => {
                error!("Skipping {case}: {e}");
                failed += 1;
                continue;
            }
        };

        let simplification = pipeline.run(grammar);

        if cli.format == Format::Json {
            simplified.push((case.as_str(), simplification.grammar));
            continue;
        }

        println!("CFG {case} without ε-productions, unit productions and useless symbols:");
        if cli.trace {
            print_trace(&simplification, cli.format)?;
        }
        println!("{}", render(&simplification.grammar, cli.format)?);
    }

    if cli.format == Format::Json {
        let json = to_batch_json(simplified.iter().map(|(case, grammar)| (*case, grammar)))?;
        println!("{json}");
    }

    if failed > 0 {
        error!("{failed} of {} grammars could not be loaded", cases.len());
    }

    Ok(failed == 0)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
