use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use simplelog::LevelFilter;

use kripke_rs::display::format_result;
use kripke_rs::eval::{EvalConfig, Evaluator, UnboundPolicy};
use kripke_rs::pipeline::evaluate_source_with;

/// Evaluate the `expr:` of a model description in every world.
#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Model description file.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,

    /// Treat variables missing from the model as false everywhere.
    #[arg(long)]
    assume_false: bool,

    /// Print the frame in DOT format, highlighting the worlds where the formula holds.
    #[arg(long)]
    dot: bool,

    /// Print the knowledge matrix (access times valuation).
    #[arg(long)]
    knowledge: bool,

    /// Print every column computed during evaluation.
    #[arg(long)]
    worksheet: bool,

    /// Only print the per-world result.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let text = std::fs::read_to_string(&args.input)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;

    let config = EvalConfig {
        unbound: if args.assume_false {
            UnboundPolicy::AssumeFalse
        } else {
            UnboundPolicy::Reject
        },
    };
    let evaluation = evaluate_source_with(&text, &config)?;
    let model = &evaluation.model;

    if args.quiet {
        print!("{}", format_result(evaluation.result.view(), model.world_names()));
        return Ok(());
    }

    println!("Formula: {}", evaluation.formula);
    print!("{}", evaluation.formula.to_tree_string());
    println!();
    println!("Valuation:");
    print!("{}", model.valuation_table());
    println!();
    println!("Access:");
    print!("{}", model.access_table());

    if args.knowledge {
        println!();
        println!("Knowledge:");
        print!("{}", model.knowledge_table());
    }

    if args.worksheet {
        let (_, sheet) = Evaluator::with_config(model, config).evaluate_traced(&evaluation.formula)?;
        println!();
        println!("Worksheet:");
        print!("{}", sheet.to_table(model.world_names()));
    }

    println!();
    println!("Result:");
    print!("{}", format_result(evaluation.result.view(), model.world_names()));
    println!("Holds in: {{{}}}", evaluation.satisfying_worlds().join(", "));
    println!("Valid: {}", evaluation.is_valid());

    if args.dot {
        println!();
        print!("{}", model.to_dot(Some(evaluation.result.view()))?);
    }

    Ok(())
}
