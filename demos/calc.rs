use std::io::BufRead;

use clap::Parser;

use logic_calc::calculator::{Calculator, CalculatorConfig};
use logic_calc::simplify::SimplifierConfig;
use logic_calc::table::literal;

#[derive(Debug, Parser)]
#[command(author, version, about = "Evaluate propositional formulas and print their truth tables")]
struct Cli {
    /// Formulas to evaluate. Read from stdin, one per line, if none are given.
    #[arg(value_name = "FORMULA")]
    formulas: Vec<String>,

    /// Rewrite formulas using only AND, OR and NOT.
    #[clap(long)]
    normalize: bool,

    /// Simplify formulas before printing them.
    #[clap(long)]
    simplify: bool,

    /// Maximum number of simplification steps.
    #[clap(long, value_name = "INT", default_value = "256")]
    max_steps: usize,

    /// Only accept formulas written with AND, OR and NOT.
    #[clap(long)]
    canonical_only: bool,

    /// Print debug logs.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Warn
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut calculator = Calculator::new(CalculatorConfig {
        normalize: args.normalize,
        simplify: args.simplify,
        simplifier: SimplifierConfig {
            max_steps: args.max_steps,
        },
    });

    let lines: Vec<String> = if args.formulas.is_empty() {
        std::io::stdin().lock().lines().collect::<Result<_, _>>()?
    } else {
        args.formulas.clone()
    };

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        println!("> {}", line);

        let formula = match calculator.parse(line) {
            Ok(formula) => formula,
            Err(e) => {
                println!("invalid: {}", e);
                continue;
            }
        };
        let canonical = formula.is_canonical();
        println!("valid, canonical = {}", canonical);
        if args.canonical_only && !canonical {
            println!("rejected: not in the AND/OR/NOT subset");
            continue;
        }
        println!("formula = {}", formula);

        let table = formula.truth_table()?;
        println!("{}", table.header.join(" | "));
        for row in &table.rows {
            let cells: Vec<&str> = row.iter().map(|&value| literal(value)).collect();
            println!("{}", cells.join(" | "));
        }
        println!();
    }

    Ok(())
}
