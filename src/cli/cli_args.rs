use super::session::Session;
use crate::MolarMass::formula_error::FormulaError;
use crate::MolarMass::mass_aggregator::CalculationResult;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

/// Molar mass and element breakdown of chemical formulas
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "ChemFormula",
    about = "Molar mass and element breakdown of chemical formulas",
    after_help = "Without formulas an interactive menu is started.",
    version
)]
pub struct CliArgs {
    /// Chemical formulas, e.g. H2O, Fe2(SO4)3, CuSO4.5H2O
    #[arg(value_name = "FORMULA")]
    pub formulas: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Settings file (default formula_config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// JSON report of one formula: `{"formula": .., "result": ..}` or `{"formula": .., "error": ..}`
pub fn json_report(
    formula: &str,
    outcome: &Result<CalculationResult, FormulaError>,
) -> serde_json::Value {
    match outcome {
        Ok(result) => json!({ "formula": formula, "result": result }),
        Err(e) => json!({ "formula": formula, "error": e, "message": e.to_string() }),
    }
}

/// calculates every formula and prints the outcome; returns false if any formula failed
pub fn run_formulas(session: &Session, formulas: &[String], as_json: bool) -> bool {
    let calculator = session.calculator();
    let mut all_ok = true;
    let mut reports = Vec::new();
    for formula in formulas {
        let outcome = calculator.calculate(formula);
        all_ok &= outcome.is_ok();
        if as_json {
            reports.push(json_report(formula, &outcome));
        } else {
            print_outcome(session, formula, &outcome);
        }
    }
    if as_json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                all_ok = false;
            }
        }
    }
    all_ok
}

pub fn print_outcome(
    session: &Session,
    formula: &str,
    outcome: &Result<CalculationResult, FormulaError>,
) {
    match outcome {
        Ok(result) => {
            println!(
                "\n{}: {:.*} g/mol",
                formula,
                session.decimal_places(),
                result.total_weight
            );
            result.pretty_print(session.decimal_places());
        }
        Err(e) => {
            println!("\n{}: error: {}", formula, e);
            if let Some(position) = error_position(e) {
                println!("  {}", formula);
                println!("  {}^", " ".repeat(position));
            }
        }
    }
}

// character position to point at, if the error has one
fn error_position(e: &FormulaError) -> Option<usize> {
    match e {
        FormulaError::InvalidCharacter { position, .. }
        | FormulaError::UnclosedGroup { position }
        | FormulaError::UnexpectedCloseParen { position }
        | FormulaError::EmptyGroup { position }
        | FormulaError::TrailingInput { position }
        | FormulaError::UnexpectedToken { position, .. }
        | FormulaError::InvalidMultiplier { position }
        | FormulaError::NestingTooDeep { position } => Some(*position),
        _ => None,
    }
}
