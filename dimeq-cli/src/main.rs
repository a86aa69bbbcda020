//! dimeq command-line front end
//!
//! ```text
//! dimeq "589 nm -> eV" --via photon-energy
//! dimeq "20 degC -> meV" --via thermal --strip
//! dimeq "1500 m -> km"
//! dimeq --list
//! ```
//!
//! Errors are printed as JSON `DimeqError`s with a non-zero exit status.

mod config;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use dimeq::{builtin, RESOLVER};
use dimeq_core::DimeqError;
use dimeq_units::{parse_conversion, Quantity};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use config::{Cli, OutputFormat};

/// Result of one conversion request
#[derive(Debug, Clone, Serialize)]
struct Outcome {
    input: String,
    equivalence: Option<String>,
    value: String,
    exact: Option<String>,
    unit: String,
}

impl Outcome {
    fn new(input: &str, equivalence: Option<String>, result: &Quantity, places: u32) -> Self {
        Outcome {
            input: input.to_string(),
            equivalence,
            value: result.value.as_decimal(places),
            exact: result.value.is_exact().then(|| result.value.to_string()),
            unit: result.unit.symbol.clone(),
        }
    }

    fn render(&self, strip: bool, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => json!(self).to_string(),
            OutputFormat::Text if strip || self.unit.is_empty() => self.value.clone(),
            OutputFormat::Text => format!("{} {}", self.value, self.unit),
        }
    }
}

/// Parse and run one conversion request
fn convert(request: &str, via: Option<&str>, places: u32) -> Result<Outcome, DimeqError> {
    let (quantity, target) = parse_conversion(request)?;
    debug!(%quantity, target = %target.symbol, "parsed request");

    let (result, name) = match via {
        Some(name) => {
            let eq = builtin::by_name(name)?;
            let result = RESOLVER.uconvert(&target, quantity, eq.as_ref())?;
            (result, Some(eq.name()))
        }
        None => (quantity.convert_to(&target)?, None),
    };

    Ok(Outcome::new(request, name, &result, places))
}

/// Every built-in equivalence with the dimension pairs it bridges
fn list() -> Vec<serde_json::Value> {
    builtin::NAMES.iter()
        .filter_map(|name| builtin::by_name(name).ok())
        .map(|eq| {
            let pairs: Vec<String> = RESOLVER.pairs(eq.as_ref()).iter()
                .map(|(from, to)| format!("{} -> {}", label(from), label(to)))
                .collect();
            json!({ "equivalence": eq.name(), "conversions": pairs })
        })
        .collect()
}

fn label(d: &dimeq_units::Dimension) -> String {
    d.name().map_or_else(|| d.to_string(), |n| n.to_string())
}

fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(err: DimeqError) -> ExitCode {
    eprintln!("{}", json!(err));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    info!(?cli, "dimeq v{}", env!("CARGO_PKG_VERSION"));
    let format = cli.format();

    if cli.list {
        for entry in list() {
            match format {
                OutputFormat::Json => println!("{}", entry),
                OutputFormat::Text => {
                    println!("{}", entry["equivalence"].as_str().unwrap_or_default());
                    for pair in entry["conversions"].as_array().into_iter().flatten() {
                        println!("  {}", pair.as_str().unwrap_or_default());
                    }
                }
            }
        }
        return ExitCode::SUCCESS;
    }

    let Some(request) = cli.request_text() else {
        // Help only fails when stdout is gone
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    match convert(&request, cli.via.as_deref(), cli.places) {
        Ok(outcome) => {
            println!("{}", outcome.render(cli.strip, format));
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimeq_core::codes;

    #[test]
    fn test_convert_via_photon_energy() {
        let outcome = convert("589 nm -> eV", Some("photon-energy"), 3).unwrap();
        assert_eq!(outcome.value, "2.105");
        assert_eq!(outcome.unit, "eV");
        assert_eq!(outcome.equivalence.as_deref(), Some("PhotonEnergy(linear, linear, linear)"));
        assert!(outcome.exact.is_some());
    }

    #[test]
    fn test_convert_same_dimension_without_equivalence() {
        let outcome = convert("1500 m -> km", None, 2).unwrap();
        assert_eq!(outcome.value, "1.50");
        assert_eq!(outcome.render(false, OutputFormat::Text), "1.50 km");
        assert_eq!(outcome.render(true, OutputFormat::Text), "1.50");
    }

    #[test]
    fn test_convert_cross_dimension_needs_equivalence() {
        let err = convert("1 kg -> J", None, 2).unwrap_err();
        assert_eq!(err.code, codes::INCOMPATIBLE_DIMENSIONS);
    }

    #[test]
    fn test_convert_errors_carry_codes() {
        assert_eq!(convert("1 kg -> Hz", Some("mass-energy"), 2).unwrap_err().code, codes::NO_RELATION);
        assert_eq!(convert("1 kg -> J", Some("massive"), 2).unwrap_err().code, codes::UNKNOWN_EQUIVALENCE);
        assert_eq!(convert("1 furlong -> m", None, 2).unwrap_err().code, codes::UNKNOWN_UNIT);
        assert_eq!(convert("1 kg", None, 2).unwrap_err().code, codes::PARSE_ERROR);
    }

    #[test]
    fn test_json_render() {
        let outcome = convert("20 degC -> eV", Some("thermal"), 5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&outcome.render(false, OutputFormat::Json)).unwrap();
        assert_eq!(value["value"], "0.02526");
        assert_eq!(value["unit"], "eV");
        assert_eq!(value["equivalence"], "Thermal");
    }

    #[test]
    fn test_list() {
        let entries = list();
        assert_eq!(entries.len(), builtin::NAMES.len());
        let spectral = entries.iter().find(|e| e["equivalence"] == "Spectral(linear, linear)").unwrap();
        assert_eq!(spectral["conversions"].as_array().unwrap().len(), 6);
    }
}
