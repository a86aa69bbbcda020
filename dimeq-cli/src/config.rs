//! Command-line arguments, with environment fallbacks
//!
//! Environment:
//! - `DIMEQ_LOG`: trace | debug | info | warn | error (default warn)
//! - `DIMEQ_OUTPUT`: text | json (default text)
//! - `DIMEQ_PLACES`: decimal places in text output (default 10)

use clap::{Parser, ValueEnum};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "dimeq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Convert quantities across dimensions through physical equivalences",
    after_help = "equivalences: mass-energy, thermal, spectral[:f,l], photon-energy[:f,l,n]\n\
                  conventions:  linear (default) or angular\n\n\
                  Quote requests that use \"->\", or write \"to\" between the words."
)]
pub struct Cli {
    /// Conversion request, e.g. "589 nm -> eV" or 1 m_e to MeV
    #[arg(value_name = "REQUEST")]
    pub request: Vec<String>,

    /// Equivalence used to bridge dimensions
    #[arg(long, value_name = "NAME")]
    pub via: Option<String>,

    /// Print the bare number without its unit
    #[arg(long)]
    pub strip: bool,

    /// List the built-in equivalences and the conversions they bridge
    #[arg(long)]
    pub list: bool,

    /// Output format
    #[arg(long, value_enum, env = "DIMEQ_OUTPUT", default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, overrides_with = "text")]
    pub json: bool,

    /// Shorthand for --output text
    #[arg(long, overrides_with = "json")]
    pub text: bool,

    /// Decimal places in rendered values
    #[arg(long, value_name = "N", env = "DIMEQ_PLACES", default_value_t = 10)]
    pub places: u32,

    /// Log level written to stderr
    #[arg(long, value_name = "LEVEL", env = "DIMEQ_LOG", default_value = "warn")]
    pub log_level: Level,
}

impl Cli {
    /// The request words joined back together; unquoted requests arrive split
    pub fn request_text(&self) -> Option<String> {
        (!self.request.is_empty()).then(|| self.request.join(" "))
    }

    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.text {
            OutputFormat::Text
        } else {
            self.output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dimeq"]).unwrap();
        assert_eq!(cli.request_text(), None);
        assert_eq!(cli.format(), OutputFormat::Text);
        assert_eq!(cli.places, 10);
        assert_eq!(cli.log_level, Level::WARN);
        assert!(!cli.list && !cli.strip);
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from(["dimeq", "589 nm -> eV", "--via", "photon-energy", "--strip", "--json"]).unwrap();
        assert_eq!(cli.request_text().as_deref(), Some("589 nm -> eV"));
        assert_eq!(cli.via.as_deref(), Some("photon-energy"));
        assert!(cli.strip);
        assert_eq!(cli.format(), OutputFormat::Json);
    }

    #[test]
    fn test_parse_unquoted_request() {
        let cli = Cli::try_parse_from(["dimeq", "1", "m_e", "to", "MeV", "--places", "3"]).unwrap();
        assert_eq!(cli.request_text().as_deref(), Some("1 m_e to MeV"));
        assert_eq!(cli.via, None);
        assert_eq!(cli.places, 3);
    }

    #[test]
    fn test_last_format_flag_wins() {
        let cli = Cli::try_parse_from(["dimeq", "--json", "--text", "1 m -> km"]).unwrap();
        assert_eq!(cli.format(), OutputFormat::Text);
        let cli = Cli::try_parse_from(["dimeq", "--output", "json", "1 m -> km"]).unwrap();
        assert_eq!(cli.format(), OutputFormat::Json);
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["dimeq", "--log-level", "debug", "--list"]).unwrap();
        assert_eq!(cli.log_level, Level::DEBUG);
        assert!(cli.list);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["dimeq", "--via"]).is_err());
        assert!(Cli::try_parse_from(["dimeq", "--frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["dimeq", "--places", "many"]).is_err());
        assert!(Cli::try_parse_from(["dimeq", "--places", "-2"]).is_err());
        assert!(Cli::try_parse_from(["dimeq", "--log-level", "loud"]).is_err());
    }
}
