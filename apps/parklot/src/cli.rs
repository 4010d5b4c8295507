//! Command line interface definition

use clap::Parser;
use parklot_types::OutputFormat;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// parklot - drive a capacity-bounded parking lot
#[derive(Parser)]
#[command(name = "parklot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drive a capacity-bounded parking lot")]
#[command(long_about = None)]
pub struct Cli {
    /// Operations to run in order: park:<label> or unpark:<label>
    #[arg(value_name = "OP", required = true)]
    pub ops: Vec<LotOp>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags that override the config file and environment
#[derive(Parser)]
pub struct GlobalArgs {
    /// Number of spaces in the lot
    #[arg(long, short = 'c')]
    pub capacity: Option<usize>,

    /// Lot name used in output and logs
    #[arg(long)]
    pub name: Option<String>,

    /// Output format for events and the final summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

/// One scripted step against the lot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotOp {
    Park(String),
    Unpark(String),
}

impl LotOp {
    pub fn label(&self) -> &str {
        match self {
            Self::Park(label) | Self::Unpark(label) => label,
        }
    }
}

impl FromStr for LotOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, label) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <park|unpark>:<label>, got '{s}'"))?;
        if label.is_empty() {
            return Err(format!("missing vehicle label in '{s}'"));
        }
        match verb {
            "park" | "p" => Ok(Self::Park(label.to_string())),
            "unpark" | "u" => Ok(Self::Unpark(label.to_string())),
            _ => Err(format!("unknown operation '{verb}' (use park or unpark)")),
        }
    }
}

impl fmt::Display for LotOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Park(label) => write!(f, "park:{label}"),
            Self::Unpark(label) => write!(f, "unpark:{label}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ops() {
        assert_eq!("park:A".parse::<LotOp>(), Ok(LotOp::Park("A".into())));
        assert_eq!("u:B-2".parse::<LotOp>(), Ok(LotOp::Unpark("B-2".into())));
        assert!("drive:A".parse::<LotOp>().is_err());
        assert!("park:".parse::<LotOp>().is_err());
        assert!("park".parse::<LotOp>().is_err());
    }

    #[test]
    fn test_json_flag_wins() {
        let cli = Cli::parse_from(["parklot", "--json", "park:A"]);
        assert_eq!(cli.global.output_format(), OutputFormat::Json);
        assert_eq!(cli.ops, vec![LotOp::Park("A".into())]);
    }
}
