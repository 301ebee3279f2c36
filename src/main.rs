//! dmncheck - decision table cell checker

use anyhow::{bail, Context as _, Result};
use clap::{Parser as ClapParser, Subcommand};
use dmncheck::expression::{subsumes, tolerant_equals, typecheck, Context, ExpressionType};
use dmncheck::syntax::parse;
use dmncheck::validation::{
    build_validators, load_enums, validate_table, DecisionTable, EnumLookup, NoEnums, Severity,
    ValidatorConfig,
};
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// dmncheck - Parse, type check and validate decision table cells
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a cell and print its canonical form
    Parse {
        /// Cell text
        text: String,
    },

    /// Parse and type check a cell
    Typecheck {
        /// Cell text
        text: String,

        /// Variable binding, e.g. `cellInput=integer`
        #[arg(short, long = "var", value_parser = parse_binding)]
        vars: Vec<(String, ExpressionType)>,

        /// Fail unless the cell's type is a subtype of this one
        #[arg(short, long, value_parser = parse_type)]
        expect: Option<ExpressionType>,
    },

    /// Decide whether one cell subsumes another
    Subsumes {
        outer: String,
        inner: String,

        /// Tolerance used when comparing double literals
        #[arg(short, long, default_value = "0")]
        epsilon: f64,
    },

    /// Validate decision tables stored as JSON
    Check {
        /// Table files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Validator to run (repeatable; default: all)
        #[arg(short, long = "validator")]
        validators: Vec<String>,

        /// JSON file mapping enumeration names to their members
        #[arg(short = 'E', long)]
        enums: Option<PathBuf>,

        /// Accept empty output entries (default)
        #[arg(long, overrides_with = "deny_empty_outputs")]
        allow_empty_outputs: bool,

        /// Report empty output entries as errors
        #[arg(long, overrides_with = "allow_empty_outputs")]
        deny_empty_outputs: bool,
    },
}

fn parse_type(name: &str) -> Result<ExpressionType, String> {
    ExpressionType::from_name(name).ok_or_else(|| format!("unknown type '{}'", name))
}

fn parse_binding(binding: &str) -> Result<(String, ExpressionType), String> {
    let (name, type_name) = binding
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TYPE, got '{}'", binding))?;
    let name = name.trim();
    dmncheck::util::ensure(!name.is_empty(), || "variable name is empty".to_string())?;
    Ok((name.to_string(), parse_type(type_name)?))
}

/// The later of the two flags wins; with neither given, empty outputs are allowed
fn empty_outputs_allowed(allow: bool, deny: bool) -> bool {
    allow || !deny
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Parse { text } => {
            let expr = parse(&text)?;
            debug!("{:?}", expr);
            println!("{}", expr);
        }

        Command::Typecheck { text, vars, expect } => {
            let context: Context = vars.into_iter().collect();
            let expr = parse(&text)?;
            let ty = typecheck(&context, &expr)?;
            println!("{}", ty);

            if let Some(expected) = expect {
                if !ty.is_subtype_of(expected) {
                    bail!("Type {} is not a subtype of {}", ty, expected);
                }
            }
        }

        Command::Subsumes {
            outer,
            inner,
            epsilon,
        } => {
            let outer = parse(&outer)?;
            let inner = parse(&inner)?;
            match subsumes(&outer, &inner, tolerant_equals(epsilon)) {
                Some(true) => println!("true"),
                Some(false) => println!("false"),
                None => println!("incomparable"),
            }
        }

        Command::Check {
            files,
            validators,
            enums,
            allow_empty_outputs,
            deny_empty_outputs,
        } => {
            let config = ValidatorConfig {
                validators,
                allow_empty_outputs: empty_outputs_allowed(allow_empty_outputs, deny_empty_outputs),
            };
            let enums = match enums {
                Some(path) => Some(load_enums(&path).context("Failed to load enumerations")?),
                None => None,
            };
            check_tables(&files, &config, enums.as_ref())?;
        }
    }

    Ok(())
}

fn check_tables(
    files: &[PathBuf],
    config: &ValidatorConfig,
    enums: Option<&HashMap<String, HashSet<String>>>,
) -> Result<()> {
    let validators = build_validators(config)?;
    let lookup: &dyn EnumLookup = match enums {
        Some(enums) => enums,
        None => &NoEnums,
    };

    let mut errors = 0;
    for path in files {
        let table = DecisionTable::from_path(path)?;
        let findings = validate_table(&table, &validators, lookup);
        info!(
            "{}: {} findings in {}",
            path.display(),
            findings.len(),
            table.display_name()
        );

        for finding in &findings {
            let rule = &finding.element.id;
            match finding.severity {
                Severity::Error => error!("{} rule {}: {}", path.display(), rule, finding.message),
                Severity::Warning => warn!("{} rule {}: {}", path.display(), rule, finding.message),
                Severity::Info => info!("{} rule {}: {}", path.display(), rule, finding.message),
            }
        }

        errors += findings.iter().filter(|f| f.is_error()).count();
    }

    if errors > 0 {
        bail!("{} error(s) found", errors);
    }
    Ok(())
}
