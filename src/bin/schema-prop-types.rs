//! Schema Prop Types CLI
//!
//! Command-line interface for merging schemas and checking props documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schema_prop_types::{
    build, normalize, parse_draft, read_document, EngineOptions, Fragment, JsonSchemaEngine,
    PropError,
};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-prop-types")]
#[command(about = "Build per-prop validators from JSON Schema and check props against them")]
#[command(version)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge schema fragments and print the normalized schema
    Normalize {
        /// Primary schema followed by override fragments, merged in order
        #[arg(required = true)]
        schemas: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a props document field by field
    Check {
        /// Primary schema followed by override fragments, merged in order
        #[arg(required = true)]
        schemas: Vec<PathBuf>,

        /// Props document to validate
        #[arg(long)]
        props: PathBuf,

        /// Component name used in error messages
        #[arg(long, short)]
        component: Option<String>,

        /// Only check these props (default: every declared prop)
        #[arg(long = "field", short = 'f')]
        fields: Vec<String>,

        /// JSON Schema draft: 4, 6, 7, 2019-09 or 2020-12 (default: from $schema)
        #[arg(long)]
        draft: Option<String>,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Normalize {
            schemas,
            output,
            pretty,
        } => run_normalize(&schemas, output, pretty),

        Commands::Check {
            schemas,
            props,
            component,
            fields,
            draft,
            json,
        } => run_check(CheckArgs {
            schemas,
            props,
            component,
            fields,
            draft,
            json_output: json,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn load_all(paths: &[PathBuf], json_output: bool) -> Result<Vec<Value>, u8> {
    paths
        .iter()
        .map(|path| {
            read_document(path).map_err(|e| {
                report_error(json_output, &format!("loading schema: {}", e));
                e.exit_code() as u8
            })
        })
        .collect()
}

fn run_normalize(schemas: &[PathBuf], output: Option<PathBuf>, pretty: bool) -> Result<(), u8> {
    let loaded = load_all(schemas, false)?;
    let fragments: Vec<Fragment<'_>> = loaded.iter().map(Fragment::from).collect();

    let normalized = normalize(fragments[0], &fragments[1..]).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&normalized)
    } else {
        serde_json::to_string(&normalized)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

struct CheckArgs {
    schemas: Vec<PathBuf>,
    props: PathBuf,
    component: Option<String>,
    fields: Vec<String>,
    draft: Option<String>,
    json_output: bool,
}

fn run_check(args: CheckArgs) -> Result<(), u8> {
    let CheckArgs {
        schemas,
        props: props_path,
        component,
        fields,
        draft,
        json_output,
    } = args;

    let mut options = EngineOptions::new();
    if let Some(name) = &draft {
        let Some(parsed) = parse_draft(name) else {
            report_error(json_output, &format!("unknown draft \"{}\"", name));
            return Err(2);
        };
        options = options.draft(parsed);
    }
    let engine = JsonSchemaEngine::new(options);

    let loaded = load_all(&schemas, json_output)?;
    let fragments: Vec<Fragment<'_>> = loaded.iter().map(Fragment::from).collect();
    let prop_types = build(&engine, fragments[0], &fragments[1..]).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let props = read_document(&props_path).map_err(|e| {
        report_error(json_output, &format!("loading props: {}", e));
        e.exit_code() as u8
    })?;

    let component = component.as_deref();
    let errors: Vec<PropError> = if fields.is_empty() {
        prop_types.validate(&props, component)
    } else {
        let mut errors = Vec::new();
        for field in &fields {
            let Some(validator) = prop_types.get(field) else {
                report_error(json_output, &format!("unknown prop \"{}\"", field));
                return Err(2);
            };
            if let Err(e) = validator.validate(&props, field, component) {
                errors.push(e);
            }
        }
        errors
    };

    if errors.is_empty() {
        if json_output {
            println!("{}", json!({ "valid": true }));
        } else {
            println!("Valid");
        }
        return Ok(());
    }

    if json_output {
        let rendered: Vec<Value> = errors
            .iter()
            .map(|e| {
                json!({
                    "field": e.field,
                    "path": e.path,
                    "message": e.to_string(),
                })
            })
            .collect();
        println!("{}", json!({ "valid": false, "errors": rendered }));
    } else {
        eprintln!("Validation failed:");
        for error in &errors {
            eprintln!("  {}: {}", error.field, error);
        }
    }
    Err(1)
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
