//! designa-cli: command-line front end for the Designa assignment engine.
//!
//! Drives the full engine from JSON request files or stdin, so batches can be
//! solved and inspected without the service around it.
//!
//! # Commands
//!
//! - `solve`: run the assignment engine on a request file
//! - `validate`: check a request file without solving
//! - `schema`: print example request/response documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use designa_core::models::{OptimizationRequest, SolverType};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "designa-cli")]
#[command(version = "0.1.0")]
#[command(about = "Referee and scorekeeper assignment from JSON batches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the assignment engine on a request file
    Solve {
        /// Input JSON file path (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Override the request's solver mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },

    /// Validate a request file without solving
    Validate {
        /// Input JSON file path
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },

    /// Print example request/response documents
    Schema {
        /// Which document to print: request, response, or all
        #[arg(value_name = "TYPE", default_value = "all")]
        schema_type: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Mode {
    Cpsat,
    Greedy,
}

impl From<Mode> for SolverType {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Cpsat => SolverType::Cpsat,
            Mode::Greedy => SolverType::Greedy,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            stdin,
            output,
            pretty,
            mode,
        } => cmd_solve(input, stdin, output, pretty, mode),

        Commands::Validate { input, stdin } => cmd_validate(input, stdin),

        Commands::Schema { schema_type } => cmd_schema(&schema_type),
    }
}

fn read_input(file: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    if use_stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path))
    } else {
        anyhow::bail!("Either provide an input file or use --stdin")
    }
}

fn cmd_solve(
    input: Option<PathBuf>,
    stdin: bool,
    output: Option<PathBuf>,
    pretty: bool,
    mode: Option<Mode>,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let mut request: OptimizationRequest =
        serde_json::from_str(&json_str).context("Failed to parse request JSON")?;
    if let Some(mode) = mode {
        request.parameters.solver_type = mode.into();
    }

    let response = designa_core::solve(&request).context("Solve aborted")?;

    let output_json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    if let Some(output_path) = output {
        fs::write(&output_path, &output_json)
            .with_context(|| format!("Failed to write output to {:?}", output_path))?;
        eprintln!("Result written to {:?}", output_path);
    } else {
        println!("{}", output_json);
    }

    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, stdin: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;

    let request: OptimizationRequest = match serde_json::from_str(&json_str) {
        Ok(request) => request,
        Err(e) => {
            println!(
                "{}",
                serde_json::json!({ "valid": false, "error": e.to_string() })
            );
            return Ok(());
        }
    };

    let mut problems: Vec<String> = Vec::new();
    let p = &request.parameters;
    if !(0.0..=1.0).contains(&p.cost_weight) {
        problems.push(format!("cost_weight {} outside [0, 1]", p.cost_weight));
    }
    if !(0.0..=1.0).contains(&p.balance_weight) {
        problems.push(format!("balance_weight {} outside [0, 1]", p.balance_weight));
    }
    if !(1..=10).contains(&p.max_matches_per_person) {
        problems.push(format!(
            "max_matches_per_person {} outside [1, 10]",
            p.max_matches_per_person
        ));
    }
    if p.max_time_seconds < 1 {
        problems.push("max_time_seconds must be at least 1".to_string());
    }

    let mut warnings: Vec<String> = Vec::new();
    for m in &request.matches {
        if m.calendar_date().is_none() {
            warnings.push(format!("match {}: unparseable date {:?}", m.id, m.date));
        }
        if m.hour().is_none() {
            warnings.push(format!("match {}: unparseable time {:?}", m.id, m.time));
        }
    }

    if problems.is_empty() {
        println!(
            "{}",
            serde_json::json!({
                "valid": true,
                "matches": request.matches.len(),
                "persons": request.persons.len(),
                "warnings": warnings,
            })
        );
    } else {
        println!(
            "{}",
            serde_json::json!({ "valid": false, "problems": problems, "warnings": warnings })
        );
    }
    Ok(())
}

fn cmd_schema(schema_type: &str) -> Result<()> {
    match schema_type {
        "request" => print_request_schema(),
        "response" => print_response_schema(),
        "all" => {
            println!("=== REQUEST ===\n");
            print_request_schema()?;
            println!("\n=== RESPONSE ===\n");
            print_response_schema()?;
            Ok(())
        }
        _ => anyhow::bail!(
            "Unknown schema type: {}. Use: request, response, or all",
            schema_type
        ),
    }
}

fn print_request_schema() -> Result<()> {
    let example = r#"{
  "matches": [
    {
      "id": "match-1",
      "date": "2026-03-07",
      "time": "18:00",
      "home_team": "CB Madrid Norte",
      "away_team": "AD Parla",
      "venue": {"id": "venue-1", "name": "Pabellon Central", "municipality_id": "muni-001"},
      "competition": {"id": "comp-1", "name": "Liga Senior", "min_ref_category": "autonomico"},
      "referees_needed": 2,
      "scorers_needed": 1,
      "designations": [
        {"person_id": "ref-9", "role": "referee", "status": "accepted"}
      ]
    }
  ],
  "persons": [
    {
      "id": "ref-9",
      "name": "Referee Nine",
      "role": "referee",
      "category": "nacional",
      "municipality_id": "muni-002",
      "active": true,
      "has_car": false,
      "availabilities": [
        {"day_of_week": 6, "start_hour": 9, "end_hour": 21, "week_start": null}
      ],
      "incompatibilities": [
        {"team_name": "CB Getafe"}
      ]
    }
  ],
  "distances": [
    {"origin_id": "muni-001", "dest_id": "muni-002", "distance_km": 18.5}
  ],
  "parameters": {
    "cost_weight": 0.7,
    "balance_weight": 0.3,
    "max_matches_per_person": 3,
    "force_existing": true,
    "max_time_seconds": 10,
    "solver_type": "cpsat"
  }
}"#;
    println!("{}", example);
    Ok(())
}

fn print_response_schema() -> Result<()> {
    let example = r#"{
  "status": "optimal",
  "assignments": [
    {
      "match_id": "match-1",
      "person_id": "ref-9",
      "person_name": "Referee Nine",
      "role": "referee",
      "travel_cost": 1.85,
      "distance_km": 18.5,
      "is_new": false
    }
  ],
  "metrics": {
    "total_cost": 6.5,
    "coverage": 100.0,
    "covered_slots": 3,
    "total_slots": 3,
    "resolution_time_ms": 42,
    "solver_type": "cpsat"
  },
  "unassigned": []
}"#;
    println!("{}", example);
    Ok(())
}
