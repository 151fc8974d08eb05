use clap::{Parser, Subcommand};
use iban_check::batch::{check_csv, BatchReport};
use iban_check::logging;
use iban_check::mutate::probe_csv;
use iban_check::validate_iban;
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "iban-check")]
#[command(about = "IBAN length and mod-97 checksum validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Validate(ValidateArgs),
    CheckCsv(CheckCsvArgs),
    Probe(ProbeArgs),
}

#[derive(Parser)]
struct ValidateArgs {
    #[arg(required = true)]
    ibans: Vec<String>,
}

#[derive(Parser)]
struct CheckCsvArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "iban")]
    column: String,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct ProbeArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "iban")]
    column: String,
    #[arg(long, default_value_t = 200)]
    trials: usize,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("iban-check")?;
    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::CheckCsv(args) => run_check_csv(args),
        Command::Probe(args) => run_probe(args),
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut invalid = 0usize;
    for iban in &args.ibans {
        match validate_iban(iban) {
            Ok(parts) => emit_info_line(&format!(
                "VALID   {} (country {})",
                parts.electronic(),
                parts.country_code
            )),
            Err(err) => {
                invalid += 1;
                emit_info_line(&format!("INVALID {}: {}", iban, err));
            }
        }
    }

    if invalid > 0 {
        return Err(format!(
            "{} of {} IBAN(s) invalid",
            invalid,
            args.ibans.len()
        ));
    }
    Ok(())
}

fn run_check_csv(args: CheckCsvArgs) -> Result<(), String> {
    let start = Instant::now();
    let report = check_csv(&args.input, &args.column, args.output.as_deref())?;
    let elapsed = start.elapsed();

    log_batch_report(&report);
    if let Some(output) = &args.output {
        emit_info_line(&format!("Results written to {}", output.display()));
    }
    emit_info_line(&format!("Check time: {} ms", elapsed.as_millis()));

    if report.invalid > 0 {
        return Err(format!(
            "check failed with {} invalid IBAN(s)",
            report.invalid
        ));
    }
    Ok(())
}

fn run_probe(args: ProbeArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    log::info!(
        "Probing {} column '{}' with {} mutation(s) per IBAN (seed {})",
        args.input.display(),
        args.column,
        args.trials,
        seed
    );

    let summary = probe_csv(&args.input, &args.column, args.trials, seed)?;
    emit_info_line(&format!(
        "Probe: sources={} skipped={} trials={} detected={}",
        summary.sources, summary.skipped, summary.trials, summary.detected
    ));
    emit_info_line(&format!(
        "Detection rate: {:.2}%",
        summary.detection_rate() * 100.0
    ));
    Ok(())
}

fn log_batch_report(report: &BatchReport) {
    emit_info_line(&format!(
        "Checked {} IBAN(s): valid={} invalid={}",
        report.total, report.valid, report.invalid
    ));
    for (reason, count) in &report.by_reason {
        emit_info_line(&format!("Invalid ({}): {}", reason, count));
    }
    if !report.valid_by_country.is_empty() {
        let countries: Vec<String> = report
            .valid_by_country
            .iter()
            .map(|(country, count)| format!("{}={}", country, count))
            .collect();
        emit_info_line(&format!("Valid by country: {}", countries.join(" ")));
    }
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        println!("{message}");
    }
}
