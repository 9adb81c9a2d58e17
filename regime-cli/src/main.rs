use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use regime_core::calculate_tax;
use regime_core::models::{TaxForm, TaxResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod batch;

use batch::FormReader;

/// Compare Indian income-tax liability under the old and new regimes.
///
/// Results are written to stdout as JSON; logs go to stderr. A calculation
/// that is rejected still prints an error record and exits non-zero.
#[derive(Parser, Debug)]
#[command(name = "regime")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare both regimes for a single taxpayer
    Calc(CalcArgs),
    /// Run every row of a CSV file through the comparison
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Annual salary in rupees; comma grouping is accepted (e.g. 12,75,000)
    #[arg(short, long)]
    salary: String,

    /// Age category: below_60, 60_to_80 or above_80
    #[arg(short, long, default_value = "below_60")]
    age: String,

    /// Claim the salaried standard deduction
    #[arg(long, default_value_t = false)]
    salaried: bool,

    /// Professional tax paid, deductible under the old regime
    #[arg(long)]
    professional_tax: Option<String>,

    /// Deduction claim as SECTION=AMOUNT (e.g. section_80c=150000); repeatable
    #[arg(short, long, value_name = "SECTION=AMOUNT")]
    deduct: Vec<String>,

    /// Pretty-print the JSON result
    #[arg(short, long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Path to a CSV file with one taxpayer per row; known columns are
    /// annual_salary, age_category, is_salaried and professional_tax, and
    /// any other column is a deduction section
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let all_ok = match cli.command {
        Command::Calc(args) => run_calc(&args)?,
        Command::Batch(args) => run_batch(&args)?,
    };

    if !all_ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_calc(args: &CalcArgs) -> Result<bool> {
    let form = calc_form(args)?;

    let result = calculate_tax(&form);
    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(result.is_success())
}

/// Builds the raw form from CLI flags; coercion and validation stay in the
/// core crate so the CLI accepts exactly what a web form would.
fn calc_form(args: &CalcArgs) -> Result<TaxForm> {
    let mut form = TaxForm {
        annual_salary: Some(args.salary.as_str().into()),
        age_category: Some(args.age.as_str().into()),
        ..TaxForm::default()
    };
    if args.salaried {
        form.is_salaried = Some(true.into());
    }
    if let Some(professional_tax) = &args.professional_tax {
        form.professional_tax = Some(professional_tax.as_str().into());
    }
    for claim in &args.deduct {
        let (section, amount) = claim
            .split_once('=')
            .with_context(|| format!("expected SECTION=AMOUNT, got: {claim}"))?;
        form.deductions.insert(section.to_string(), amount.into());
    }
    Ok(form)
}

fn run_batch(args: &BatchArgs) -> Result<bool> {
    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let forms = FormReader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    debug!(rows = forms.len(), "running batch comparison");

    let mut all_ok = true;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for form in &forms {
        let result = calculate_tax(form);
        if let TaxResult::Error { message } = &result {
            debug!(%message, "batch row rejected");
            all_ok = false;
        }
        serde_json::to_writer(&mut out, &result)?;
        out.write_all(b"\n")?;
    }

    Ok(all_ok)
}
