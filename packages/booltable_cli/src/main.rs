use std::{path::PathBuf, str::FromStr};

use anyhow::Context;
use booltable::{
    compare_tables, lexer::Token, Assignment, CompiledFormula, ConjunctiveNormalForm,
    DisjunctiveNormalForm, Equivalence, Evaluate, NormalFormCost, Preset, PresetOutcome,
    TableGenerator, TableReport, TruthTable,
};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{info, Level};

use crate::{
    config::{Config, OutputFormat},
    function::{comparable_tables, FunctionSource},
};

mod config;
mod function;

#[derive(Parser, Debug)]
#[command(name = "booltable")]
#[command(about = "Truth tables, canonical normal forms and equivalence of Boolean functions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format, overriding the config file
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Largest variable count a table may be built for
    #[arg(long, global = true)]
    max_variables: Option<usize>,

    /// Variable name prefix for `n:num` functions
    #[arg(long, global = true, default_value = "x")]
    prefix: String,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the truth table of a function (`n:num` or a formula)
    Table { function: FunctionSource },
    /// Print the canonical disjunctive normal form
    Dnf { function: FunctionSource },
    /// Print the canonical conjunctive normal form
    Knf { function: FunctionSource },
    /// Print the truth table together with both normal forms and their costs
    Report { function: FunctionSource },
    /// Print the postfix form of a formula
    Postfix { formula: String },
    /// Evaluate a formula under one assignment
    Eval {
        formula: String,
        /// Variable bindings such as `x1=1 x2=0`
        bindings: Vec<Binding>,
    },
    /// Compare two functions and report the first differing row
    Compare {
        left: FunctionSource,
        right: FunctionSource,
    },
    /// Run a built-in walkthrough, or list them when no name is given
    Preset { name: Option<Preset> },
}

#[derive(Debug, Clone)]
struct Binding {
    name: String,
    value: bool,
}

impl FromStr for Binding {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (name, value) = input
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=0 or NAME=1, got \"{input}\""))?;

        let value = match value.trim() {
            "0" => false,
            "1" => true,
            other => return Err(format!("invalid truth value \"{other}\" for {name}")),
        };

        Ok(Binding {
            name: name.trim().to_owned(),
            value,
        })
    }
}

#[derive(Serialize)]
struct NormalFormReport {
    form: String,
    cost: NormalFormCost,
}

#[derive(Serialize)]
struct PostfixReport<'a> {
    formula: &'a str,
    variables: &'a [String],
    postfix: &'a [Token],
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    assignment: &'a Assignment,
    value: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }

    Ok(())
}

fn render_table(table: &TruthTable) -> String {
    let mut lines = vec![table
        .variables()
        .iter()
        .map(String::as_str)
        .chain(["|", "f"])
        .collect::<Vec<_>>()
        .join(" ")
        .bold()
        .to_string()];

    for row in table.rows() {
        let inputs = row
            .inputs()
            .iter()
            .map(|&input| u8::from(input).to_string())
            .chain(["|".to_owned()])
            .collect::<Vec<_>>()
            .join(" ");

        let output = if row.output() {
            "1".green()
        } else {
            "0".red()
        };

        lines.push(format!("{inputs} {output}"));
    }

    lines.join("\n")
}

fn render_comparison(result: &Equivalence) -> String {
    match result {
        Equivalence::Equal => "equal".green().to_string(),
        Equivalence::NotEqual { .. } => result.to_string().red().to_string(),
    }
}

fn render_report(report: &TableReport) -> String {
    format!(
        "{}\n\n{} {}\n{} {}\n{} {}\n{} {}",
        render_table(&report.table),
        "DNF:".bold(),
        report.dnf,
        "DNF cost:".bold(),
        report.dnf_cost,
        "KNF:".bold(),
        report.knf,
        "KNF cost:".bold(),
        report.knf_cost,
    )
}

fn render_preset(preset: Preset, outcome: &PresetOutcome) -> String {
    let header = format!("{}: {}", preset.to_string().bold(), preset.description());

    match outcome {
        PresetOutcome::Table(report) => format!("{header}\n\n{}", render_report(report)),
        PresetOutcome::Comparison {
            formula,
            report,
            result,
        } => format!(
            "{header}\n\n{}\n\n{formula} vs its DNF: {}",
            render_report(report),
            render_comparison(result)
        ),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let format = cli.format.unwrap_or(config.format);
    let generator = TableGenerator::new(cli.max_variables.unwrap_or(config.max_variables));

    info!(
        format = %format,
        max_variables = generator.max_variables(),
        "configured"
    );

    match cli.command {
        Command::Table { function } => {
            let table = function
                .table(&generator, &cli.prefix)
                .context("failed to build truth table")?;

            emit(format, &table, || render_table(&table))
        }

        Command::Dnf { function } => {
            let table = function
                .table(&generator, &cli.prefix)
                .context("failed to build truth table")?;
            let form = DisjunctiveNormalForm::from_truth_table(&table);
            let report = NormalFormReport {
                form: form.to_string(),
                cost: form.cost(),
            };

            emit(format, &report, || format!("{}\n{}", report.form, report.cost))
        }

        Command::Knf { function } => {
            let table = function
                .table(&generator, &cli.prefix)
                .context("failed to build truth table")?;
            let form = ConjunctiveNormalForm::from_truth_table(&table);
            let report = NormalFormReport {
                form: form.to_string(),
                cost: form.cost(),
            };

            emit(format, &report, || format!("{}\n{}", report.form, report.cost))
        }

        Command::Report { function } => {
            let report = TableReport::from(
                function
                    .table(&generator, &cli.prefix)
                    .context("failed to build truth table")?,
            );

            emit(format, &report, || render_report(&report))
        }

        Command::Postfix { formula } => {
            let formula =
                CompiledFormula::compile(&formula).context("failed to compile formula")?;
            let report = PostfixReport {
                formula: formula.text(),
                variables: formula.variables(),
                postfix: formula.postfix(),
            };

            emit(format, &report, || formula.postfix_string())
        }

        Command::Eval { formula, bindings } => {
            let formula =
                CompiledFormula::compile(&formula).context("failed to compile formula")?;
            let assignment = bindings
                .into_iter()
                .map(|binding| (binding.name, binding.value))
                .collect::<Assignment>();

            let value = formula
                .evaluate(&assignment)
                .with_context(|| format!("failed to evaluate {formula} under {assignment}"))?;

            let report = EvaluationReport {
                assignment: &assignment,
                value,
            };

            emit(format, &report, || u8::from(value).to_string())
        }

        Command::Compare { left, right } => {
            let (left, right) = comparable_tables(&generator, &cli.prefix, &left, &right)
                .context("failed to build truth tables")?;
            let result = compare_tables(&left, &right)?;

            emit(format, &result, || render_comparison(&result))
        }

        Command::Preset { name: Some(preset) } => {
            let outcome = preset
                .run(&generator)
                .with_context(|| format!("preset {preset} failed"))?;

            emit(format, &outcome, || render_preset(preset, &outcome))
        }

        Command::Preset { name: None } => {
            let presets = Preset::iter()
                .map(|preset| (preset, preset.description()))
                .collect::<Vec<_>>();

            emit(format, &presets, || {
                presets
                    .iter()
                    .map(|(preset, description)| format!("{preset}: {description}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    run(cli)
}
