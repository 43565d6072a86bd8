use crate::demo::render_report;
use crate::infra::read_text;
use career_compass::adapter::{Extraction, ResponseAdapter};
use career_compass::decision::{
    read_table_from_path, write_table, AgentResponse, CareerDecisionModel, DecisionReport,
    UpdateMode, UpdateSummary,
};
use career_compass::error::AppError;
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Agent response text to ingest ('-' reads stdin). Defaults to stdin when no CSV is given.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Payoff table CSV (Career,<criteria...>) used as the starting table
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Merge careers found in the response into the starting table instead of replacing it
    #[arg(long)]
    pub(crate) merge: bool,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination CSV file
    #[arg(long)]
    pub(crate) output: PathBuf,
    /// Agent response text to build the table from ('-' reads stdin); built-in table otherwise
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AnalysisOutput {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<UpdateSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    report: DecisionReport,
    explanation: String,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        input,
        csv,
        merge,
        json,
    } = args;

    let (mut model, mut source) = match &csv {
        Some(path) => (
            CareerDecisionModel::new(read_table_from_path(path)?),
            format!("CSV import ({})", path.display()),
        ),
        None => (
            CareerDecisionModel::standard(),
            "Built-in career table".to_string(),
        ),
    };

    let text_path = match (input, &csv) {
        (Some(path), _) => Some(path),
        (None, None) => Some(PathBuf::from("-")),
        (None, Some(_)) => None,
    };

    let mode = if merge {
        UpdateMode::Merge
    } else {
        UpdateMode::Replace
    };

    let mut update = None;
    let mut note = None;
    if let Some(path) = text_path {
        let text = read_text(&path)?;
        match ResponseAdapter::new().extract(&text) {
            Extraction::Table {
                table,
                source: extracted,
                ..
            } => {
                update = Some(model.apply(table, mode)?);
                source = format!("{} ({})", extracted.label(), mode.label());
            }
            Extraction::NoUsableData(reason) => {
                note = Some(format!("Agent response not used: {}", reason.summary()));
            }
        }
    }

    let output = AnalysisOutput {
        source,
        update,
        note,
        report: model.report(),
        explanation: model.explain(),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Data source: {}", output.source);
    if let Some(summary) = &output.update {
        println!(
            "Table update: {} inserted, {} updated, {} removed ({} total)",
            summary.inserted, summary.updated, summary.removed, summary.total
        );
    }
    if let Some(note) = &output.note {
        println!("{note}");
    }
    println!();
    render_report(&output.report);
    println!();
    println!("{}", output.explanation);
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let model = match &args.input {
        Some(path) => {
            let agent = AgentResponse {
                response: read_text(path)?,
                ..AgentResponse::default()
            };
            CareerDecisionModel::from_agent_response(&agent, &ResponseAdapter::new())
        }
        None => CareerDecisionModel::standard(),
    };

    let file = File::create(&args.output)?;
    write_table(model.table(), file)?;
    println!(
        "Wrote {} career option(s) to {}",
        model.table().len(),
        args.output.display()
    );
    Ok(())
}
