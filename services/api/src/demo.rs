use career_compass::decision::{format_score, CareerDecisionModel, DecisionReport};
use career_compass::error::AppError;
use chrono::Local;

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Career decision demo ({})", Local::now().format("%Y-%m-%d %H:%M"));
    println!("Data source: Built-in career table\n");

    let model = CareerDecisionModel::standard();
    render_report(&model.report());
    println!();
    println!("{}", model.explain());
    Ok(())
}

pub(crate) fn render_report(report: &DecisionReport) {
    if report.criteria.is_empty() {
        println!("Criteria: none");
    } else {
        println!("Criteria: {}", report.criteria.join(", "));
    }

    println!("\nLeaderboard (highest worst case first)");
    if report.rankings.is_empty() {
        println!("  No career options to rank");
    }
    for (position, entry) in report.leaderboard().into_iter().enumerate() {
        println!(
            "  {}. {:<24} worst {:>5}  avg {:>5}  best {:>5}  total {:>6}",
            position + 1,
            entry.name,
            optional_score(entry.worst_case),
            format_score(entry.average),
            optional_score(entry.best_case),
            format_score(entry.total),
        );
    }

    println!("\nSelection: {}", report.selection.summary());
}

fn optional_score(score: Option<f64>) -> String {
    score.map(format_score).unwrap_or_else(|| "n/a".to_string())
}
