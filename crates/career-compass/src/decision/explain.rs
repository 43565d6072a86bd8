use super::criteria::Criteria;
use super::scoring::{format_score, Selection, StrategyScores};

/// Renders the minimax outcome as plain text.
///
/// Pure formatting over already-computed scores: `names[i]` pairs with
/// `scores.worst_case[i]`, and the breakdown keeps that order.
pub fn render_explanation(names: &[&str], scores: &StrategyScores, criteria: &Criteria) -> String {
    let mut lines = vec!["Career decision (minimax strategy)".to_string(), String::new()];

    lines.push("Method".to_string());
    lines.push(format!(
        "- Each career is judged by its lowest score across {} criteria.",
        criteria.len()
    ));
    lines.push("- The career whose lowest score is highest is recommended.".to_string());
    lines.push("- Equal worst cases go to the career listed first.".to_string());
    lines.push(String::new());

    match &scores.selection {
        Selection::NoOptions => {
            lines.push(
                "No recommendation can be made: the payoff table has no career options."
                    .to_string(),
            );
        }
        Selection::NoCriteria => {
            lines.push("Worst-case scores".to_string());
            lines.extend(breakdown(names, scores));
            lines.push(String::new());
            lines.push(
                "No recommendation can be made: the careers carry no criteria scores."
                    .to_string(),
            );
        }
        Selection::Selected {
            name, worst_case, ..
        } => {
            lines.push("Worst-case scores".to_string());
            lines.extend(breakdown(names, scores));
            lines.push(String::new());
            lines.push(format!("Recommended: {name}"));
            lines.push(format!(
                "- Guaranteed minimum score: {}",
                format_score(*worst_case)
            ));
        }
    }

    lines.push(String::new());
    if criteria.is_empty() {
        lines.push("Criteria: none".to_string());
    } else {
        lines.push(format!("Criteria: {criteria}"));
    }

    if matches!(scores.selection, Selection::Selected { .. }) {
        lines.push(String::new());
        lines.push(
            "Rationale: picking the best worst case limits the downside if conditions turn \
             unfavourable, which suits a risk-averse decision."
                .to_string(),
        );
    }

    lines.join("\n")
}

fn breakdown(names: &[&str], scores: &StrategyScores) -> Vec<String> {
    names
        .iter()
        .zip(scores.worst_case.iter())
        .map(|(name, worst)| match worst {
            Some(score) => format!("- {name}: worst-case score {}", format_score(*score)),
            None => format!("- {name}: worst-case score n/a"),
        })
        .collect()
}
