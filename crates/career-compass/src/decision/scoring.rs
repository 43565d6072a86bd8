use super::table::{PayoffTable, Score};
use serde::Serialize;

/// Aggregate statistics for one option. Derived on demand, never stored.
///
/// `worst_case` and `best_case` are `None` when the table has no criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub name: String,
    pub total: Score,
    pub average: Score,
    pub worst_case: Option<Score>,
    pub best_case: Option<Score>,
    pub vector: Vec<Score>,
}

/// Outcome of the minimax scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Selection {
    Selected {
        index: usize,
        name: String,
        worst_case: Score,
    },
    /// The table holds no options.
    NoOptions,
    /// Options exist but carry no scores, so no worst case is defined.
    NoCriteria,
}

impl Selection {
    pub fn name(&self) -> Option<&str> {
        match self {
            Selection::Selected { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn worst_case(&self) -> Option<Score> {
        match self {
            Selection::Selected { worst_case, .. } => Some(*worst_case),
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Selection::Selected {
                name, worst_case, ..
            } => format!("{name} (worst-case score {})", format_score(*worst_case)),
            Selection::NoOptions => "no options to compare".to_string(),
            Selection::NoCriteria => "options have no criteria scores".to_string(),
        }
    }
}

/// Minimax selection plus the per-option worst-case vector in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyScores {
    pub selection: Selection,
    pub worst_case: Vec<Option<Score>>,
}

/// Full scoring output for a table snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionReport {
    pub criteria: Vec<String>,
    pub rankings: Vec<RankingEntry>,
    pub selection: Selection,
}

impl DecisionReport {
    /// Entries ordered by worst case (highest first); equal worst cases keep table order.
    pub fn leaderboard(&self) -> Vec<&RankingEntry> {
        let mut ordered: Vec<&RankingEntry> = self.rankings.iter().collect();
        ordered.sort_by(|left, right| {
            let left = left.worst_case.unwrap_or(Score::NEG_INFINITY);
            let right = right.worst_case.unwrap_or(Score::NEG_INFINITY);
            right.partial_cmp(&left).unwrap_or(std::cmp::Ordering::Equal)
        });
        ordered
    }
}

/// Stateless risk-averse scorer over a payoff table.
///
/// Scores are used exactly as given: no clamping to the nominal 1-10 range and no
/// criteria weighting, even when the source payload carried weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Minimum score of each option, in insertion order.
    pub fn worst_case_vector(&self, table: &PayoffTable) -> Vec<Option<Score>> {
        table
            .as_matrix()
            .rows
            .into_iter()
            .map(minimum)
            .collect()
    }

    pub fn strategy_scores(&self, table: &PayoffTable) -> StrategyScores {
        let worst_case = self.worst_case_vector(table);
        let selection = select_minimax(&table.names(), &worst_case);
        StrategyScores {
            selection,
            worst_case,
        }
    }

    pub fn rankings(&self, table: &PayoffTable) -> Vec<RankingEntry> {
        let matrix = table.as_matrix();
        matrix
            .names
            .iter()
            .zip(matrix.rows.iter())
            .map(|(name, scores)| {
                let total: Score = scores.iter().sum();
                let average = if scores.is_empty() {
                    0.0
                } else {
                    total / scores.len() as Score
                };

                RankingEntry {
                    name: (*name).to_string(),
                    total,
                    average,
                    worst_case: minimum(scores),
                    best_case: maximum(scores),
                    vector: scores.to_vec(),
                }
            })
            .collect()
    }

    pub fn evaluate(&self, table: &PayoffTable) -> DecisionReport {
        let rankings = self.rankings(table);
        let worst_case: Vec<Option<Score>> =
            rankings.iter().map(|entry| entry.worst_case).collect();
        let selection = select_minimax(&table.names(), &worst_case);

        DecisionReport {
            criteria: table
                .criteria()
                .labels()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            rankings,
            selection,
        }
    }
}

fn minimum(scores: &[Score]) -> Option<Score> {
    scores.iter().copied().reduce(Score::min)
}

fn maximum(scores: &[Score]) -> Option<Score> {
    scores.iter().copied().reduce(Score::max)
}

// Strict comparison keeps the earliest option on ties.
fn select_minimax(names: &[&str], worst_case: &[Option<Score>]) -> Selection {
    if names.is_empty() {
        return Selection::NoOptions;
    }

    let mut best: Option<(usize, Score)> = None;
    for (index, score) in worst_case.iter().enumerate() {
        let Some(score) = *score else { continue };
        match best {
            Some((_, current)) if score <= current => {}
            _ => best = Some((index, score)),
        }
    }

    match best {
        Some((index, worst_case)) => Selection::Selected {
            index,
            name: names[index].to_string(),
            worst_case,
        },
        None => Selection::NoCriteria,
    }
}

/// Whole numbers print without a fractional part; anything else keeps two decimals.
pub fn format_score(score: Score) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{score:.0}")
    } else {
        format!("{score:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::criteria::{Criteria, Criterion};
    use crate::decision::table::CareerOption;

    fn table(criteria: usize, options: &[(&str, &[Score])]) -> PayoffTable {
        let criteria = Criteria::new(
            (0..criteria)
                .map(|i| Criterion::new(format!("c{i}"), format!("C{i}")))
                .collect(),
        );
        PayoffTable::new(
            criteria,
            options
                .iter()
                .map(|(name, scores)| CareerOption::new(*name, scores.to_vec())),
        )
        .expect("valid table")
    }

    #[test]
    fn standard_table_selects_software_engineer() {
        let engine = ScoringEngine::new();
        let scores = engine.strategy_scores(&PayoffTable::standard());

        assert_eq!(
            scores.worst_case,
            vec![Some(6.0), Some(5.0), Some(3.0), Some(6.0), Some(2.0), Some(2.0)]
        );
        // Software Engineer and UX Designer tie at 6; the earlier one wins.
        assert_eq!(scores.selection.name(), Some("Software Engineer"));
        assert_eq!(scores.selection.worst_case(), Some(6.0));
    }

    #[test]
    fn ties_resolve_to_first_inserted_option() {
        let engine = ScoringEngine::new();
        let forward = table(2, &[("A", &[4.0, 9.0]), ("B", &[9.0, 4.0])]);
        let reverse = table(2, &[("B", &[9.0, 4.0]), ("A", &[4.0, 9.0])]);

        for _ in 0..3 {
            assert_eq!(engine.strategy_scores(&forward).selection.name(), Some("A"));
            assert_eq!(engine.strategy_scores(&reverse).selection.name(), Some("B"));
        }
    }

    #[test]
    fn empty_table_reports_no_options() {
        let engine = ScoringEngine::new();
        let report = engine.evaluate(&PayoffTable::empty(Criteria::canonical()));
        assert_eq!(report.selection, Selection::NoOptions);
        assert!(report.rankings.is_empty());
    }

    #[test]
    fn zero_criteria_is_distinct_from_zero_options() {
        let engine = ScoringEngine::new();
        let report = engine.evaluate(&table(0, &[("A", &[]), ("B", &[])]));

        assert_eq!(report.selection, Selection::NoCriteria);
        for entry in &report.rankings {
            assert_eq!(entry.total, 0.0);
            assert_eq!(entry.average, 0.0);
            assert_eq!(entry.worst_case, None);
            assert_eq!(entry.best_case, None);
        }
    }

    #[test]
    fn single_option_is_selected_with_its_minimum() {
        let engine = ScoringEngine::new();
        let scores = engine.strategy_scores(&table(3, &[("Solo", &[7.0, 2.0, 9.0])]));
        assert_eq!(
            scores.selection,
            Selection::Selected {
                index: 0,
                name: "Solo".to_string(),
                worst_case: 2.0,
            }
        );
    }

    #[test]
    fn out_of_range_scores_pass_through_unchanged() {
        let engine = ScoringEngine::new();
        let report = engine.evaluate(&table(2, &[("Wild", &[-3.0, 42.0]), ("Tame", &[5.0, 5.0])]));

        let wild = &report.rankings[0];
        assert_eq!(wild.worst_case, Some(-3.0));
        assert_eq!(wild.best_case, Some(42.0));
        assert_eq!(wild.total, 39.0);
        assert_eq!(report.selection.name(), Some("Tame"));
    }

    #[test]
    fn statistics_respect_ordering_and_mean() {
        let engine = ScoringEngine::new();
        for entry in engine.rankings(&PayoffTable::standard()) {
            let worst = entry.worst_case.expect("criteria present");
            let best = entry.best_case.expect("criteria present");
            assert!(worst <= entry.average && entry.average <= best);
            assert_eq!(entry.average, entry.total / 5.0);
        }
    }

    #[test]
    fn leaderboard_orders_by_worst_case_and_keeps_ties_stable() {
        let engine = ScoringEngine::new();
        let report = engine.evaluate(&PayoffTable::standard());
        let names: Vec<&str> = report
            .leaderboard()
            .into_iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Software Engineer",
                "UX Designer",
                "Data Scientist",
                "MBA",
                "Entrepreneur",
                "Researcher (PhD)"
            ]
        );
    }

    #[test]
    fn format_score_drops_trailing_zeroes_for_whole_numbers() {
        assert_eq!(format_score(5.0), "5");
        assert_eq!(format_score(6.25), "6.25");
    }
}
