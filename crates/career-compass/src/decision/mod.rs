//! Payoff tables, minimax scoring, and the text explanation of a decision.

pub mod criteria;
pub mod csv_table;
pub mod explain;
pub mod model;
pub mod scoring;
pub mod table;
pub mod update;

pub use criteria::{CanonicalCriterion, Criteria, Criterion};
pub use csv_table::{read_table, read_table_from_path, table_to_csv, write_table, CsvTableError};
pub use explain::render_explanation;
pub use model::{AgentResponse, CareerDecisionModel};
pub use scoring::{
    format_score, DecisionReport, RankingEntry, ScoringEngine, Selection, StrategyScores,
};
pub use table::{CareerOption, PayoffMatrix, PayoffTable, Score, TableError, NEUTRAL_SCORE};
pub use update::{apply_update, UpdateMode, UpdateSummary};
