use super::table::{PayoffTable, TableError, Upsert};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a candidate table is folded into the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Discard the active table and adopt the candidate wholesale.
    #[default]
    Replace,
    /// Upsert candidate options into the active table; criteria must share keys.
    Merge,
}

impl UpdateMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Replace => "Replace",
            Self::Merge => "Merge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub mode: UpdateMode,
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
    pub total: usize,
}

pub fn apply_update(
    active: &mut PayoffTable,
    candidate: PayoffTable,
    mode: UpdateMode,
) -> Result<UpdateSummary, TableError> {
    let summary = match mode {
        UpdateMode::Replace => replace(active, candidate)?,
        UpdateMode::Merge => merge(active, candidate)?,
    };

    debug!(
        mode = summary.mode.label(),
        inserted = summary.inserted,
        updated = summary.updated,
        removed = summary.removed,
        total = summary.total,
        "payoff table updated"
    );
    Ok(summary)
}

fn replace(active: &mut PayoffTable, candidate: PayoffTable) -> Result<UpdateSummary, TableError> {
    let previous: Vec<String> = active.names().into_iter().map(str::to_owned).collect();
    let kept = candidate
        .names()
        .into_iter()
        .filter(|name| previous.iter().any(|existing| existing == name))
        .count();

    let candidate_len = candidate.len();
    let criteria = candidate.criteria().clone();
    active.replace(candidate.options().to_vec(), Some(criteria))?;

    Ok(UpdateSummary {
        mode: UpdateMode::Replace,
        inserted: candidate_len - kept,
        updated: kept,
        removed: previous.len() - kept,
        total: active.len(),
    })
}

fn merge(active: &mut PayoffTable, candidate: PayoffTable) -> Result<UpdateSummary, TableError> {
    if !active.criteria().same_keys(candidate.criteria()) {
        return Err(TableError::CriteriaMismatch {
            expected: active.criteria().keys().join(", "),
            actual: candidate.criteria().keys().join(", "),
        });
    }

    let mut inserted = 0;
    let mut updated = 0;
    for option in candidate.options().iter().cloned() {
        match active.upsert(option)? {
            Upsert::Inserted => inserted += 1,
            Upsert::Updated => updated += 1,
        }
    }

    Ok(UpdateSummary {
        mode: UpdateMode::Merge,
        inserted,
        updated,
        removed: 0,
        total: active.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::criteria::Criteria;
    use crate::decision::table::CareerOption;

    fn canonical_table(options: &[(&str, f64)]) -> PayoffTable {
        PayoffTable::new(
            Criteria::canonical(),
            options
                .iter()
                .map(|(name, score)| CareerOption::new(*name, vec![*score; 8])),
        )
        .expect("valid table")
    }

    #[test]
    fn replace_adopts_candidate_criteria_and_options() {
        let mut active = PayoffTable::standard();
        let candidate = canonical_table(&[("Data Scientist", 7.0), ("Nurse", 6.0)]);

        let summary =
            apply_update(&mut active, candidate.clone(), UpdateMode::Replace).expect("replace");

        assert_eq!(active, candidate);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.removed, 5);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn merge_upserts_in_place_and_appends_new_options() {
        let mut active = canonical_table(&[("Analyst", 6.0), ("Designer", 7.0)]);
        let candidate = canonical_table(&[("Designer", 4.0), ("Architect", 8.0)]);

        let summary = apply_update(&mut active, candidate, UpdateMode::Merge).expect("merge");

        assert_eq!(active.names(), vec!["Analyst", "Designer", "Architect"]);
        assert_eq!(
            active.get("Designer").map(|o| o.scores[0]),
            Some(4.0)
        );
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.removed, 0);
    }

    #[test]
    fn merge_refuses_different_criteria() {
        let mut active = PayoffTable::standard();
        let before = active.clone();
        let candidate = canonical_table(&[("Nurse", 6.0)]);

        let error = apply_update(&mut active, candidate, UpdateMode::Merge)
            .expect_err("criteria differ");

        assert!(matches!(error, TableError::CriteriaMismatch { .. }));
        assert_eq!(active, before);
    }
}
