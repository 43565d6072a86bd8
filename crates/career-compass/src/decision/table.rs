use super::criteria::Criteria;
use serde::{Deserialize, Serialize};

/// A qualitative judgment, nominally on a 1-10 scale.
///
/// Nothing in the decision model clamps or validates the range: out-of-range values are
/// accepted and take part in the arithmetic unchanged.
pub type Score = f64;

/// Score assigned to a criterion the source data left out.
pub const NEUTRAL_SCORE: Score = 5.0;

const DEFAULT_CAREERS: [(&str, [Score; 5]); 6] = [
    ("Software Engineer", [9.0, 6.0, 7.0, 6.0, 6.0]),
    ("Data Scientist", [8.0, 7.0, 8.0, 5.0, 6.0]),
    ("MBA", [6.0, 5.0, 9.0, 3.0, 9.0]),
    ("UX Designer", [7.0, 6.0, 6.0, 7.0, 7.0]),
    ("Entrepreneur", [9.0, 3.0, 10.0, 2.0, 4.0]),
    ("Researcher (PhD)", [5.0, 8.0, 6.0, 7.0, 2.0]),
];

/// A named career and its score on each criterion of the owning table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerOption {
    pub name: String,
    pub scores: Vec<Score>,
}

impl CareerOption {
    pub fn new(name: impl Into<String>, scores: Vec<Score>) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("option '{option}' has {actual} scores but the table defines {expected} criteria")]
    VectorLengthMismatch {
        option: String,
        expected: usize,
        actual: usize,
    },
    #[error("criteria [{actual}] do not match the active table criteria [{expected}]")]
    CriteriaMismatch { expected: String, actual: String },
}

/// Career options sharing one ordered criteria sequence.
///
/// Option names are unique keys compared verbatim (no case or whitespace folding).
/// Options keep their insertion order, which downstream tie-breaks rely on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffTable {
    criteria: Criteria,
    options: Vec<CareerOption>,
}

/// Read-only matrix view: `rows[i]` holds the scores of `names[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffMatrix<'a> {
    pub names: Vec<&'a str>,
    pub rows: Vec<&'a [Score]>,
}

impl PayoffMatrix<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) enum Upsert {
    Inserted,
    Updated,
}

impl PayoffTable {
    /// The built-in table: six illustrative careers scored on five criteria.
    pub fn standard() -> Self {
        let options = DEFAULT_CAREERS
            .iter()
            .map(|(name, scores)| CareerOption::new(*name, scores.to_vec()))
            .collect();

        Self {
            criteria: Criteria::default_labels(),
            options,
        }
    }

    pub fn empty(criteria: Criteria) -> Self {
        Self {
            criteria,
            options: Vec::new(),
        }
    }

    /// Builds a table, rejecting any option whose vector length differs from `criteria`.
    pub fn new<I>(criteria: Criteria, options: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = CareerOption>,
    {
        let options = collect_options(&criteria, options)?;
        Ok(Self { criteria, options })
    }

    /// Missing options fall back to the built-in careers; missing criteria fall back to
    /// the built-in five labels.
    pub fn construct(
        options: Option<Vec<CareerOption>>,
        criteria: Option<Criteria>,
    ) -> Result<Self, TableError> {
        let criteria = criteria.unwrap_or_else(Criteria::default_labels);
        match options {
            Some(options) => Self::new(criteria, options),
            None => Self::new(criteria, Self::standard().options),
        }
    }

    /// Overwrites every option. The criteria are replaced when given and kept otherwise.
    ///
    /// Validation happens before anything is written, so on error the table is unchanged.
    pub fn replace(
        &mut self,
        options: Vec<CareerOption>,
        criteria: Option<Criteria>,
    ) -> Result<(), TableError> {
        let next_criteria = criteria.as_ref().unwrap_or(&self.criteria);
        let options = collect_options(next_criteria, options)?;

        if let Some(criteria) = criteria {
            self.criteria = criteria;
        }
        self.options = options;
        Ok(())
    }

    pub fn as_matrix(&self) -> PayoffMatrix<'_> {
        PayoffMatrix {
            names: self.options.iter().map(|option| option.name.as_str()).collect(),
            rows: self.options.iter().map(|option| option.scores.as_slice()).collect(),
        }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn options(&self) -> &[CareerOption] {
        &self.options
    }

    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(|option| option.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&CareerOption> {
        self.options.iter().find(|option| option.name == name)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn upsert(&mut self, option: CareerOption) -> Result<Upsert, TableError> {
        check_length(&self.criteria, &option)?;
        Ok(insert_or_overwrite(&mut self.options, option))
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn collect_options<I>(criteria: &Criteria, options: I) -> Result<Vec<CareerOption>, TableError>
where
    I: IntoIterator<Item = CareerOption>,
{
    let mut collected: Vec<CareerOption> = Vec::new();
    for option in options {
        check_length(criteria, &option)?;
        insert_or_overwrite(&mut collected, option);
    }
    Ok(collected)
}

fn check_length(criteria: &Criteria, option: &CareerOption) -> Result<(), TableError> {
    if option.scores.len() == criteria.len() {
        Ok(())
    } else {
        Err(TableError::VectorLengthMismatch {
            option: option.name.clone(),
            expected: criteria.len(),
            actual: option.scores.len(),
        })
    }
}

// Map-assignment semantics: a repeated name keeps its first position, takes the new scores.
fn insert_or_overwrite(options: &mut Vec<CareerOption>, option: CareerOption) -> Upsert {
    match options.iter_mut().find(|existing| existing.name == option.name) {
        Some(existing) => {
            existing.scores = option.scores;
            Upsert::Updated
        }
        None => {
            options.push(option);
            Upsert::Inserted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::criteria::Criterion;

    fn two_criteria() -> Criteria {
        Criteria::new(vec![Criterion::new("pay", "Pay"), Criterion::new("fun", "Fun")])
    }

    #[test]
    fn standard_table_has_six_careers_over_five_criteria() {
        let table = PayoffTable::standard();
        assert_eq!(table.len(), 6);
        assert_eq!(table.criteria().len(), 5);
        assert_eq!(
            table.names(),
            vec![
                "Software Engineer",
                "Data Scientist",
                "MBA",
                "UX Designer",
                "Entrepreneur",
                "Researcher (PhD)"
            ]
        );
        assert!(table
            .options()
            .iter()
            .all(|option| option.scores.len() == 5));
    }

    #[test]
    fn construct_without_criteria_uses_default_labels() {
        let table = PayoffTable::construct(
            Some(vec![CareerOption::new("Nurse", vec![7.0, 9.0, 6.0, 5.0, 4.0])]),
            None,
        )
        .expect("five scores match the default labels");
        assert_eq!(table.criteria(), &Criteria::default_labels());
        assert_eq!(table.names(), vec!["Nurse"]);
    }

    #[test]
    fn construct_rejects_vectors_that_do_not_fit_default_labels() {
        let error = PayoffTable::construct(
            Some(vec![CareerOption::new("AI Engineer", vec![10.0, 7.0, 9.0])]),
            None,
        )
        .expect_err("three scores against five labels");

        assert_eq!(
            error,
            TableError::VectorLengthMismatch {
                option: "AI Engineer".to_string(),
                expected: 5,
                actual: 3,
            }
        );
    }

    #[test]
    fn replace_keeps_labels_when_none_given() {
        let mut table = PayoffTable::standard();
        table
            .replace(
                vec![
                    CareerOption::new("AI Engineer", vec![10.0, 7.0, 9.0, 5.0, 7.0]),
                    CareerOption::new("Consultant", vec![7.0, 6.0, 7.0, 4.0, 9.0]),
                ],
                None,
            )
            .expect("replacement fits existing labels");

        assert_eq!(table.criteria(), &Criteria::default_labels());
        assert_eq!(table.names(), vec!["AI Engineer", "Consultant"]);
    }

    #[test]
    fn failed_replace_leaves_table_untouched() {
        let mut table = PayoffTable::standard();
        let before = table.clone();

        let result = table.replace(
            vec![
                CareerOption::new("Ok", vec![1.0, 2.0]),
                CareerOption::new("Short", vec![1.0]),
            ],
            Some(two_criteria()),
        );

        assert!(matches!(
            result,
            Err(TableError::VectorLengthMismatch { ref option, .. }) if option == "Short"
        ));
        assert_eq!(table, before);
    }

    #[test]
    fn duplicate_names_keep_first_position_with_last_scores() {
        let table = PayoffTable::new(
            two_criteria(),
            vec![
                CareerOption::new("A", vec![1.0, 1.0]),
                CareerOption::new("B", vec![2.0, 2.0]),
                CareerOption::new("A", vec![3.0, 3.0]),
            ],
        )
        .expect("valid table");

        assert_eq!(table.names(), vec!["A", "B"]);
        assert_eq!(table.get("A").map(|o| o.scores.clone()), Some(vec![3.0, 3.0]));
    }

    #[test]
    fn names_are_not_normalized() {
        let table = PayoffTable::new(
            two_criteria(),
            vec![
                CareerOption::new("Analyst", vec![1.0, 1.0]),
                CareerOption::new("analyst ", vec![2.0, 2.0]),
            ],
        )
        .expect("valid table");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn matrix_is_parallel_and_stable() {
        let table = PayoffTable::standard();
        let first = table.as_matrix();
        let second = table.as_matrix();
        assert_eq!(first, second);
        assert_eq!(first.names[2], "MBA");
        assert_eq!(first.rows[2], &[6.0, 5.0, 9.0, 3.0, 9.0]);
    }
}
