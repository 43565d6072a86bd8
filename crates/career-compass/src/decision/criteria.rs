use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One axis of evaluation shared by every option in a payoff table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub key: String,
    pub label: String,
}

impl Criterion {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Builds a criterion from a machine key, e.g. `work_life_balance` -> "Work Life Balance".
    pub fn from_key(key: &str) -> Self {
        Self::new(key, label_for_key(key))
    }

    /// Builds a criterion from a display label, deriving a snake-case key.
    pub fn from_label(label: &str) -> Self {
        Self::new(key_for_label(label), label.trim())
    }
}

/// The eight criterion keys used by the structured agent payload, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCriterion {
    SalaryPotential,
    JobSecurity,
    GrowthOpportunity,
    WorkLifeBalance,
    SkillTransferability,
    MarketDemand,
    EducationBarrier,
    RemoteFlexibility,
}

impl CanonicalCriterion {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::SalaryPotential,
            Self::JobSecurity,
            Self::GrowthOpportunity,
            Self::WorkLifeBalance,
            Self::SkillTransferability,
            Self::MarketDemand,
            Self::EducationBarrier,
            Self::RemoteFlexibility,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::SalaryPotential => "salary_potential",
            Self::JobSecurity => "job_security",
            Self::GrowthOpportunity => "growth_opportunity",
            Self::WorkLifeBalance => "work_life_balance",
            Self::SkillTransferability => "skill_transferability",
            Self::MarketDemand => "market_demand",
            Self::EducationBarrier => "education_barrier",
            Self::RemoteFlexibility => "remote_flexibility",
        }
    }

    /// Guidance text given to the agent for each axis (1-10 scale).
    pub const fn description(self) -> &'static str {
        match self {
            Self::SalaryPotential => "Expected salary range and earning potential",
            Self::JobSecurity => "Stability and job security in the field",
            Self::GrowthOpportunity => "Career advancement and professional growth potential",
            Self::WorkLifeBalance => "Work-life balance and stress levels",
            Self::SkillTransferability => "How transferable skills are to other roles or industries",
            Self::MarketDemand => "Current and future market demand for this role",
            Self::EducationBarrier => "Ease of entry and educational requirements (higher = easier)",
            Self::RemoteFlexibility => "Ability to work remotely or other flexibility options",
        }
    }

    pub fn criterion(self) -> Criterion {
        Criterion::from_key(self.key())
    }
}

const DEFAULT_LABELS: [&str; 5] = [
    "Salary",
    "Stability",
    "Growth",
    "Risk-Resistance",
    "Ease of Education",
];

/// Ordered criteria sequence. Index `i` means the same criterion in every score vector.
///
/// There is no way to mutate a `Criteria` once built; changing criteria means building a
/// new table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(Vec<Criterion>);

impl Criteria {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self(criteria)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The five labels used by the built-in career table.
    pub fn default_labels() -> Self {
        Self::from_labels(DEFAULT_LABELS)
    }

    /// The eight structured-payload criteria in schema order.
    pub fn canonical() -> Self {
        Self(
            CanonicalCriterion::ordered()
                .into_iter()
                .map(CanonicalCriterion::criterion)
                .collect(),
        )
    }

    /// Derives a key per label. Colliding keys get `_2`, `_3`, ... suffixes and labels
    /// without any alphanumerics become `criterion_<n>`, so keys stay unique.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut taken = HashSet::new();
        let mut criteria = Vec::new();

        for (index, label) in labels.into_iter().enumerate() {
            let mut criterion = Criterion::from_label(label.as_ref());
            if criterion.key.is_empty() {
                criterion.key = format!("criterion_{}", index + 1);
            }

            let base = criterion.key.clone();
            let mut suffix = 2;
            while taken.contains(&criterion.key) {
                criterion.key = format!("{base}_{suffix}");
                suffix += 1;
            }

            taken.insert(criterion.key.clone());
            criteria.push(criterion);
        }

        Self(criteria)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Criterion> {
        self.0.get(index)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|criterion| criterion.label.as_str()).collect()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|criterion| criterion.key.as_str()).collect()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|criterion| criterion.key == key)
    }

    /// Same keys in the same order; labels may differ.
    pub fn same_keys(&self, other: &Criteria) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(left, right)| left.key == right.key)
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels().join(", "))
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits a snake-case key into words and title-cases each one.
pub fn label_for_key(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn key_for_label(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub(crate) fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
