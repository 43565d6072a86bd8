use crate::decision::criteria::title_case_word;

const ACRONYMS: &[(&str, &str)] = &[("mba", "MBA"), ("phd", "PhD"), ("ux", "UX"), ("ai", "AI")];

/// Title-cases a matched phrase for display, keeping well-known acronyms intact.
pub(crate) fn display_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let lowered = word.to_lowercase();
            ACRONYMS
                .iter()
                .find(|(plain, _)| *plain == lowered)
                .map(|(_, acronym)| (*acronym).to_string())
                .unwrap_or_else(|| title_case_word(word))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased, whitespace-collapsed form used for vocabulary lookups.
pub(crate) fn lookup_key(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name("software   ENGINEER"), "Software Engineer");
        assert_eq!(display_name("master's student"), "Master's Student");
    }

    #[test]
    fn display_name_keeps_acronyms() {
        assert_eq!(display_name("mba graduate"), "MBA Graduate");
        assert_eq!(display_name("PHD holder"), "PhD Holder");
    }

    #[test]
    fn lookup_key_collapses_whitespace_and_case() {
        assert_eq!(lookup_key("  Product\tManager "), "product manager");
    }
}
