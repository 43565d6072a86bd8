use super::normalizer::display_name;
use regex::Regex;
use std::sync::OnceLock;

static ROLE_PATTERNS: OnceLock<Vec<RolePattern>> = OnceLock::new();

struct RolePattern {
    regex: Regex,
    naming: Naming,
}

#[derive(Clone, Copy)]
enum Naming {
    /// The whole first capture is the career name.
    Capture,
    /// Degree plus holder noun, e.g. "MBA Graduate".
    DegreeHolder,
}

fn role_patterns() -> &'static [RolePattern] {
    ROLE_PATTERNS.get_or_init(|| {
        // Specific phrases precede the generic nouns they contain so that leftmost-first
        // alternation reports "software engineer" once instead of also yielding "engineer".
        const PATTERNS: &[(&str, Naming)] = &[
            (
                r"(?i)\b(software engineer|data scientist|product manager|consultant|researcher|analyst|developer|designer|manager|scientist|engineer|architect|specialist)\b",
                Naming::Capture,
            ),
            (
                r"(?i)\b(mba|phd|master's|bachelor's)\b[^.!?\n]*?\b(holder|graduate|student)\b",
                Naming::DegreeHolder,
            ),
            (
                r"(?i)\b(marketing|sales|finance|operations|strategy|consulting)\b[^.!?\n]*?\b(?:role|position|career|job)",
                Naming::Capture,
            ),
        ];

        PATTERNS
            .iter()
            .map(|(pattern, naming)| RolePattern {
                regex: Regex::new(pattern).expect("role vocabulary pattern must compile"),
                naming: *naming,
            })
            .collect()
    })
}

/// Career names mentioned in free text, in the order they first appear.
///
/// Names are title-cased, deduplicated, stripped of anything shorter than three
/// characters, and capped at `limit`.
pub(crate) fn discover_careers(text: &str, limit: usize) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for pattern in role_patterns() {
        for captures in pattern.regex.captures_iter(text) {
            let Some(first) = captures.get(1) else {
                continue;
            };
            let raw = match pattern.naming {
                Naming::Capture => first.as_str().to_string(),
                Naming::DegreeHolder => match captures.get(2) {
                    Some(holder) => format!("{} {}", first.as_str(), holder.as_str()),
                    None => first.as_str().to_string(),
                },
            };
            found.push((first.start(), raw));
        }
    }

    // Stable: equal offsets keep pattern priority.
    found.sort_by_key(|(offset, _)| *offset);

    let mut careers: Vec<String> = Vec::new();
    for (_, raw) in found {
        if raw.trim().chars().count() <= 2 {
            continue;
        }
        let name = display_name(&raw);
        if !careers.contains(&name) {
            careers.push(name);
        }
    }

    careers.truncate(limit);
    careers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_phrase_is_not_split_into_generic_noun() {
        let careers = discover_careers("I'm comparing software engineer and designer roles", 6);
        assert_eq!(careers, vec!["Software Engineer", "Designer"]);
    }

    #[test]
    fn matches_are_case_insensitive_and_deduplicated() {
        let careers = discover_careers("Data Scientist vs DATA SCIENTIST vs data scientist", 6);
        assert_eq!(careers, vec!["Data Scientist"]);
    }

    #[test]
    fn degree_holders_and_functional_roles_are_recognized() {
        let careers =
            discover_careers("As an MBA graduate I could take a marketing role. Or be an analyst.", 6);
        assert_eq!(careers, vec!["MBA Graduate", "Marketing", "Analyst"]);
    }

    #[test]
    fn discovery_is_capped_in_text_order() {
        let text = "analyst, architect, consultant, designer, developer, researcher, specialist, engineer";
        let careers = discover_careers(text, 6);
        assert_eq!(
            careers,
            vec!["Analyst", "Architect", "Consultant", "Designer", "Developer", "Researcher"]
        );
    }

    #[test]
    fn words_inside_other_words_do_not_match() {
        assert!(discover_careers("The engineering manageress redesigned it", 6).is_empty());
    }
}
