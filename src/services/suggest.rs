/// Suggestion engine
/// Ranked autocomplete over the command catalog. Read-only and infallible:
/// input that matches nothing yields an empty set, not an error.

use crate::models::CommandEntry;
use crate::services::catalog::CommandCatalog;

/// Match quality tiers. Prefix matches always outrank substring matches.
const TIER_PREFIX: u8 = 0;
const TIER_SUBSTRING: u8 = 1;

/// Build a fresh ranked suggestion set for `partial`.
///
/// Ordering: prefix matches before substring matches, shorter names before
/// longer ones within a tier, catalog insertion order for remaining ties.
/// An exact catalog name is therefore always first. Empty input yields an
/// empty set; the caller is expected to hide its suggestion UI in that case.
pub fn suggest(catalog: &CommandCatalog, partial: &str) -> Vec<CommandEntry> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(u8, usize, &CommandEntry)> = catalog
        .entries()
        .iter()
        .filter_map(|entry| {
            let name = entry.name.to_lowercase();
            if name.starts_with(&needle) {
                Some((TIER_PREFIX, entry.name.len(), entry))
            } else if name.contains(&needle) {
                Some((TIER_SUBSTRING, entry.name.len(), entry))
            } else {
                None
            }
        })
        .collect();

    // Stable sort: equal (tier, length) keys keep catalog order.
    ranked.sort_by_key(|(tier, length, _)| (*tier, *length));

    ranked.into_iter().map(|(_, _, entry)| entry.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[(&str, &str)]) -> CommandCatalog {
        let mut catalog = CommandCatalog::new();
        for (name, description) in names {
            catalog.extend(CommandEntry::new(*name, *description));
        }
        catalog
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let catalog = CommandCatalog::builtin();
        assert!(suggest(&catalog, "").is_empty());
        assert!(suggest(&catalog, "   ").is_empty());
    }

    #[test]
    fn unmatched_input_yields_empty_set() {
        let catalog = catalog(&[("git", "vcs")]);
        assert!(suggest(&catalog, "qqqq").is_empty());
    }

    #[test]
    fn exact_name_ranks_first() {
        let catalog = catalog(&[("gitk", "history browser"), ("git", "vcs")]);
        let matches = suggest(&catalog, "git");
        assert_eq!(matches[0].name, "git");
        assert_eq!(matches[1].name, "gitk");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = catalog(&[("git", "vcs")]);
        let matches = suggest(&catalog, "GI");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "git");
    }

    #[test]
    fn prefix_matches_outrank_substring_matches() {
        let catalog = catalog(&[("exit", "leave"), ("it", "short")]);
        let matches = suggest(&catalog, "it");
        // "it" is a prefix match, "exit" only contains the needle.
        assert_eq!(matches[0].name, "it");
        assert_eq!(matches[1].name, "exit");
    }

    #[test]
    fn shorter_names_rank_first_within_a_tier() {
        let catalog = catalog(&[("pstree", "process tree"), ("ps", "processes")]);
        let matches = suggest(&catalog, "ps");
        assert_eq!(matches[0].name, "ps");
        assert_eq!(matches[1].name, "pstree");
    }

    #[test]
    fn equal_keys_keep_catalog_order() {
        let catalog = catalog(&[("tac", "reverse cat"), ("tar", "archives")]);
        let matches = suggest(&catalog, "ta");
        assert_eq!(matches[0].name, "tac");
        assert_eq!(matches[1].name, "tar");
    }

    #[test]
    fn result_has_no_duplicates() {
        let catalog = CommandCatalog::builtin();
        let matches = suggest(&catalog, "c");
        for (i, entry) in matches.iter().enumerate() {
            assert!(!matches[i + 1..].iter().any(|other| other.name == entry.name));
        }
    }
}
