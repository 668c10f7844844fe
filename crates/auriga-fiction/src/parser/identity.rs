//! Longest-match resolution of entity names inside a command.

use super::normalize::normalize;

#[derive(Debug, Clone)]
struct Candidate {
    tokens: Vec<String>,
    canonical: String,
}

/// Canonical names plus aliases for one identity space (exit types, items,
/// characters or directions), ordered for longest-match lookup.
///
/// Candidates are tried longest first by token count. At equal length
/// canonical names come before aliases; otherwise table order is kept.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    candidates: Vec<Candidate>,
}

impl IdentityTable {
    /// Build a table from canonical names and `alias -> canonical` pairs.
    pub fn new<C, S, A, K, V>(canonical: C, aliases: A) -> Self
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
        A: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut ranked: Vec<(bool, Candidate)> = canonical
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                (false, candidate(name, name))
            })
            .chain(
                aliases
                    .into_iter()
                    .map(|(alias, target)| (true, candidate(alias.as_ref(), target.as_ref()))),
            )
            .filter(|(_, c)| !c.tokens.is_empty())
            .collect();

        ranked.sort_by_key(|(is_alias, c)| (std::cmp::Reverse(c.tokens.len()), *is_alias));

        Self {
            candidates: ranked.into_iter().map(|(_, c)| c).collect(),
        }
    }

    /// Find the canonical name of the first candidate whose tokens appear
    /// as a contiguous run of `tokens`.
    pub fn resolve(&self, tokens: &[String]) -> Option<&str> {
        self.candidates
            .iter()
            .find(|c| tokens.windows(c.tokens.len()).any(|w| w == c.tokens.as_slice()))
            .map(|c| c.canonical.as_str())
    }

    /// Number of names and aliases in the table.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the table has no names.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn candidate(name: &str, canonical: &str) -> Candidate {
    Candidate {
        tokens: normalize(name),
        canonical: canonical.to_string(),
    }
}

/// One-off lookup without keeping a table around.
pub fn resolve(tokens: &[String], canonical: &[&str], aliases: &[(&str, &str)]) -> Option<String> {
    IdentityTable::new(canonical.iter(), aliases.iter().map(|(k, v)| (*k, *v)))
        .resolve(tokens)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens(line: &str) -> Vec<String> {
        normalize(line)
    }

    fn items() -> IdentityTable {
        IdentityTable::new(
            ["usb drive", "usb cord", "ssd", "security badge"],
            [
                ("usb", "usb drive"),
                ("usb cable", "usb cord"),
                ("cable", "usb cord"),
                ("drive", "ssd"),
                ("badge", "security badge"),
            ],
        )
    }

    #[test]
    fn canonical_match() {
        assert_eq!(items().resolve(&tokens("take the ssd")), Some("ssd"));
    }

    #[test]
    fn multi_word_alias_beats_shorter_alias() {
        assert_eq!(items().resolve(&tokens("grab the usb cable")), Some("usb cord"));
    }

    #[test]
    fn longer_canonical_beats_shorter_alias() {
        assert_eq!(items().resolve(&tokens("use usb drive")), Some("usb drive"));
        assert_eq!(items().resolve(&tokens("use usb")), Some("usb drive"));
    }

    #[test]
    fn words_must_be_contiguous() {
        assert_eq!(items().resolve(&tokens("security old badge")), Some("security badge"));
        let only_canonical = IdentityTable::new(["security badge"], Vec::<(&str, &str)>::new());
        assert_eq!(only_canonical.resolve(&tokens("security old badge")), None);
    }

    #[test]
    fn no_substring_matches() {
        assert_eq!(items().resolve(&tokens("take ssds")), None);
        assert_eq!(items().resolve(&tokens("take usbdrive")), None);
    }

    #[test]
    fn empty_names_never_match() {
        let table = IdentityTable::new(["", "the"], [("an", "x")]);
        assert!(table.is_empty());
        assert_eq!(table.resolve(&tokens("anything at all")), None);
    }

    #[test]
    fn canonical_case_is_preserved() {
        let table = IdentityTable::new(["PR2"], [("robot", "PR2")]);
        assert_eq!(table.resolve(&tokens("talk to pr2")), Some("PR2"));
        assert_eq!(table.resolve(&tokens("talk to robot")), Some("PR2"));
    }

    #[test]
    fn free_function() {
        let found = resolve(&tokens("go north"), &["north"], &[("n", "north")]);
        assert_eq!(found.as_deref(), Some("north"));
        let found = resolve(&tokens("go n"), &["north"], &[("n", "north")]);
        assert_eq!(found.as_deref(), Some("north"));
    }

    proptest! {
        #[test]
        fn multi_word_name_found_anywhere(
            before in prop::collection::vec("[b-k]{1,5}", 0..4),
            after in prop::collection::vec("[b-k]{1,5}", 0..4),
        ) {
            let mut input = before.clone();
            input.extend(["usb".to_string(), "cable".to_string()]);
            input.extend(after.clone());
            let items = items();
            prop_assert_eq!(items.resolve(&input), Some("usb cord"));
        }

        #[test]
        fn unrelated_words_never_match(words in prop::collection::vec("[e-k]{1,8}", 0..6)) {
            let items = items();
            prop_assert_eq!(items.resolve(&words), None);
        }
    }
}
