use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Text that varies with the progression level.
///
/// Lookups use the greatest authored level that does not exceed the
/// requested one, so content only has to be written for the levels at which
/// it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelTextRepr", into = "BTreeMap<String, String>")]
pub struct LevelText(BTreeMap<u32, String>);

impl LevelText {
    /// Create an empty level map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a level map from a sequence where the index is the level.
    pub fn from_sequence<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            texts
                .into_iter()
                .enumerate()
                .map(|(level, text)| (level as u32, text.into()))
                .collect(),
        )
    }

    /// Add a variant for a level.
    pub fn with(mut self, level: u32, text: impl Into<String>) -> Self {
        self.insert(level, text);
        self
    }

    /// Insert or replace the variant for a level.
    pub fn insert(&mut self, level: u32, text: impl Into<String>) {
        self.0.insert(level, text.into());
    }

    /// The text in effect at `level`.
    pub fn at(&self, level: u32) -> Option<&str> {
        self.0
            .range(..=level)
            .next_back()
            .map(|(_, text)| text.as_str())
    }

    /// The text authored for exactly `level`.
    pub fn exact(&self, level: u32) -> Option<&str> {
        self.0.get(&level).map(String::as_str)
    }

    /// Whether no variants are authored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of authored variants.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<LevelText> for BTreeMap<String, String> {
    fn from(text: LevelText) -> Self {
        text.0
            .into_iter()
            .map(|(level, s)| (level.to_string(), s))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelTextRepr {
    Sequence(Vec<String>),
    Keyed(BTreeMap<String, String>),
}

impl TryFrom<LevelTextRepr> for LevelText {
    type Error = String;

    fn try_from(repr: LevelTextRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelTextRepr::Sequence(texts) => Ok(Self::from_sequence(texts)),
            LevelTextRepr::Keyed(map) => map
                .into_iter()
                .map(|(key, text)| {
                    key.parse::<u32>()
                        .map(|level| (level, text))
                        .map_err(|_| format!("invalid progression level key: \"{key}\""))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_lookup() {
        let text = LevelText::new().with(0, "dark").with(2, "lit");
        assert_eq!(text.at(0), Some("dark"));
        assert_eq!(text.at(1), Some("dark"));
        assert_eq!(text.at(2), Some("lit"));
        assert_eq!(text.at(40), Some("lit"));
    }

    #[test]
    fn below_first_authored_level() {
        let text = LevelText::new().with(3, "late");
        assert_eq!(text.at(2), None);
        assert_eq!(text.exact(3), Some("late"));
    }

    #[test]
    fn from_sequence_indexes_by_position() {
        let text = LevelText::from_sequence(["a", "b"]);
        assert_eq!(text.exact(0), Some("a"));
        assert_eq!(text.exact(1), Some("b"));
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn deserializes_list_or_map() {
        let list: LevelText = serde_json::from_str(r#"["zero", "one"]"#).unwrap();
        assert_eq!(list.at(5), Some("one"));

        let map: LevelText = serde_json::from_str(r#"{"0": "zero", "4": "four"}"#).unwrap();
        assert_eq!(map.at(3), Some("zero"));
        assert_eq!(map.at(4), Some("four"));
    }

    #[test]
    fn rejects_non_numeric_keys() {
        let result: Result<LevelText, _> = serde_json::from_str(r#"{"first": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_keyed_map() {
        let text = LevelText::new().with(1, "one");
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"{"1":"one"}"#);
        let back: LevelText = serde_json::from_str(&json).unwrap();
        assert_eq!(back, text);
    }
}
