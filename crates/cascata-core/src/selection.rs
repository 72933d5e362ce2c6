use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a choice. Compared only for equality; the engine
/// never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(id: impl Into<String>) -> Self {
        Key(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(id: &str) -> Self {
        Key(id.to_string())
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Key(id)
    }
}

/// One selectable option: an opaque key plus the label shown for it.
///
/// A committed selection is the same shape, so a hydrated value can be
/// displayed before the option list backing its level has loaded. Keys are
/// unique within a single fetch result; labels are not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: Key,
    pub label: String,
}

impl Choice {
    pub fn new(id: impl Into<Key>, label: impl Into<String>) -> Self {
        Choice {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// A picker level's committed value. `None` means nothing is selected.
pub type Selection = Option<Choice>;

/// Case-insensitive substring filter over labels, for searchable pickers.
pub fn filter_by_label<'a>(choices: &'a [Choice], input: &str) -> Vec<&'a Choice> {
    let needle = input.to_lowercase();
    choices
        .iter()
        .filter(|c| c.label.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_label_case_insensitive() {
        let choices = vec![
            Choice::new("s1", "Phones"),
            Choice::new("s2", "Laptops"),
            Choice::new("s3", "Headphones"),
        ];

        let hits = filter_by_label(&choices, "phone");
        let ids: Vec<&str> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);

        assert!(filter_by_label(&choices, "LAPTOP").len() == 1);
        assert_eq!(filter_by_label(&choices, "").len(), 3);
        assert!(filter_by_label(&choices, "tablet").is_empty());
    }

    #[test]
    fn test_key_serde_transparent() {
        let key = Key::new("c1");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"c1\"");
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
