use serde::{Deserialize, Serialize};

use crate::types::PartyFormat;

const FIELD_DELIMITER: char = '.';

/// What a user told us about one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PartyDetails {
    /// The answer exactly as typed.
    Raw(String),
    /// Ordered `label → value` pairs.
    Fields(Vec<(String, String)>),
}

impl PartyDetails {
    pub fn from_input(input: &str, format: PartyFormat) -> Self {
        match format {
            PartyFormat::Fields => Self::parse(input),
            PartyFormat::Raw => Self::Raw(input.to_string()),
        }
    }

    /// Split a multi-line answer of the form `N. value` into fields.
    ///
    /// Each line is split on its first `.`; both halves are trimmed. Lines
    /// without a `.` are skipped. A repeated label overwrites the earlier
    /// value but keeps the earlier position. Nothing is validated.
    pub fn parse(input: &str) -> Self {
        let mut fields: Vec<(String, String)> = Vec::new();
        for line in input.lines() {
            let Some((label, value)) = line.split_once(FIELD_DELIMITER) else {
                continue;
            };
            let label = label.trim().to_string();
            let value = value.trim().to_string();
            match fields.iter_mut().find(|(l, _)| *l == label) {
                Some(existing) => existing.1 = value,
                None => fields.push((label, value)),
            }
        }
        Self::Fields(fields)
    }

    /// Render back to text for the document body.
    pub fn format(&self) -> String {
        match self {
            Self::Raw(text) => text.clone(),
            Self::Fields(fields) => fields
                .iter()
                .map(|(label, value)| format!("{label}{FIELD_DELIMITER} {value}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        match self {
            Self::Raw(_) => None,
            Self::Fields(fields) => fields
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v.as_str()),
        }
    }
}

impl std::fmt::Display for PartyDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}
