use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Chat history ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One line of a session's chat history. Entries are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ChatEntry {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

// ── Dialogue stage ───────────────────────────────────────────────────────

/// Position in the document-collection dialogue.
///
/// Stages only move forward, except `AwaitDocType` which repeats until a
/// document type is recognised. `ShowDraft` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Intro,
    AwaitDocType,
    AskPartyA,
    AskPartyB,
    ShowDraft,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Intro => "intro",
            Stage::AwaitDocType => "await_doc_type",
            Stage::AskPartyA => "ask_party_a",
            Stage::AskPartyB => "ask_party_b",
            Stage::ShowDraft => "show_draft",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::ShowDraft)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Party details format ─────────────────────────────────────────────────

/// How a party's free-text answer is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyFormat {
    /// Split into `label. value` fields (lines without a `.` are dropped).
    #[default]
    Fields,
    /// Keep the answer verbatim.
    Raw,
}

impl PartyFormat {
    /// Unknown values fall back to `Fields`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Self::Raw,
            _ => Self::Fields,
        }
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest,
/// e.g. `"lease agreement"` → `"Lease Agreement"`, `"nda"` → `"Nda"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
