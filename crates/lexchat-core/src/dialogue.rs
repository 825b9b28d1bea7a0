use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    catalog::{detect_document_type, DocumentType},
    parties::PartyDetails,
    prompts,
    template::render_document,
    types::{ChatEntry, PartyFormat, Stage},
};

/// All state for one user's drafting conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftingSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub stage: Stage,
    pub doc_type: Option<DocumentType>,
    pub party_a: Option<PartyDetails>,
    pub party_b: Option<PartyDetails>,
    pub final_draft: Option<String>,
    pub history: Vec<ChatEntry>,
    pub party_format: PartyFormat,
}

/// Result of feeding one user message to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub reply: String,
    pub stage: Stage,
    pub draft_ready: bool,
}

impl DraftingSession {
    pub fn new(id: impl Into<String>, party_format: PartyFormat) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            stage: Stage::Intro,
            doc_type: None,
            party_a: None,
            party_b: None,
            final_draft: None,
            history: Vec::new(),
            party_format,
        }
    }

    /// Consume one user message: record it, run the stage transition, record
    /// the single scripted reply.
    pub fn handle_message(&mut self, text: &str) -> Turn {
        self.history.push(ChatEntry::user(text));
        let from = self.stage;

        let reply = match self.stage {
            Stage::Intro => {
                self.stage = Stage::AwaitDocType;
                prompts::DOCUMENT_MENU.to_string()
            },

            Stage::AwaitDocType => match detect_document_type(text) {
                Some(doc_type) => {
                    self.doc_type = Some(doc_type);
                    self.stage = Stage::AskPartyA;
                    prompts::party_a_prompt(doc_type)
                },
                None => {
                    debug!(session_id = %self.id, "no document type in input, re-prompting");
                    prompts::UNKNOWN_DOCUMENT_TYPE.to_string()
                },
            },

            Stage::AskPartyA => {
                self.party_a = Some(PartyDetails::from_input(text, self.party_format));
                self.stage = Stage::AskPartyB;
                prompts::party_b_prompt()
            },

            Stage::AskPartyB => {
                self.party_b = Some(PartyDetails::from_input(text, self.party_format));
                self.stage = Stage::ShowDraft;
                let doc_type = self.selected_type();
                let draft = render_document(
                    doc_type,
                    self.party_a.as_ref().unwrap_or(&EMPTY_PARTY),
                    self.party_b.as_ref().unwrap_or(&EMPTY_PARTY),
                );
                info!(
                    session_id = %self.id,
                    doc_type = %doc_type,
                    draft_len = draft.len(),
                    "draft rendered"
                );
                let reply = prompts::draft_ready(doc_type, &draft);
                self.final_draft = Some(draft);
                reply
            },

            Stage::ShowDraft => prompts::conversation_complete(self.selected_type()),
        };

        if from != self.stage {
            debug!(session_id = %self.id, from = %from, to = %self.stage, "stage transition");
        }

        self.history.push(ChatEntry::assistant(reply.clone()));
        Turn {
            reply,
            stage: self.stage,
            draft_ready: self.final_draft.is_some(),
        }
    }

    /// File name for the draft download, once a draft exists.
    pub fn draft_file_name(&self) -> Option<String> {
        self.final_draft.as_ref()?;
        self.doc_type.map(|dt| dt.draft_file_name())
    }

    // doc_type is set when leaving AwaitDocType; a session restored without
    // one falls back to a plain contract.
    fn selected_type(&self) -> DocumentType {
        match self.doc_type {
            Some(dt) => dt,
            None => {
                warn!(
                    session_id = %self.id,
                    stage = %self.stage,
                    "no document type recorded, drafting a contract"
                );
                DocumentType::Contract
            },
        }
    }
}

static EMPTY_PARTY: PartyDetails = PartyDetails::Fields(Vec::new());

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::types::Speaker;

    fn session() -> DraftingSession {
        DraftingSession::new("test", PartyFormat::Fields)
    }

    #[test]
    #[traced_test]
    fn missing_doc_type_drafts_contract_and_warns() {
        let mut s = session();
        s.stage = Stage::AskPartyB;
        s.party_a = Some(PartyDetails::from_input("1. Acme", PartyFormat::Fields));
        let turn = s.handle_message("1. Jane");
        assert_eq!(turn.stage, Stage::ShowDraft);
        let draft = s.final_draft.as_deref().unwrap();
        assert!(draft.starts_with("\n*CONTRACT*"));
        assert!(logs_contain("no document type recorded"));
    }

    #[test]
    fn intro_emits_menu_on_any_input() {
        let mut s = session();
        let turn = s.handle_message("hi");
        assert_eq!(turn.stage, Stage::AwaitDocType);
        assert_eq!(turn.reply, prompts::DOCUMENT_MENU);
        assert!(!turn.draft_ready);
    }

    #[test]
    fn unknown_type_self_loops_without_other_changes() {
        let mut s = session();
        s.handle_message("hi");
        let turn = s.handle_message("something else");
        assert_eq!(turn.stage, Stage::AwaitDocType);
        assert_eq!(turn.reply, prompts::UNKNOWN_DOCUMENT_TYPE);
        assert!(s.doc_type.is_none());
        assert!(s.party_a.is_none());
        assert_eq!(s.history.len(), 4);
    }

    #[test]
    fn party_answers_are_accepted_even_when_empty() {
        let mut s = session();
        s.handle_message("hi");
        s.handle_message("contract");
        assert_eq!(s.handle_message("").stage, Stage::AskPartyB);
        assert_eq!(s.party_a, Some(PartyDetails::Fields(Vec::new())));
        assert_eq!(s.handle_message("garbage").stage, Stage::ShowDraft);
        assert!(s.final_draft.is_some());
    }

    #[test]
    fn raw_format_keeps_answer_verbatim() {
        let mut s = DraftingSession::new("raw", PartyFormat::Raw);
        s.handle_message("hi");
        s.handle_message("freelance agreement");
        s.handle_message("Alice Smith, Springfield");
        s.handle_message("Bob Jones, Shelbyville");
        let draft = s.final_draft.clone().unwrap();
        assert!(draft.contains("*Party A:*  \nAlice Smith, Springfield\n"));
        assert!(draft.contains("*Party B:*  \nBob Jones, Shelbyville\n"));
        assert_eq!(s.draft_file_name().as_deref(), Some("freelance_agreement_draft.txt"));
    }

    #[test]
    fn show_draft_replies_without_changing_state() {
        let mut s = session();
        for msg in ["hi", "1", "1. Alice", "1. Bob"] {
            s.handle_message(msg);
        }
        let draft = s.final_draft.clone();
        let turn = s.handle_message("thanks!");
        assert_eq!(turn.stage, Stage::ShowDraft);
        assert!(turn.draft_ready);
        assert!(turn.reply.contains("lease_agreement_draft.txt"));
        assert_eq!(s.final_draft, draft);
    }

    #[test]
    fn every_message_gets_exactly_one_reply() {
        let mut s = session();
        for msg in ["hi", "nope", "2", "1. A", "1. B", "again"] {
            s.handle_message(msg);
        }
        assert_eq!(s.history.len(), 12);
        for pair in s.history.chunks(2) {
            assert_eq!(pair[0].speaker, Speaker::User);
            assert_eq!(pair[1].speaker, Speaker::Assistant);
        }
    }

    #[test]
    fn no_draft_file_name_before_draft() {
        let mut s = session();
        s.handle_message("hi");
        s.handle_message("nda");
        assert_eq!(s.doc_type, Some(DocumentType::Nda));
        assert_eq!(s.draft_file_name(), None);
    }
}
