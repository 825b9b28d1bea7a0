// End-to-end drafting dialogue behaviour through the public API.

use lexchat_core::{
    catalog::{detect_document_type, DocumentType, DOCUMENT_TYPES},
    dialogue::DraftingSession,
    parties::PartyDetails,
    prompts,
    template::render_document,
    PartyFormat, Speaker, Stage,
};

fn drive(session: &mut DraftingSession, inputs: &[&str]) -> Vec<Stage> {
    inputs
        .iter()
        .map(|input| session.handle_message(input).stage)
        .collect()
}

// ── Full conversation ────────────────────────────────────────────────────

#[test]
fn nda_conversation_produces_draft() {
    let mut session = DraftingSession::new("e2e", PartyFormat::Fields);
    let stages = drive(
        &mut session,
        &["hi", "2", "1. Alice\n2. 12 Main St", "1. Bob\n2. 99 Side Rd"],
    );

    assert_eq!(
        stages,
        vec![
            Stage::AwaitDocType,
            Stage::AskPartyA,
            Stage::AskPartyB,
            Stage::ShowDraft
        ]
    );
    assert_eq!(session.doc_type, Some(DocumentType::Nda));

    let draft = session.final_draft.as_deref().unwrap();
    assert!(draft.contains("NDA"));
    assert!(draft.contains("Alice"));
    assert!(draft.contains("Bob"));
    assert!(draft.contains("*Party A:*  \n1. Alice\n2. 12 Main St\n"));
    assert!(draft.contains("*Party B:*  \n1. Bob\n2. 99 Side Rd\n"));

    let last = session.history.last().unwrap();
    assert_eq!(last.speaker, Speaker::Assistant);
    assert!(last.message.ends_with(draft));
    assert_eq!(session.draft_file_name().as_deref(), Some("nda_draft.txt"));
}

#[test]
fn failed_match_then_recovery() {
    let mut session = DraftingSession::new("retry", PartyFormat::Fields);
    let stages = drive(&mut session, &["hello", "what can you do?", "no idea", "a lease agreement please"]);
    assert_eq!(
        stages,
        vec![
            Stage::AwaitDocType,
            Stage::AwaitDocType,
            Stage::AwaitDocType,
            Stage::AskPartyA
        ]
    );
    assert_eq!(session.doc_type, Some(DocumentType::LeaseAgreement));

    let replies: Vec<&str> = session
        .history
        .iter()
        .filter(|e| e.speaker == Speaker::Assistant)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(replies[1], prompts::UNKNOWN_DOCUMENT_TYPE);
    assert_eq!(replies[2], prompts::UNKNOWN_DOCUMENT_TYPE);
    assert!(replies[3].starts_with("You've selected *Lease Agreement*."));
}

#[test]
fn doc_type_is_fixed_once_selected() {
    let mut session = DraftingSession::new("fixed", PartyFormat::Fields);
    drive(&mut session, &["hi", "nda", "1. contract lawyer", "1. employment agreement"]);
    assert_eq!(session.doc_type, Some(DocumentType::Nda));
    assert!(session.final_draft.as_deref().unwrap().starts_with("\n*NDA*\n"));
}

// ── Transition determinism ───────────────────────────────────────────────

#[test]
fn same_inputs_same_stages() {
    let inputs = ["hey", "3", "x", "y", "z"];
    let mut a = DraftingSession::new("a", PartyFormat::Fields);
    let mut b = DraftingSession::new("b", PartyFormat::Fields);
    assert_eq!(drive(&mut a, &inputs), drive(&mut b, &inputs));
    assert_eq!(a.final_draft, b.final_draft);
}

#[test]
fn matcher_covers_menu() {
    for dt in DOCUMENT_TYPES {
        let input = format!("I need option {}", dt.index());
        assert_eq!(detect_document_type(&input), Some(dt));
    }
    assert_eq!(detect_document_type("nothing relevant"), None);
}

// ── Rendering ────────────────────────────────────────────────────────────

#[test]
fn render_matches_session_draft() {
    let mut session = DraftingSession::new("render", PartyFormat::Fields);
    drive(&mut session, &["hi", "6", "1. Carol", "1. Dan"]);
    let expected = render_document(
        DocumentType::FreelanceAgreement,
        &PartyDetails::parse("1. Carol"),
        &PartyDetails::parse("1. Dan"),
    );
    assert_eq!(session.final_draft.as_deref(), Some(expected.as_str()));
}
