//! Scripted assistant messages for the drafting dialogue.

use crate::catalog::DocumentType;

pub const DOCUMENT_MENU: &str = "*Hello!* How can I assist you today?\n\n\
Please select a document type:\n\
1. Lease Agreement  \n\
2. NDA  \n\
3. Contract  \n\
4. Employment Agreement  \n\
5. Educational Agreement  \n\
6. Freelance Agreement  \n\n\
(Reply with number or name)";

pub const UNKNOWN_DOCUMENT_TYPE: &str = "\u{26a0}\u{fe0f} I couldn\u{2019}t detect a valid document type. \
Please reply with a valid number (1\u{2013}6) or name from the list.";

pub const PREPARING_DOCUMENT: &str = "\u{2705} Thank you! Preparing your legal document...";

/// Fields requested for each party, in order. Answers are expected as
/// `N. value`, one per line.
pub const PARTY_FIELDS: [&str; 6] = [
    "Name",
    "Residential address",
    "Contact number",
    "Type of occupation",
    "City",
    "State",
];

fn party_field_list(party: &str) -> String {
    PARTY_FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if i == 0 {
                format!("{}. Party {party} {field}:  ", i + 1)
            } else {
                format!("{}. {field}:  ", i + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn party_a_prompt(doc_type: DocumentType) -> String {
    format!(
        "You've selected *{title}*.\n\n\
Please provide the details of *Party A* in the following format:\n\n\n\
{fields}\n",
        title = doc_type.title(),
        fields = party_field_list("A"),
    )
}

pub fn party_b_prompt() -> String {
    format!(
        "Now, please provide the details of *Party B* in the same format:\n\n\n{}\n",
        party_field_list("B")
    )
}

pub fn draft_ready(doc_type: DocumentType, draft: &str) -> String {
    format!(
        "{PREPARING_DOCUMENT}\n\nHere is your *{title}*:\n\n{draft}",
        title = doc_type.title(),
    )
}

pub fn conversation_complete(doc_type: DocumentType) -> String {
    format!(
        "Your *{title}* draft is complete. Download it as `{file}`, \
or start a new session to draft another document.",
        title = doc_type.title(),
        file = doc_type.draft_file_name(),
    )
}
