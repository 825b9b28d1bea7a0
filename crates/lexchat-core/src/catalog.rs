use serde::{Deserialize, Serialize};

use crate::types::title_case;

/// The six document types the drafting dialogue can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "lease agreement")]
    LeaseAgreement,
    #[serde(rename = "nda")]
    Nda,
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "employment agreement")]
    EmploymentAgreement,
    #[serde(rename = "educational agreement")]
    EducationalAgreement,
    #[serde(rename = "freelance agreement")]
    FreelanceAgreement,
}

/// Menu order. Matching walks this table front to back.
pub const DOCUMENT_TYPES: [DocumentType; 6] = [
    DocumentType::LeaseAgreement,
    DocumentType::Nda,
    DocumentType::Contract,
    DocumentType::EmploymentAgreement,
    DocumentType::EducationalAgreement,
    DocumentType::FreelanceAgreement,
];

impl DocumentType {
    /// Menu number as shown to the user.
    pub fn index(&self) -> &'static str {
        match self {
            DocumentType::LeaseAgreement => "1",
            DocumentType::Nda => "2",
            DocumentType::Contract => "3",
            DocumentType::EmploymentAgreement => "4",
            DocumentType::EducationalAgreement => "5",
            DocumentType::FreelanceAgreement => "6",
        }
    }

    /// Lower-case label used for matching and inside the template body.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::LeaseAgreement => "lease agreement",
            DocumentType::Nda => "nda",
            DocumentType::Contract => "contract",
            DocumentType::EmploymentAgreement => "employment agreement",
            DocumentType::EducationalAgreement => "educational agreement",
            DocumentType::FreelanceAgreement => "freelance agreement",
        }
    }

    pub fn title(&self) -> String {
        title_case(self.label())
    }

    /// `"lease agreement"` → `"lease_agreement_draft.txt"`.
    pub fn draft_file_name(&self) -> String {
        format!("{}_draft.txt", self.label().replace(' ', "_"))
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map free text to a document type.
///
/// Returns the first table entry whose menu number or label appears anywhere
/// in the lower-cased input. Matching is plain substring search, so `"12"`
/// selects entry 1 and `"a contract dispute"` selects contract.
pub fn detect_document_type(input: &str) -> Option<DocumentType> {
    let input = input.to_lowercase();
    DOCUMENT_TYPES
        .iter()
        .copied()
        .find(|dt| input.contains(dt.index()) || input.contains(dt.label()))
}
