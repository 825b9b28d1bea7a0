use crate::{catalog::DocumentType, parties::PartyDetails};

/// Render the draft document.
///
/// The layout is fixed: title line, party sentence, both party blocks, the
/// effectiveness clause, then a two-column signature block. Trailing double
/// spaces are Markdown line breaks and are part of the output.
pub fn render_document(doc_type: DocumentType, party_a: &PartyDetails, party_b: &PartyDetails) -> String {
    let label = doc_type.label();
    format!(
        "\n\
*{title}*\n\
\n\
This {label} is made between the following parties:\n\
\n\
*Party A:*  \n\
{party_a}\n\
\n\
*Party B:*  \n\
{party_b}\n\
\n\
This {label} outlines the terms and agreements mutually accepted by both parties. \
It shall remain in effect until terminated under the governing law.\n\
\n\
*Signatures:*  \n\
____________________       ____________________  \n\
Party A                         Party B\n",
        title = label.to_uppercase(),
        party_a = party_a.format(),
        party_b = party_b.format(),
    )
}
