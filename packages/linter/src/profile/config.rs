//! Built-in profile for CNXML documents.

use super::core::LintProfile;
use super::types::TagSelector;
use crate::xml::TEXT_NODE_NAME;

/// Create the lint profile for CNXML module files.
///
/// Paragraphs are checked as a whole. Lists, list items, figures and
/// tables are pulled out of the surrounding prose and checked on their own.
#[must_use]
pub fn create_cnxml_profile() -> LintProfile {
    let mut profile = LintProfile::new();

    profile.atomic([TEXT_NODE_NAME, "para"]);
    profile.extract_first(["list", "item", "figure", "table"]);

    // Fragments that legitimately start lowercase
    profile.suppress(
        [
            TagSelector::within("term", "glossary"),
            TagSelector::within("meaning", "glossary"),
            TagSelector::within("item", "problem"),
            TagSelector::within("item", "list"),
            TagSelector::within("entry", "table"),
        ],
        ["UPPERCASE_SENTENCE_START"],
    );

    // Emphasised spans are usually quoted words or symbols
    profile.suppress(
        [TagSelector::tag("emphasis")],
        [
            "SENTENCE_WHITESPACE",
            "EN_A_VS_AN",
            "THE_SENT_END",
            "THE_PUNCT",
            "I_LOWERCASE",
        ],
    );

    profile.suppress([TagSelector::tag("footnote")], ["SENTENCE_WHITESPACE"]);

    profile
}
