//! Placeholder substitution for previews and batch issuance.
//!
//! Text and QR content may contain `{{tokenName}}` markers. Substitution
//! builds a new document with the markers replaced; the source document is
//! never touched. The clock is supplied through [`SubstitutionContext`] so the
//! same inputs always produce the same output.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use sha2::{Digest, Sha256};

use crate::doc::{Element, TemplateDocument};

/// Values supplied for tokens, keyed by token name.
pub type PlaceholderValues = BTreeMap<String, String>;

/// Built-in tokens with computed or sample defaults.
pub const KNOWN_TOKENS: [&str; 7] = [
    "recipientName",
    "issueDate",
    "certificateId",
    "eventName",
    "eventDate",
    "mcName",
    "customMessage",
];

/// Inputs to substitution that do not come from the document or values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionContext {
    /// Date used for `issueDate`, `eventDate` and `certificateId` defaults.
    pub today: NaiveDate,
}

impl SubstitutionContext {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context dated with the local calendar day.
    #[must_use]
    pub fn today() -> Self {
        Self { today: Local::now().date_naive() }
    }
}

/// Return a copy of `doc` with placeholders substituted in every text and QR
/// element.
#[must_use]
pub fn substitute(doc: &TemplateDocument, values: &PlaceholderValues, ctx: &SubstitutionContext) -> TemplateDocument {
    let elements = doc
        .elements
        .iter()
        .map(|el| {
            if el.kind.carries_tokens() {
                Element { content: substitute_text(&el.content, values, ctx), ..el.clone() }
            } else {
                el.clone()
            }
        })
        .collect();
    TemplateDocument { page_settings: doc.page_settings.clone(), elements }
}

/// One substituted document per row of bulk data.
#[must_use]
pub fn substitute_rows(
    doc: &TemplateDocument,
    rows: &[PlaceholderValues],
    ctx: &SubstitutionContext,
) -> Vec<TemplateDocument> {
    rows.iter().map(|row| substitute(doc, row, ctx)).collect()
}

/// Replace `{{token}}` markers in a single string.
///
/// A token is replaced when `values` supplies it or it is a built-in token;
/// anything else, including an unterminated `{{`, is copied verbatim.
#[must_use]
pub fn substitute_text(text: &str, values: &PlaceholderValues, ctx: &SubstitutionContext) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after_open[..end].trim();
        match resolve(name, values, ctx) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Token names appearing in `text`, in order of first appearance.
#[must_use]
pub fn tokens_in(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..end].trim();
        if !name.is_empty() && !found.iter().any(|f| f == name) {
            found.push(name.to_owned());
        }
        rest = &after_open[end + 2..];
    }
    found
}

/// Long-form date used for date tokens, e.g. `October 14, 2026`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Identifier derived from the recipient and the date:
/// `CERT-YYYYMMDD-` followed by eight upper-case hex digits.
#[must_use]
pub fn certificate_id(recipient: &str, date: NaiveDate) -> String {
    let mut hasher = Sha256::new();
    hasher.update(recipient.as_bytes());
    hasher.update(b"|");
    hasher.update(date.format("%Y-%m-%d").to_string().as_bytes());
    let digest = hasher.finalize();
    let suffix: String = digest.iter().take(4).map(|b| format!("{b:02X}")).collect();
    format!("CERT-{}-{suffix}", date.format("%Y%m%d"))
}

fn resolve(name: &str, values: &PlaceholderValues, ctx: &SubstitutionContext) -> Option<String> {
    if let Some(v) = values.get(name) {
        return Some(v.clone());
    }
    match name {
        "recipientName" => Some("Recipient Name".to_owned()),
        "issueDate" | "eventDate" => Some(format_date(ctx.today)),
        "certificateId" => {
            let recipient = values.get("recipientName").map_or("", String::as_str);
            Some(certificate_id(recipient, ctx.today))
        }
        "eventName" => Some("Event Name".to_owned()),
        "mcName" => Some("Master of Ceremonies".to_owned()),
        "customMessage" => Some(String::new()),
        _ => None,
    }
}
