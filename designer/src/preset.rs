//! Element factory: presets and generic defaults for new elements.
//!
//! Presets are a closed set; each maps to a fixed default record (content,
//! box, typography). A preset whose kind does not match the requested kind,
//! or no preset at all, produces the generic default for that kind.

#[cfg(test)]
#[path = "preset_test.rs"]
mod preset_test;

use uuid::Uuid;

use crate::camera::Size;
use crate::doc::{Element, ElementKind, Position, Style, TemplateDocument};
use crate::layout::Role;

/// Named factory configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    CertificateTitle,
    Subtitle,
    RecipientName,
    OrganizationName,
    Description,
    EventName,
    Date,
    Signature,
    CertificateId,
    Logo,
    SignatureImage,
    Border,
    Separator,
    Decoration,
    VerificationQr,
}

const SERIF: &str = "Georgia, serif";
const NAVY: &str = "#1a365d";
const SLATE: &str = "#4a5568";

impl Preset {
    pub const ALL: [Preset; 15] = [
        Preset::CertificateTitle,
        Preset::Subtitle,
        Preset::RecipientName,
        Preset::OrganizationName,
        Preset::Description,
        Preset::EventName,
        Preset::Date,
        Preset::Signature,
        Preset::CertificateId,
        Preset::Logo,
        Preset::SignatureImage,
        Preset::Border,
        Preset::Separator,
        Preset::Decoration,
        Preset::VerificationQr,
    ];

    /// Stable key used by hosts and the CLI.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::CertificateTitle => "certificate-title",
            Self::Subtitle => "subtitle",
            Self::RecipientName => "recipient-name",
            Self::OrganizationName => "organization-name",
            Self::Description => "description",
            Self::EventName => "event-name",
            Self::Date => "date",
            Self::Signature => "signature",
            Self::CertificateId => "certificate-id",
            Self::Logo => "logo",
            Self::SignatureImage => "signature-image",
            Self::Border => "border",
            Self::Separator => "separator",
            Self::Decoration => "decoration",
            Self::VerificationQr => "verification-qr",
        }
    }

    /// Look up a preset by key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Self::CertificateTitle
            | Self::Subtitle
            | Self::RecipientName
            | Self::OrganizationName
            | Self::Description
            | Self::EventName
            | Self::Date
            | Self::Signature
            | Self::CertificateId => ElementKind::Text,
            Self::Logo | Self::SignatureImage => ElementKind::Image,
            Self::Border | Self::Separator => ElementKind::Shape,
            Self::Decoration => ElementKind::Decoration,
            Self::VerificationQr => ElementKind::Qr,
        }
    }

    /// Default content, box and style for this preset.
    #[must_use]
    pub fn defaults(self) -> (String, Position, Style) {
        let p = Position::new;
        match self {
            Self::CertificateTitle => (
                "CERTIFICATE OF ACHIEVEMENT".into(),
                p(80.0, 160.0, 640.0, 40.0),
                text_style(28.0, "bold", "center", NAVY, SERIF),
            ),
            Self::Subtitle => (
                "This is to certify that".into(),
                p(200.0, 215.0, 400.0, 30.0),
                Style { font_style: Some("italic".into()), ..text_style(16.0, "normal", "center", SLATE, SERIF) },
            ),
            Self::RecipientName => (
                "{{recipientName}}".into(),
                p(200.0, 260.0, 400.0, 48.0),
                text_style(32.0, "bold", "center", NAVY, SERIF),
            ),
            Self::OrganizationName => (
                "Organization Name".into(),
                p(200.0, 110.0, 400.0, 32.0),
                text_style(20.0, "bold", "center", SLATE, SERIF),
            ),
            Self::Description => (
                "For outstanding performance and dedication".into(),
                p(150.0, 330.0, 500.0, 50.0),
                text_style(14.0, "normal", "center", SLATE, "Arial, sans-serif"),
            ),
            Self::EventName => (
                "{{eventName}}".into(),
                p(200.0, 390.0, 400.0, 36.0),
                text_style(22.0, "bold", "center", NAVY, SERIF),
            ),
            Self::Date => (
                "{{issueDate}}".into(),
                p(100.0, 480.0, 200.0, 30.0),
                text_style(14.0, "normal", "center", SLATE, "Arial, sans-serif"),
            ),
            Self::Signature => (
                "Authorized Signature".into(),
                p(500.0, 480.0, 200.0, 30.0),
                text_style(14.0, "normal", "center", SLATE, "Arial, sans-serif"),
            ),
            Self::CertificateId => (
                "Certificate ID: {{certificateId}}".into(),
                p(20.0, 560.0, 300.0, 20.0),
                text_style(10.0, "normal", "left", SLATE, "Courier New, monospace"),
            ),
            Self::Logo => (String::new(), p(360.0, 30.0, 80.0, 80.0), Style::default()),
            Self::SignatureImage => (String::new(), p(520.0, 420.0, 160.0, 50.0), Style::default()),
            Self::Border => (
                String::new(),
                p(20.0, 20.0, 760.0, 560.0),
                Style {
                    background_color: Some("transparent".into()),
                    border_color: Some(NAVY.into()),
                    border_width: Some(4.0),
                    ..Style::default()
                },
            ),
            Self::Separator => (
                String::new(),
                p(250.0, 305.0, 300.0, 20.0),
                Style { background_color: Some(NAVY.into()), ..Style::default() },
            ),
            Self::Decoration => (
                CORNER_ORNAMENT.into(),
                p(30.0, 30.0, 80.0, 80.0),
                Style { color: Some(NAVY.into()), ..Style::default() },
            ),
            Self::VerificationQr => ("{{certificateId}}".into(), p(680.0, 480.0, 90.0, 90.0), Style::default()),
        }
    }
}

const CORNER_ORNAMENT: &str = r#"<svg viewBox="0 0 80 80"><path d="M0 80V0h80" fill="none" stroke="currentColor" stroke-width="4"/></svg>"#;

fn text_style(size: f64, weight: &str, align: &str, color: &str, family: &str) -> Style {
    Style {
        font_size: Some(size),
        font_weight: Some(weight.to_owned()),
        text_align: Some(align.to_owned()),
        color: Some(color.to_owned()),
        font_family: Some(family.to_owned()),
        ..Style::default()
    }
}

/// Generic default content, box and style for a kind.
#[must_use]
pub fn generic_defaults(kind: ElementKind) -> (String, Position, Style) {
    let p = Position::new;
    match kind {
        ElementKind::Text => ("New Text".into(), p(100.0, 100.0, 200.0, 40.0), Style {
            font_size: Some(16.0),
            ..Style::default()
        }),
        ElementKind::Image => (String::new(), p(100.0, 100.0, 150.0, 150.0), Style::default()),
        ElementKind::Shape => (String::new(), p(100.0, 100.0, 150.0, 100.0), Style {
            background_color: Some("#e2e8f0".into()),
            ..Style::default()
        }),
        ElementKind::Qr => ("https://example.com".into(), p(100.0, 100.0, 100.0, 100.0), Style::default()),
        ElementKind::Decoration => (CORNER_ORNAMENT.into(), p(100.0, 100.0, 100.0, 100.0), Style::default()),
    }
}

/// Build a new element of `kind` with a fresh id, kept inside `page`.
#[must_use]
pub fn create_element(kind: ElementKind, preset: Option<Preset>, page: Size) -> Element {
    let (content, position, style) = match preset {
        Some(preset) if preset.kind() == kind => preset.defaults(),
        Some(preset) => {
            tracing::debug!(kind = kind.as_str(), preset = preset.key(), "preset kind mismatch; using generic default");
            generic_defaults(kind)
        }
        None => generic_defaults(kind),
    };
    Element {
        id: Uuid::new_v4().to_string(),
        kind,
        content,
        position: position.clamp_to_page(page),
        style,
        layout_basis: None,
    }
}

/// Like [`create_element`], resolving the preset from a string key. Unknown
/// keys fall back to the generic default.
#[must_use]
pub fn create_element_by_key(kind: ElementKind, preset_key: Option<&str>, page: Size) -> Element {
    let preset = preset_key.and_then(|key| {
        let found = Preset::from_key(key);
        if found.is_none() {
            tracing::debug!(key, "unknown preset; using generic default");
        }
        found
    });
    create_element(kind, preset, page)
}

/// The default certificate: one element per semantic role, placed by the
/// role table, on the default page.
#[must_use]
pub fn starter_document() -> TemplateDocument {
    let mut doc = TemplateDocument::new();
    let page = doc.page_size();
    let typography = |role: Role| match role {
        Role::Title => (Preset::CertificateTitle, "CERTIFICATE OF ACHIEVEMENT"),
        Role::Subtitle => (Preset::Subtitle, "This is to certify that"),
        Role::Recipient => (Preset::RecipientName, "{{recipientName}}"),
        Role::Achievement => (Preset::Description, "For outstanding performance and dedication"),
        Role::Course => (Preset::EventName, "{{eventName}}"),
        Role::Date => (Preset::Date, "{{issueDate}}"),
        Role::Signature => (Preset::Signature, "Authorized Signature"),
    };
    doc.elements = Role::ALL
        .into_iter()
        .map(|role| {
            let (preset, content) = typography(role);
            let (_, _, style) = preset.defaults();
            Element {
                id: role.id().to_owned(),
                kind: ElementKind::Text,
                content: content.to_owned(),
                position: role.position(page),
                style,
                layout_basis: None,
            }
        })
        .collect();
    doc
}
