//! Template design engine for certificates and cards.
//!
//! The crate owns a declarative [`doc::TemplateDocument`] (page settings plus
//! an ordered list of positioned elements) and every interaction that changes
//! it: pointer and keyboard gestures, the properties editor, automatic
//! relayout on page-size changes, undo/redo, and placeholder substitution for
//! previews and batch issuance. It performs no I/O and draws no pixels; hosts
//! feed it input events and a [`store::TemplateStore`], and draw the
//! [`render::Scene`] it describes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorSession`]: document, history, selection and input handlers |
//! | [`intent`] | Intent set and the `(document, intent) -> document` reducer |
//! | [`doc`] | Document model, style defaults and JSON codec |
//! | [`camera`] | Fit-to-viewport scale and screen/canvas conversions |
//! | [`input`] | Input event types, UI state and the gesture state machine |
//! | [`hit`] | Rotation-aware hit-testing of elements and handles |
//! | [`gesture`] | Drag, resize, rotate and nudge geometry |
//! | [`layout`] | Role-based relayout on page-size changes |
//! | [`history`] | Linear undo/redo snapshots |
//! | [`placeholder`] | `{{token}}` substitution |
//! | [`preset`] | Element factory and preset table |
//! | [`properties`] | Typed property read/write for the properties panel |
//! | [`render`] | Scene description for hosts |
//! | [`store`] | Storage collaborator trait and in-memory store |
//! | [`config`] | Editor tunables |
//! | [`consts`] | Shared numeric constants (minimum sizes, dead-zones, defaults) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod gesture;
pub mod history;
pub mod hit;
pub mod input;
pub mod intent;
pub mod layout;
pub mod placeholder;
pub mod preset;
pub mod properties;
pub mod render;
pub mod store;
