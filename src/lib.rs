//! Form rendering and document-update validation for CouchDB applications
//!
//! This crate provides the presentation and write-guard halves of a
//! CouchDB application toolkit:
//! - Document-update validators checking field values against the writing
//!   user's identity (`userCtx`)
//! - Two interchangeable form layouts (table and nested-div) driven
//!   through a shared visitor contract
//! - A per-session registry collecting one-time client-side
//!   initialization markup for embed widgets
//! - Markup helpers with HTML escaping on by default
//!
//! The field-schema definition language and the widget library proper are
//! external collaborators; only the minimal built-in widget set ships
//! here.

pub mod document;
pub mod escape;
pub mod field;
pub mod init_markup;
pub mod markup;
pub mod render;
pub mod validators;
pub mod widget;

pub use document::{UserCtx, resolve_path};
pub use escape::{escape_html, escape_html_attr};
pub use field::{EmbedType, Field};
pub use init_markup::{InitEntry, InitMarkup};
pub use render::{
	DivRenderer, EMBED_INIT_NAME, RenderError, RenderResult, Renderer, TableRenderer,
};
pub use validators::{
	MatchUsername, Uneditable, UsernameMatchesField, ValidationError, ValidationResult,
};
pub use widget::{EmbedListWidget, EmbedWidget, HiddenInput, TextInput, Widget, WidgetKind};
