//! Field descriptors
//!
//! A [`Field`] is the declarative metadata for one form control: its label,
//! help texts, validation flags, and the [`Widget`] that renders its input
//! element. Descriptors are built by the schema layer and never mutated
//! during a render pass.

use crate::widget::Widget;
use serde::{Deserialize, Serialize};

/// Metadata describing an embedded sub-document schema.
///
/// Carried by fields whose value is one nested document (or a list of
/// them); the renderers fall back to it for labelling when the field
/// itself has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedType {
	pub name: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

impl EmbedType {
	/// # Examples
	///
	/// ```
	/// use settee_forms::field::EmbedType;
	///
	/// let t = EmbedType::new("comment").with_label("Comments");
	/// assert_eq!(t.name, "comment");
	/// assert_eq!(t.label.as_deref(), Some("Comments"));
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Declarative metadata for one form field.
///
/// # Examples
///
/// ```
/// use settee_forms::field::Field;
/// use settee_forms::widget::TextInput;
///
/// let field = Field::new(TextInput)
///     .with_label("City")
///     .with_hint("Town or city of residence")
///     .with_required(true);
/// assert!(field.required);
/// assert_eq!(field.label.as_deref(), Some("City"));
/// ```
pub struct Field {
	pub label: Option<String>,
	pub description: Option<String>,
	pub hint: Option<String>,
	pub required: bool,
	/// Opt-in: label, description, and hint are developer-authored markup
	/// and must be emitted verbatim. Error messages are escaped regardless.
	pub raw_markup: bool,
	pub embed_type: Option<EmbedType>,
	widget: Box<dyn Widget>,
}

impl Field {
	pub fn new(widget: impl Widget + 'static) -> Self {
		Self {
			label: None,
			description: None,
			hint: None,
			required: false,
			raw_markup: false,
			embed_type: None,
			widget: Box::new(widget),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.hint = Some(hint.into());
		self
	}

	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn with_raw_markup(mut self, raw_markup: bool) -> Self {
		self.raw_markup = raw_markup;
		self
	}

	pub fn with_embed_type(mut self, embed_type: EmbedType) -> Self {
		self.embed_type = Some(embed_type);
		self
	}

	pub fn widget(&self) -> &dyn Widget {
		self.widget.as_ref()
	}
}
