//! The widget seam and the built-in widget set
//!
//! A [`Widget`] turns one field's value into its HTML input control. The
//! renderers treat widgets as opaque except for their [`WidgetKind`] tag:
//! hidden widgets are emitted without any row decoration, and the embed
//! kinds get the client-side binding bootstrap registered for them.
//!
//! Only the minimal closed set ships here; richer controls implement the
//! trait downstream.

use crate::escape::escape_html_attr;
use crate::field::Field;
use serde_json::Value;

/// Behavioural tag a renderer consults before decorating a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
	Text,
	Hidden,
	Embed,
	EmbedList,
}

/// Renders one field's input control.
pub trait Widget {
	/// Produce the HTML for this control.
	///
	/// `name` is the full dotted document path of the field, used for both
	/// the `name` and `id` attributes. `raw` is the unparsed value from a
	/// failed submission and takes precedence over `value` for display.
	fn to_html(&self, name: &str, value: Option<&Value>, raw: Option<&str>, field: &Field)
	-> String;

	fn kind(&self) -> WidgetKind {
		WidgetKind::Text
	}
}

/// Display form of a JSON value inside an input control.
fn value_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

fn value_attr(value: Option<&Value>, raw: Option<&str>) -> String {
	let display = match raw {
		Some(raw) => raw.to_string(),
		None => value.map(value_text).unwrap_or_default(),
	};
	if display.is_empty() {
		String::new()
	} else {
		format!(" value=\"{}\"", escape_html_attr(&display))
	}
}

/// A single-line text input.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use settee_forms::field::Field;
/// use settee_forms::widget::{TextInput, Widget};
///
/// let field = Field::new(TextInput);
/// let html = TextInput.to_html("address.city", Some(&json!("NYC")), None, &field);
/// assert_eq!(
///     html,
///     r#"<input type="text" id="id_address.city" name="address.city" value="NYC" />"#,
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInput;

impl Widget for TextInput {
	fn to_html(
		&self,
		name: &str,
		value: Option<&Value>,
		raw: Option<&str>,
		_field: &Field,
	) -> String {
		let name = escape_html_attr(name);
		format!(
			"<input type=\"text\" id=\"id_{name}\" name=\"{name}\"{} />",
			value_attr(value, raw)
		)
	}
}

/// An invisible input. Fields using it render without any decoration.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
	fn to_html(
		&self,
		name: &str,
		value: Option<&Value>,
		raw: Option<&str>,
		_field: &Field,
	) -> String {
		let name = escape_html_attr(name);
		format!(
			"<input type=\"hidden\" id=\"id_{name}\" name=\"{name}\"{} />",
			value_attr(value, raw)
		)
	}

	fn kind(&self) -> WidgetKind {
		WidgetKind::Hidden
	}
}

/// Serialized JSON carrier for an embedded sub-document.
///
/// The control itself is a hidden input holding the sub-document as JSON;
/// the client-side binder registered through the init-markup registry
/// replaces it with an interactive editor after page load.
fn embed_input(name: &str, value: Option<&Value>) -> String {
	let name = escape_html_attr(name);
	let serialized = match value {
		None | Some(Value::Null) => String::new(),
		Some(v) => v.to_string(),
	};
	format!(
		"<input type=\"hidden\" class=\"embed\" id=\"id_{name}\" name=\"{name}\" value=\"{}\" />",
		escape_html_attr(&serialized)
	)
}

/// Widget for a field holding zero or one embedded sub-document.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedWidget;

impl Widget for EmbedWidget {
	fn to_html(
		&self,
		name: &str,
		value: Option<&Value>,
		_raw: Option<&str>,
		_field: &Field,
	) -> String {
		embed_input(name, value)
	}

	fn kind(&self) -> WidgetKind {
		WidgetKind::Embed
	}
}

/// Widget for a field holding an ordered list of embedded sub-documents.
///
/// Renders one carrier input per element; the renderer drives the
/// iteration and passes each element in turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedListWidget;

impl Widget for EmbedListWidget {
	fn to_html(
		&self,
		name: &str,
		value: Option<&Value>,
		_raw: Option<&str>,
		_field: &Field,
	) -> String {
		embed_input(name, value)
	}

	fn kind(&self) -> WidgetKind {
		WidgetKind::EmbedList
	}
}
