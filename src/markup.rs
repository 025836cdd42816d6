//! Markup fragment helpers
//!
//! Stateless helpers producing the label, description, hint, and error
//! fragments both renderers share. Text goes through [`escape_html`]
//! unless the field opts into raw markup; error messages are escaped
//! unconditionally.

use crate::escape::{escape_html, escape_html_attr};
use crate::field::Field;

/// CSS classes for one rendered field, in fixed order.
///
/// # Examples
///
/// ```
/// use settee_forms::field::Field;
/// use settee_forms::markup::classes;
/// use settee_forms::widget::TextInput;
///
/// let field = Field::new(TextInput).with_required(true);
/// assert_eq!(classes(&field, &[]), ["field", "required"]);
///
/// let errors = vec!["too short".to_string()];
/// assert_eq!(classes(&Field::new(TextInput), &errors), ["field", "error"]);
/// ```
pub fn classes(field: &Field, errors: &[String]) -> Vec<&'static str> {
	let mut list = vec!["field"];
	if !errors.is_empty() {
		list.push("error");
	}
	if field.required {
		list.push("required");
	}
	list
}

/// Turn a field or group name into display text: first character
/// upper-cased, underscores replaced by spaces.
///
/// # Examples
///
/// ```
/// use settee_forms::markup::titleize;
///
/// assert_eq!(titleize("first_name"), "First name");
/// assert_eq!(titleize("city"), "City");
/// assert_eq!(titleize(""), "");
/// ```
pub fn titleize(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => {
			let mut text: String = first.to_uppercase().collect();
			text.push_str(chars.as_str());
			text.replace('_', " ")
		}
		None => String::new(),
	}
}

/// The display text for a field: its explicit label, the label of its
/// embedded-document type if it has one, or `name` titleized.
///
/// # Examples
///
/// ```
/// use settee_forms::field::Field;
/// use settee_forms::markup::label_text;
/// use settee_forms::widget::TextInput;
///
/// assert_eq!(label_text(&Field::new(TextInput), "first_name"), "First name");
/// assert_eq!(
///     label_text(&Field::new(TextInput).with_label("Custom"), "x"),
///     "Custom",
/// );
/// ```
pub fn label_text(field: &Field, name: &str) -> String {
	if let Some(label) = &field.label {
		return label.clone();
	}
	if let Some(label) = field.embed_type.as_ref().and_then(|t| t.label.as_ref()) {
		return label.clone();
	}
	titleize(name)
}

fn display_text(field: &Field, text: &str) -> String {
	if field.raw_markup {
		text.to_string()
	} else {
		escape_html(text)
	}
}

/// A `<label>` element for the control named `name`, captioned with the
/// group-relative `caption` so nested fields read naturally.
pub fn label_html(field: &Field, name: &str, caption: &str) -> String {
	format!(
		"<label for=\"id_{}\">{}</label>",
		escape_html_attr(name),
		display_text(field, &label_text(field, caption))
	)
}

/// The field's description (or its embedded-document type's) wrapped for
/// display; empty when absent.
pub fn description_html(field: &Field) -> String {
	let description = field
		.description
		.as_ref()
		.or_else(|| field.embed_type.as_ref().and_then(|t| t.description.as_ref()));
	match description {
		Some(description) => format!(
			"<div class=\"description\">{}</div>",
			display_text(field, description)
		),
		None => String::new(),
	}
}

/// The field's hint wrapped for display; empty when absent.
pub fn hint_html(field: &Field) -> String {
	match &field.hint {
		Some(hint) => format!("<div class=\"hint\">{}</div>", display_text(field, hint)),
		None => String::new(),
	}
}

/// An unordered list of error messages; empty output for an empty list.
///
/// # Examples
///
/// ```
/// use settee_forms::markup::error_html;
///
/// assert_eq!(error_html(&[]), "");
///
/// let errors = vec!["Required".to_string()];
/// assert_eq!(error_html(&errors), "<ul class=\"errors\"><li>Required</li></ul>");
/// ```
pub fn error_html(errors: &[String]) -> String {
	if errors.is_empty() {
		return String::new();
	}
	let items: String = errors
		.iter()
		.map(|e| format!("<li>{}</li>", escape_html(e)))
		.collect();
	format!("<ul class=\"errors\">{items}</ul>")
}
