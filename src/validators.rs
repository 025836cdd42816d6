//! Document-update validators
//!
//! Each validator guards one field of a document write. A document-update
//! hook calls [`validate`] with the incoming document, the stored document
//! (absent on first creation), the field's new and old values, and the
//! writer's [`UserCtx`]; a failed check rejects the write with a
//! human-readable message.
//!
//! [`validate`]: MatchUsername::validate

use crate::document::{UserCtx, resolve_path};
use serde_json::Value;

/// A rejected document write, carrying the message surfaced to the writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
	message: String,
}

impl ValidationError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Lets rejected-write messages feed straight into a field's render-time
/// error list.
impl From<ValidationError> for String {
	fn from(error: ValidationError) -> Self {
		error.message
	}
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// `null`, absent, and the empty string all count as "not filled in".
fn is_blank_value(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => true,
		Some(Value::String(s)) => s.is_empty(),
		Some(_) => false,
	}
}

fn is_blank_name(name: Option<&str>) -> bool {
	name.is_none_or(str::is_empty)
}

/// Requires a field to hold the writer's own username.
///
/// Two blank sides count as a match, so an anonymous writer may leave the
/// field empty without tripping validation.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use settee_forms::document::UserCtx;
/// use settee_forms::validators::MatchUsername;
///
/// let validator = MatchUsername::new();
/// let doc = json!({});
/// let ctx = UserCtx::named("anna");
///
/// assert!(validator.validate(&doc, None, Some(&json!("anna")), None, &ctx).is_ok());
/// assert!(validator.validate(&doc, None, Some(&json!("bob")), None, &ctx).is_err());
///
/// let anon = UserCtx::anonymous();
/// assert!(validator.validate(&doc, None, Some(&json!("")), None, &anon).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchUsername {
	message: Option<String>,
}

impl MatchUsername {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn validate(
		&self,
		_new_doc: &Value,
		_old_doc: Option<&Value>,
		new_value: Option<&Value>,
		_old_value: Option<&Value>,
		user_ctx: &UserCtx,
	) -> ValidationResult<()> {
		let name = user_ctx.name.as_deref();
		if is_blank_name(name) && is_blank_value(new_value) {
			return Ok(());
		}
		if name.is_some() && name == new_value.and_then(Value::as_str) {
			return Ok(());
		}
		Err(ValidationError::new(
			self.message
				.as_deref()
				.unwrap_or("Field does not match your username"),
		))
	}
}

/// Freezes a field after the document's first creation.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use settee_forms::document::UserCtx;
/// use settee_forms::validators::Uneditable;
///
/// let validator = Uneditable::new();
/// let doc = json!({});
/// let ctx = UserCtx::anonymous();
///
/// // Creation: any value may be set.
/// assert!(validator.validate(&doc, None, Some(&json!("x")), None, &ctx).is_ok());
///
/// // Update: the value must not change.
/// let old = json!({});
/// assert!(validator.validate(&doc, Some(&old), Some(&json!("x")), Some(&json!("x")), &ctx).is_ok());
/// assert!(validator.validate(&doc, Some(&old), Some(&json!("y")), Some(&json!("x")), &ctx).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Uneditable {
	message: Option<String>,
}

impl Uneditable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn validate(
		&self,
		_new_doc: &Value,
		old_doc: Option<&Value>,
		new_value: Option<&Value>,
		old_value: Option<&Value>,
		_user_ctx: &UserCtx,
	) -> ValidationResult<()> {
		if old_doc.is_some() && new_value != old_value {
			return Err(ValidationError::new(
				self.message
					.as_deref()
					.unwrap_or("Field cannot be edited once created"),
			));
		}
		Ok(())
	}
}

/// Requires the value at a document path to equal the writer's username.
///
/// Unlike [`MatchUsername`], the comparison is strict: a missing path never
/// matches, and an anonymous writer only matches an explicit JSON `null`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use settee_forms::document::UserCtx;
/// use settee_forms::validators::UsernameMatchesField;
///
/// let validator = UsernameMatchesField::new(["meta", "owner"]);
/// let ctx = UserCtx::named("anna");
///
/// let doc = json!({"meta": {"owner": "anna"}});
/// assert!(validator.validate(&doc, None, None, None, &ctx).is_ok());
///
/// let other = json!({"meta": {"owner": "bob"}});
/// let err = validator.validate(&other, None, None, None, &ctx).unwrap_err();
/// assert_eq!(err.message(), "username does not match field: meta.owner");
/// ```
#[derive(Debug, Clone)]
pub struct UsernameMatchesField {
	path: Vec<String>,
	message: Option<String>,
}

impl UsernameMatchesField {
	pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
		Self {
			path: path.into_iter().map(Into::into).collect(),
			message: None,
		}
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn path(&self) -> &[String] {
		&self.path
	}

	pub fn validate(
		&self,
		new_doc: &Value,
		_old_doc: Option<&Value>,
		_new_value: Option<&Value>,
		_old_value: Option<&Value>,
		user_ctx: &UserCtx,
	) -> ValidationResult<()> {
		let matches = match (resolve_path(new_doc, &self.path), user_ctx.name.as_deref()) {
			(Some(Value::String(value)), Some(name)) => value == name,
			(Some(Value::Null), None) => true,
			_ => false,
		};
		if matches {
			Ok(())
		} else {
			Err(match &self.message {
				Some(message) => ValidationError::new(message),
				None => ValidationError::new(format!(
					"username does not match field: {}",
					self.path.join(".")
				)),
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(None)]
	#[case(Some(json!(null)))]
	#[case(Some(json!("")))]
	fn test_match_username_blank_pairs(#[case] value: Option<Value>) {
		// Arrange
		let validator = MatchUsername::new();
		let doc = json!({});

		// Act
		let result = validator.validate(&doc, None, value.as_ref(), None, &UserCtx::anonymous());

		// Assert
		assert!(result.is_ok());
	}

	#[rstest]
	fn test_match_username_custom_message() {
		let validator = MatchUsername::new().with_message("creator must be you");
		let doc = json!({});

		let err = validator
			.validate(&doc, None, Some(&json!("bob")), None, &UserCtx::named("anna"))
			.unwrap_err();

		assert_eq!(err.message(), "creator must be you");
	}

	#[rstest]
	fn test_uneditable_ignores_user() {
		let validator = Uneditable::new();
		let doc = json!({});
		let old = json!({});

		let result = validator.validate(
			&doc,
			Some(&old),
			Some(&json!(1)),
			Some(&json!(1)),
			&UserCtx::anonymous(),
		);

		assert!(result.is_ok());
	}

	#[rstest]
	fn test_username_matches_field_missing_path_never_matches() {
		let validator = UsernameMatchesField::new(["creator"]);
		let doc = json!({});

		assert!(
			validator
				.validate(&doc, None, None, None, &UserCtx::anonymous())
				.is_err()
		);
	}

	#[rstest]
	fn test_validation_error_coerces_to_message_string() {
		let err = ValidationError::new("rejected");
		assert_eq!(err.to_string(), "rejected");
		assert_eq!(String::from(err), "rejected");
	}

	#[rstest]
	fn test_username_matches_field_null_matches_anonymous() {
		let validator = UsernameMatchesField::new(["creator"]);
		let doc = json!({"creator": null});

		assert!(
			validator
				.validate(&doc, None, None, None, &UserCtx::anonymous())
				.is_ok()
		);
	}
}
