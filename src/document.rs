//! Document access helpers and the CouchDB user context
//!
//! Documents are plain [`serde_json::Value`] trees, the same shape CouchDB
//! hands to a `validate_doc_update` function.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolve an ordered sequence of path segments against a JSON document.
///
/// Object members are looked up by key; array elements by numeric segment.
/// Returns `None` as soon as a segment is missing or the current value
/// cannot be indexed.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use settee_forms::document::resolve_path;
///
/// let doc = json!({"meta": {"owner": "anna", "tags": ["a", "b"]}});
/// assert_eq!(resolve_path(&doc, &["meta", "owner"]), Some(&json!("anna")));
/// assert_eq!(resolve_path(&doc, &["meta", "tags", "1"]), Some(&json!("b")));
/// assert_eq!(resolve_path(&doc, &["meta", "missing"]), None);
/// ```
pub fn resolve_path<'a, S: AsRef<str>>(doc: &'a Value, path: &[S]) -> Option<&'a Value> {
	let mut current = doc;
	for segment in path {
		let segment = segment.as_ref();
		current = match current {
			Value::Object(map) => map.get(segment)?,
			Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
			_ => return None,
		};
	}
	Some(current)
}

/// The identity of the actor performing a document write.
///
/// Mirrors the `userCtx` object CouchDB supplies to update and validation
/// functions. An anonymous writer has no name.
///
/// # Examples
///
/// ```
/// use settee_forms::document::UserCtx;
///
/// let ctx: UserCtx = serde_json::from_str(
///     r#"{"db": "blog", "name": "anna", "roles": ["editor"]}"#,
/// ).unwrap();
/// assert_eq!(ctx.name.as_deref(), Some("anna"));
/// assert!(ctx.has_role("editor"));
///
/// let anon = UserCtx::anonymous();
/// assert!(anon.name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCtx {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub roles: Vec<String>,
	#[serde(default)]
	pub db: Option<String>,
}

impl UserCtx {
	/// An unauthenticated writer: no name, no roles.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// A writer authenticated under the given name.
	///
	/// # Examples
	///
	/// ```
	/// use settee_forms::document::UserCtx;
	///
	/// let ctx = UserCtx::named("anna");
	/// assert_eq!(ctx.name.as_deref(), Some("anna"));
	/// ```
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r == role)
	}
}
