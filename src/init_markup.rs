//! Client-side initialization markup registry
//!
//! Widgets that need a one-time bootstrap script on the rendered page
//! register it here under a unique name; the form driver appends
//! [`InitMarkup::generate`] once, after the closing form markup. The
//! registry is an injectable handle created per render session, so
//! concurrent sessions in a server host never share entries.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One registered piece of initialization markup: either a static string
/// or a generator invoked at [`InitMarkup::generate`] time.
pub enum InitEntry {
	Markup(String),
	Generator(Box<dyn Fn() -> String + Send + Sync>),
}

impl InitEntry {
	pub fn markup(markup: impl Into<String>) -> Self {
		Self::Markup(markup.into())
	}

	pub fn generator<F>(generate: F) -> Self
	where
		F: Fn() -> String + Send + Sync + 'static,
	{
		Self::Generator(Box::new(generate))
	}

	fn render(&self) -> String {
		match self {
			Self::Markup(markup) => markup.clone(),
			Self::Generator(generate) => generate(),
		}
	}
}

impl From<String> for InitEntry {
	fn from(markup: String) -> Self {
		Self::Markup(markup)
	}
}

impl From<&str> for InitEntry {
	fn from(markup: &str) -> Self {
		Self::Markup(markup.to_string())
	}
}

impl fmt::Debug for InitEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Markup(markup) => f.debug_tuple("Markup").field(markup).finish(),
			Self::Generator(_) => f.debug_tuple("Generator").field(&"..").finish(),
		}
	}
}

/// Keyed, ordered registry of initialization markup.
///
/// Registration is first-write-wins: later entries under an already-used
/// name are ignored, which lets every embed field in a pass request the
/// shared bootstrap without duplicating it. Cloning the handle shares the
/// underlying registry.
///
/// # Examples
///
/// ```
/// use settee_forms::init_markup::{InitEntry, InitMarkup};
///
/// let registry = InitMarkup::new();
/// registry.register("greeting", InitEntry::markup("<script>hi()</script>"));
/// registry.register("greeting", InitEntry::markup("<script>bye()</script>"));
///
/// let generated = registry.generate();
/// assert!(generated.contains("hi()"));
/// assert!(!generated.contains("bye()"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InitMarkup {
	entries: Arc<Mutex<Vec<(String, InitEntry)>>>,
}

impl InitMarkup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `entry` under `name` unless the name is already taken.
	///
	/// Returns `true` when the entry was stored. The presence check and
	/// the write happen under one lock, so first-write-wins holds even
	/// with concurrent writers.
	pub fn register(&self, name: impl Into<String>, entry: impl Into<InitEntry>) -> bool {
		let name = name.into();
		let mut entries = self.entries.lock();
		if entries.iter().any(|(existing, _)| *existing == name) {
			debug!(name = %name, "init markup already registered, skipping");
			return false;
		}
		debug!(name = %name, "registering init markup");
		entries.push((name, entry.into()));
		true
	}

	/// Concatenate every entry, newline-prefixed, in registration order.
	///
	/// Non-destructive: repeated calls yield the same output until a new
	/// registration lands.
	pub fn generate(&self) -> String {
		let entries = self.entries.lock();
		let mut markup = String::new();
		for (_, entry) in entries.iter() {
			markup.push('\n');
			markup.push_str(&entry.render());
		}
		markup
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_first_write_wins() {
		let registry = InitMarkup::new();
		assert!(registry.register("k", "A"));
		assert!(!registry.register("k", "B"));

		let generated = registry.generate();
		assert!(generated.contains('A'));
		assert!(!generated.contains('B'));
	}

	#[rstest]
	fn test_registration_order_preserved() {
		let registry = InitMarkup::new();
		registry.register("b", "second");
		registry.register("a", "first? no: registered later");

		let generated = registry.generate();
		let second = generated.find("second").unwrap();
		let later = generated.find("registered later").unwrap();
		assert!(second < later);
	}

	#[rstest]
	fn test_generate_is_repeatable() {
		let registry = InitMarkup::new();
		registry.register("k", InitEntry::generator(|| "from generator".to_string()));

		assert_eq!(registry.generate(), registry.generate());
		assert_eq!(registry.generate(), "\nfrom generator");
	}

	#[rstest]
	fn test_entries_are_newline_prefixed() {
		let registry = InitMarkup::new();
		registry.register("a", "one");
		registry.register("b", "two");

		assert_eq!(registry.generate(), "\none\ntwo");
	}

	#[rstest]
	fn test_clone_shares_entries() {
		let registry = InitMarkup::new();
		let handle = registry.clone();
		handle.register("k", "shared");

		assert_eq!(registry.len(), 1);
		assert!(registry.generate().contains("shared"));
	}

	#[rstest]
	fn test_empty_registry_generates_nothing() {
		let registry = InitMarkup::new();
		assert!(registry.is_empty());
		assert_eq!(registry.generate(), "");
	}
}
