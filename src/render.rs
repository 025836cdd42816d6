//! Form renderers
//!
//! A form driver walks its field tree depth-first and calls one visit
//! method per node on a [`Renderer`]; concatenating the returned fragments
//! in call order yields the form body. Two interchangeable layouts ship
//! here: [`TableRenderer`] and [`DivRenderer`]. The traversal policy stays
//! with the driver; a renderer only turns visits into markup, tracking
//! open groups so nested fields get group-relative captions and
//! `level-<depth>` classes.
//!
//! Group nesting is checked: closing a group that was never opened, or
//! ending a pass with groups still open, is a [`RenderError`] rather than
//! silently mismatched markup.

use crate::escape::escape_html;
use crate::field::Field;
use crate::init_markup::{InitEntry, InitMarkup};
use crate::markup::{classes, description_html, error_html, hint_html, label_html, titleize};
use crate::widget::WidgetKind;
use serde_json::Value;
use tracing::trace;

/// Registry name for the shared embed bootstrap script. Every embed and
/// embed-list visit registers under this one name, so the script is
/// emitted at most once per render session.
pub const EMBED_INIT_NAME: &str = "built-in embed/embedList";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	#[error("group closed without a matching open: {path}")]
	UnbalancedGroup { path: String },
	#[error("render pass ended with {open} unclosed group(s)")]
	UnclosedGroups { open: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// The visit contract between the form driver and a layout.
///
/// The driver guarantees depth-first document order:
/// `start`, then fields and balanced `begin_group`/`end_group` pairs,
/// then `end`. Each method returns an HTML fragment for the driver to
/// concatenate. Instances are per-pass; `start` resets traversal state.
pub trait Renderer {
	fn start(&mut self) -> RenderResult<String>;
	fn begin_group(&mut self, path: &[&str]) -> RenderResult<String>;
	fn end_group(&mut self, path: &[&str]) -> RenderResult<String>;
	fn field(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String>;
	fn embed(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String>;
	fn embed_list(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String>;
	fn end(&mut self) -> RenderResult<String>;
}

/// Open-group bookkeeping shared by both layouts.
///
/// Stores the path length of each open group. The stack height is the
/// nesting depth; the top entry is how many leading path segments a
/// leaf's caption drops to become relative to its innermost group.
#[derive(Debug, Default)]
struct GroupStack {
	open: Vec<usize>,
}

impl GroupStack {
	fn reset(&mut self) {
		self.open.clear();
	}

	/// Returns the nesting depth after entering the group.
	fn push(&mut self, path: &[&str]) -> usize {
		self.open.push(path.len());
		self.open.len()
	}

	fn pop(&mut self, path: &[&str]) -> RenderResult<()> {
		if self.open.pop().is_none() {
			return Err(RenderError::UnbalancedGroup {
				path: path.join("."),
			});
		}
		Ok(())
	}

	fn caption(&self, path: &[&str]) -> String {
		let prefix = self.open.last().copied().unwrap_or(0);
		path[prefix.min(path.len())..].join(" ")
	}

	fn finish(&self) -> RenderResult<()> {
		if self.open.is_empty() {
			Ok(())
		} else {
			Err(RenderError::UnclosedGroups {
				open: self.open.len(),
			})
		}
	}
}

/// The decoration fragments every non-hidden field unit carries,
/// independent of layout.
struct FieldChrome {
	name: String,
	class_attr: String,
	label: String,
	description: String,
	hint: String,
	errors: String,
}

fn field_chrome(groups: &GroupStack, field: &Field, path: &[&str], errors: &[String]) -> FieldChrome {
	let name = path.join(".");
	let caption = groups.caption(path);
	FieldChrome {
		class_attr: classes(field, errors).join(" "),
		label: label_html(field, &name, &caption),
		description: description_html(field),
		hint: hint_html(field),
		errors: error_html(errors),
		name,
	}
}

fn group_heading(path: &[&str]) -> String {
	escape_html(&titleize(path.last().copied().unwrap_or_default()))
}

fn register_embed_init(registry: &InitMarkup) {
	registry.register(
		EMBED_INIT_NAME,
		InitEntry::generator(|| {
			"<script type=\"text/javascript\">settee.forms.bindEmbeds();</script>".to_string()
		}),
	);
}

/// One widget unit per element of an embed-list value, in order.
fn embed_list_items(field: &Field, name: &str, value: Option<&Value>) -> String {
	let mut items = String::new();
	if let Some(elements) = value.and_then(Value::as_array) {
		for (index, element) in elements.iter().enumerate() {
			let item_name = format!("{name}.{index}");
			items.push_str(&format!(
				"<div class=\"item\">{}</div>",
				field.widget().to_html(&item_name, Some(element), None, field)
			));
		}
	}
	items
}

/// Table layout: one `<tr>` per field, group headers as spanning rows.
///
/// # Examples
///
/// ```
/// use settee_forms::init_markup::InitMarkup;
/// use settee_forms::render::{Renderer, TableRenderer};
///
/// let mut renderer = TableRenderer::new(InitMarkup::new());
/// let mut html = renderer.start().unwrap();
/// html.push_str(&renderer.end().unwrap());
/// assert_eq!(html, "<table class=\"form-table\">\n</table>\n");
/// ```
pub struct TableRenderer {
	groups: GroupStack,
	init_markup: InitMarkup,
}

impl TableRenderer {
	pub fn new(init_markup: InitMarkup) -> Self {
		Self {
			groups: GroupStack::default(),
			init_markup,
		}
	}

	pub fn init_markup(&self) -> &InitMarkup {
		&self.init_markup
	}
}

impl Renderer for TableRenderer {
	fn start(&mut self) -> RenderResult<String> {
		trace!("starting table render pass");
		self.groups.reset();
		Ok("<table class=\"form-table\">\n".to_string())
	}

	fn begin_group(&mut self, path: &[&str]) -> RenderResult<String> {
		let depth = self.groups.push(path);
		Ok(format!(
			"<tr class=\"group\"><th class=\"level-{depth}\" colspan=\"3\">{}</th></tr>\n",
			group_heading(path)
		))
	}

	fn end_group(&mut self, path: &[&str]) -> RenderResult<String> {
		// Rows do not nest; the group header needs no closing row.
		self.groups.pop(path)?;
		Ok(String::new())
	}

	fn field(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String> {
		if field.widget().kind() == WidgetKind::Hidden {
			return Ok(field.widget().to_html(&path.join("."), value, raw, field));
		}
		let chrome = field_chrome(&self.groups, field, path, errors);
		let widget_html = field.widget().to_html(&chrome.name, value, raw, field);
		Ok(format!(
			"<tr class=\"{}\"><th>{}{}</th><td>{}{}</td><td class=\"errors\">{}</td></tr>\n",
			chrome.class_attr, chrome.label, chrome.description, widget_html, chrome.hint,
			chrome.errors
		))
	}

	fn embed(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String> {
		register_embed_init(&self.init_markup);
		let chrome = field_chrome(&self.groups, field, path, errors);
		let widget_html = field.widget().to_html(&chrome.name, value, raw, field);
		Ok(format!(
			"<tr class=\"{} embed\"><th>{}{}</th><td>{}{}</td><td class=\"errors\">{}</td></tr>\n",
			chrome.class_attr, chrome.label, chrome.description, widget_html, chrome.hint,
			chrome.errors
		))
	}

	fn embed_list(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		_raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String> {
		register_embed_init(&self.init_markup);
		let chrome = field_chrome(&self.groups, field, path, errors);
		let items = embed_list_items(field, &chrome.name, value);
		Ok(format!(
			"<tr class=\"{} embed-list\"><th>{}{}</th><td>{}{}</td><td class=\"errors\">{}</td></tr>\n",
			chrome.class_attr, chrome.label, chrome.description, items, chrome.hint, chrome.errors
		))
	}

	fn end(&mut self) -> RenderResult<String> {
		self.groups.finish()?;
		trace!("finished table render pass");
		Ok("</table>\n".to_string())
	}
}

/// Nested-div layout: groups become real containers with scaled headings.
///
/// # Examples
///
/// ```
/// use settee_forms::init_markup::InitMarkup;
/// use settee_forms::render::{DivRenderer, Renderer};
///
/// let mut renderer = DivRenderer::new(InitMarkup::new());
/// let mut html = renderer.start().unwrap();
/// html.push_str(&renderer.begin_group(&["address"]).unwrap());
/// html.push_str(&renderer.end_group(&["address"]).unwrap());
/// html.push_str(&renderer.end().unwrap());
/// assert!(html.contains("<h2>Address</h2>"));
/// assert!(html.contains("level-1"));
/// ```
pub struct DivRenderer {
	groups: GroupStack,
	init_markup: InitMarkup,
}

impl DivRenderer {
	pub fn new(init_markup: InitMarkup) -> Self {
		Self {
			groups: GroupStack::default(),
			init_markup,
		}
	}

	pub fn init_markup(&self) -> &InitMarkup {
		&self.init_markup
	}

	fn unit(
		&self,
		field: &Field,
		path: &[&str],
		errors: &[String],
		extra_class: &str,
		widget_html: &str,
	) -> String {
		let chrome = field_chrome(&self.groups, field, path, errors);
		format!(
			"<div class=\"{}{extra_class}\">{}{}<div class=\"widget\">{widget_html}</div>{}{}</div>\n",
			chrome.class_attr, chrome.label, chrome.description, chrome.hint, chrome.errors
		)
	}
}

impl Renderer for DivRenderer {
	fn start(&mut self) -> RenderResult<String> {
		trace!("starting div render pass");
		self.groups.reset();
		Ok("<div class=\"form-fields\">\n".to_string())
	}

	fn begin_group(&mut self, path: &[&str]) -> RenderResult<String> {
		let depth = self.groups.push(path);
		// h2 for the outermost groups, deeper headings down to h6.
		let heading_level = (depth + 1).min(6);
		Ok(format!(
			"<div class=\"group level-{depth}\"><h{heading_level}>{}</h{heading_level}>\n",
			group_heading(path)
		))
	}

	fn end_group(&mut self, path: &[&str]) -> RenderResult<String> {
		self.groups.pop(path)?;
		Ok("</div>\n".to_string())
	}

	fn field(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String> {
		if field.widget().kind() == WidgetKind::Hidden {
			return Ok(field.widget().to_html(&path.join("."), value, raw, field));
		}
		let name = path.join(".");
		let widget_html = field.widget().to_html(&name, value, raw, field);
		Ok(self.unit(field, path, errors, "", &widget_html))
	}

	fn embed(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String> {
		register_embed_init(&self.init_markup);
		let name = path.join(".");
		let widget_html = field.widget().to_html(&name, value, raw, field);
		Ok(self.unit(field, path, errors, " embed", &widget_html))
	}

	fn embed_list(
		&mut self,
		field: &Field,
		path: &[&str],
		value: Option<&Value>,
		_raw: Option<&str>,
		errors: &[String],
	) -> RenderResult<String> {
		register_embed_init(&self.init_markup);
		let name = path.join(".");
		let items = embed_list_items(field, &name, value);
		Ok(self.unit(field, path, errors, " embed-list", &items))
	}

	fn end(&mut self) -> RenderResult<String> {
		self.groups.finish()?;
		trace!("finished div render pass");
		Ok("</div>\n".to_string())
	}
}
