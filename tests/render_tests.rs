//! Render-pass tests
//!
//! Drives the renderers the way the form layer does: depth-first visits,
//! fragments concatenated in call order, init markup appended after the
//! closing container.

use rstest::rstest;
use serde_json::{Value, json};
use settee_forms::{
	DivRenderer, EmbedListWidget, EmbedType, EmbedWidget, Field, HiddenInput, InitMarkup,
	RenderError, Renderer, TableRenderer, TextInput, Widget,
};

/// Widget double producing a fixed marker, so assertions can find the
/// control without caring about real input markup.
struct StubWidget;

impl Widget for StubWidget {
	fn to_html(
		&self,
		_name: &str,
		_value: Option<&Value>,
		_raw: Option<&str>,
		_field: &Field,
	) -> String {
		"<input>".to_string()
	}
}

fn count(haystack: &str, needle: &str) -> usize {
	haystack.matches(needle).count()
}

#[rstest]
fn test_table_renderer_grouped_field_pass() {
	// Arrange
	let mut renderer = TableRenderer::new(InitMarkup::new());
	let field = Field::new(StubWidget).with_required(true);

	// Act: one group, one field, concatenated in call order.
	let mut html = renderer.start().unwrap();
	html.push_str(&renderer.begin_group(&["root", "address"]).unwrap());
	html.push_str(
		&renderer
			.field(
				&field,
				&["root", "address", "city"],
				Some(&json!("NYC")),
				Some("NYC"),
				&[],
			)
			.unwrap(),
	);
	html.push_str(&renderer.end_group(&["root", "address"]).unwrap());
	html.push_str(&renderer.end().unwrap());

	// Assert: balanced container, one depth-tagged header, one field row.
	assert_eq!(count(&html, "<table"), 1);
	assert_eq!(count(&html, "</table>"), 1);
	assert_eq!(count(&html, "level-1"), 1);
	assert!(html.contains(">Address</th>"));
	assert_eq!(count(&html, "<tr"), 2);
	assert_eq!(count(&html, "<input>"), 1);
	assert!(html.contains(">City</label>"));
	assert!(html.contains("class=\"field required\""));
}

#[rstest]
fn test_div_renderer_grouped_field_pass() {
	let mut renderer = DivRenderer::new(InitMarkup::new());
	let field = Field::new(StubWidget);

	let mut html = renderer.start().unwrap();
	html.push_str(&renderer.begin_group(&["root", "address"]).unwrap());
	html.push_str(
		&renderer
			.field(&field, &["root", "address", "city"], None, None, &[])
			.unwrap(),
	);
	html.push_str(&renderer.end_group(&["root", "address"]).unwrap());
	html.push_str(&renderer.end().unwrap());

	// Every opened div is closed again.
	assert_eq!(count(&html, "<div"), count(&html, "</div>"));
	assert!(html.contains("<h2>Address</h2>"));
	assert!(html.contains("level-1"));
	assert!(html.contains(">City</label>"));
	assert!(html.contains("<input>"));
}

#[rstest]
fn test_caption_is_relative_to_innermost_group() {
	let mut renderer = DivRenderer::new(InitMarkup::new());
	let field = Field::new(StubWidget);

	renderer.start().unwrap();
	renderer.begin_group(&["contact"]).unwrap();
	renderer.begin_group(&["contact", "delivery_address"]).unwrap();
	let row = renderer
		.field(&field, &["contact", "delivery_address", "zip_code"], None, None, &[])
		.unwrap();

	assert!(row.contains(">Zip code</label>"));
}

#[rstest]
fn test_nested_groups_scale_depth_classes() {
	let mut renderer = DivRenderer::new(InitMarkup::new());

	renderer.start().unwrap();
	let outer = renderer.begin_group(&["a"]).unwrap();
	let inner = renderer.begin_group(&["a", "b"]).unwrap();

	assert!(outer.contains("class=\"group level-1\""));
	assert!(outer.contains("<h2>"));
	assert!(inner.contains("class=\"group level-2\""));
	assert!(inner.contains("<h3>"));
}

#[rstest]
fn test_hidden_field_renders_without_decoration() {
	for renderer in [
		&mut TableRenderer::new(InitMarkup::new()) as &mut dyn Renderer,
		&mut DivRenderer::new(InitMarkup::new()),
	] {
		renderer.start().unwrap();
		let field = Field::new(HiddenInput).with_label("Ignored");
		let html = renderer
			.field(&field, &["token"], Some(&json!("abc")), None, &[])
			.unwrap();

		assert_eq!(
			html,
			r#"<input type="hidden" id="id_token" name="token" value="abc" />"#,
		);
	}
}

#[rstest]
fn test_field_errors_render_as_list() {
	let mut renderer = TableRenderer::new(InitMarkup::new());
	renderer.start().unwrap();

	let field = Field::new(StubWidget);
	let errors = vec!["Required".to_string(), "Too short".to_string()];
	let row = renderer.field(&field, &["title"], None, None, &errors).unwrap();

	assert!(row.contains("class=\"field error\""));
	assert!(row.contains("<ul class=\"errors\"><li>Required</li><li>Too short</li></ul>"));
}

#[rstest]
fn test_embed_visits_register_exactly_one_init_entry() {
	let registry = InitMarkup::new();
	let mut renderer = TableRenderer::new(registry.clone());
	let comment_type = EmbedType::new("comment");

	renderer.start().unwrap();
	let embed = Field::new(EmbedWidget).with_embed_type(comment_type.clone());
	renderer
		.embed(&embed, &["pinned"], Some(&json!({"text": "hi"})), None, &[])
		.unwrap();
	renderer
		.embed(&embed, &["featured"], Some(&json!({"text": "yo"})), None, &[])
		.unwrap();
	let embed_list = Field::new(EmbedListWidget).with_embed_type(comment_type);
	renderer
		.embed_list(&embed_list, &["comments"], Some(&json!([])), None, &[])
		.unwrap();
	renderer.end().unwrap();

	assert_eq!(registry.len(), 1);
	assert_eq!(count(&registry.generate(), "<script"), 1);
}

#[rstest]
fn test_embed_list_renders_one_unit_per_element() {
	let registry = InitMarkup::new();
	let mut renderer = DivRenderer::new(registry.clone());

	renderer.start().unwrap();
	let field = Field::new(EmbedListWidget).with_embed_type(EmbedType::new("comment"));
	let value = json!([{"text": "one"}, {"text": "two"}, {"text": "three"}]);
	let errors = vec!["one comment is invalid".to_string()];
	let html = renderer
		.embed_list(&field, &["comments"], Some(&value), None, &errors)
		.unwrap();

	assert_eq!(count(&html, "class=\"item\""), 3);
	assert!(html.contains("name=\"comments.0\""));
	assert!(html.contains("name=\"comments.2\""));
	// One shared error list for the whole collection.
	assert_eq!(count(&html, "<ul class=\"errors\">"), 1);
}

#[rstest]
fn test_embed_label_falls_back_to_type_metadata() {
	let mut renderer = TableRenderer::new(InitMarkup::new());
	renderer.start().unwrap();

	let field = Field::new(EmbedWidget)
		.with_embed_type(EmbedType::new("comment").with_label("Reader comments"));
	let row = renderer.embed(&field, &["pinned"], None, None, &[]).unwrap();

	assert!(row.contains(">Reader comments</label>"));
}

#[rstest]
fn test_driver_appends_init_markup_after_end() {
	let registry = InitMarkup::new();
	let mut renderer = DivRenderer::new(registry.clone());

	let mut page = renderer.start().unwrap();
	let field = Field::new(EmbedWidget).with_embed_type(EmbedType::new("author"));
	page.push_str(
		&renderer
			.embed(&field, &["author"], Some(&json!({"name": "anna"})), None, &[])
			.unwrap(),
	);
	page.push_str(&renderer.end().unwrap());
	page.push_str(&registry.generate());

	let script = page.find("<script").unwrap();
	let closing = page.rfind("</div>").unwrap();
	assert!(script > closing);
	assert_eq!(registry.generate(), registry.generate());
}

#[rstest]
fn test_unbalanced_group_close_is_rejected() {
	let mut renderer = TableRenderer::new(InitMarkup::new());
	renderer.start().unwrap();

	let err = renderer.end_group(&["never_opened"]).unwrap_err();

	assert!(matches!(err, RenderError::UnbalancedGroup { .. }));
	assert!(err.to_string().contains("never_opened"));
}

#[rstest]
fn test_unclosed_groups_fail_at_end() {
	let mut renderer = DivRenderer::new(InitMarkup::new());
	renderer.start().unwrap();
	renderer.begin_group(&["a"]).unwrap();
	renderer.begin_group(&["a", "b"]).unwrap();

	let err = renderer.end().unwrap_err();

	assert!(matches!(err, RenderError::UnclosedGroups { open: 2 }));
}

#[rstest]
fn test_text_input_end_to_end_row() {
	let mut renderer = TableRenderer::new(InitMarkup::new());
	renderer.start().unwrap();

	let field = Field::new(TextInput).with_hint("As on your passport");
	let row = renderer
		.field(&field, &["full_name"], Some(&json!("Anna B")), None, &[])
		.unwrap();

	assert!(row.contains(">Full name</label>"));
	assert!(row.contains(r#"<input type="text" id="id_full_name" name="full_name" value="Anna B" />"#));
	assert!(row.contains("<div class=\"hint\">As on your passport</div>"));
}
