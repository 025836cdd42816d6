//! HTML escaping for rendered form markup
//!
//! Every piece of caller-supplied text that ends up inside rendered markup
//! goes through one of these helpers unless the owning [`Field`] explicitly
//! opts into raw markup.
//!
//! [`Field`]: crate::field::Field

/// Escape HTML special characters for element content.
///
/// # Examples
///
/// ```
/// use settee_forms::escape::escape_html;
///
/// let label = "Terms & <conditions>";
/// assert_eq!(escape_html(label), "Terms &amp; &lt;conditions&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Escape a value for use inside a double-quoted HTML attribute.
///
/// Covers the same characters as [`escape_html`] plus line breaks, which
/// some browsers treat as attribute terminators.
///
/// # Examples
///
/// ```
/// use settee_forms::escape::escape_html_attr;
///
/// let value = r#"x" onmouseover="alert(1)"#;
/// assert!(escape_html_attr(value).contains("&quot;"));
/// ```
pub fn escape_html_attr(input: &str) -> String {
	input
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
		.replace('\n', "&#10;")
		.replace('\r', "&#13;")
}
