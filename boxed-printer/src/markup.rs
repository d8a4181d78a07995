//! HTML and CSS builders
//!
//! Provides a fluent API for building print documents. Text and attribute
//! values are always escaped; only `raw` bypasses escaping.

use std::borrow::Cow;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// HTML markup builder
pub struct MarkupBuilder {
    buf: String,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(8192),
        }
    }

    /// Open a tag with escaped attributes
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.attrs(attrs);
        self.buf.push('>');
        self
    }

    /// Close a tag
    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
        self
    }

    /// Self-contained element without a closing tag (`img`, `meta`)
    pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.attrs(attrs);
        self.buf.push_str(" />\n");
        self
    }

    /// Element with escaped text content
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.open(tag, attrs);
        self.text(text);
        self.close(tag)
    }

    /// Escaped text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(&escape_html(s));
        self
    }

    /// Unescaped markup (trusted, generated by this crate)
    pub fn raw(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    fn attrs(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_html(value));
            self.buf.push('"');
        }
    }

    pub fn build(self) -> String {
        self.buf
    }
}

impl Default for MarkupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// CSS stylesheet builder
pub struct StyleSheet {
    buf: String,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(2048),
        }
    }

    /// Add a rule; declarations are written one per line as `prop: value;`
    pub fn rule(&mut self, selector: &str, declarations: &[(&str, String)]) -> &mut Self {
        self.buf.push_str(selector);
        self.buf.push_str(" {\n");
        for (prop, value) in declarations {
            self.buf.push_str("  ");
            self.buf.push_str(prop);
            self.buf.push_str(": ");
            self.buf.push_str(value);
            self.buf.push_str(";\n");
        }
        self.buf.push_str("}\n");
        self
    }

    /// Wrap rules added by `f` in an at-rule block (`@media print`)
    pub fn block(&mut self, at_rule: &str, f: impl FnOnce(&mut StyleSheet)) -> &mut Self {
        let mut inner = StyleSheet::new();
        f(&mut inner);
        self.buf.push_str(at_rule);
        self.buf.push_str(" {\n");
        self.buf.push_str(&inner.buf);
        self.buf.push_str("}\n");
        self
    }

    pub fn build(self) -> String {
        self.buf
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Garage Tools"), "Garage Tools");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_html(r#"<b>"Tom's" & Co</b>"#),
            "&lt;b&gt;&quot;Tom&#39;s&quot; &amp; Co&lt;/b&gt;"
        );
    }

    #[test]
    fn test_builder_basic() {
        let mut b = MarkupBuilder::new();
        b.open("div", &[("class", "label")])
            .element("strong", &[], "A < B")
            .void("img", &[("src", "x\"y")])
            .close("div");
        let html = b.build();
        assert!(html.starts_with("<div class=\"label\">"));
        assert!(html.contains("<strong>A &lt; B</strong>"));
        assert!(html.contains("<img src=\"x&quot;y\" />"));
        assert!(html.trim_end().ends_with("</div>"));
    }

    #[test]
    fn test_stylesheet() {
        let mut css = StyleSheet::new();
        css.rule(".label", &[("width", "2in".into()), ("height", "2in".into())]);
        css.rule("button", &[("display", "none".into())]);
        let out = css.build();
        assert_eq!(
            out,
            ".label {\n  width: 2in;\n  height: 2in;\n}\nbutton {\n  display: none;\n}\n"
        );
    }
}
