//! Render sinks for the village table.
//!
//! The controller never touches markup directly; it reports what the table
//! body should show through [`RenderSink`]. [`HtmlTableSink`] turns that
//! into the `<tbody>` contents served to the browser.

use std::fmt::Write as _;

use village_table_village_models::TableRow;

/// Number of columns in the village table.
pub const COLUMN_COUNT: usize = 6;

/// Placeholder shown while the data file is being fetched.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Receives the table body states.
///
/// Every call replaces whatever the sink showed before.
pub trait RenderSink {
    /// The data is being fetched.
    fn render_loading(&mut self);

    /// One row per entry; an empty slice means an empty body.
    fn render_rows(&mut self, rows: &[TableRow]);

    /// Loading failed.
    fn render_error(&mut self, message: &str);
}

/// Renders the table body as HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlTableSink {
    body: String,
}

impl HtmlTableSink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            body: String::new(),
        }
    }

    /// The current `<tbody>` inner HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.body
    }

    /// Consumes the sink, returning the `<tbody>` inner HTML.
    #[must_use]
    pub fn into_html(self) -> String {
        self.body
    }

    fn render_message(&mut self, class: &str, message: &str) {
        self.body = format!(
            "<tr>\n    <td colspan=\"{COLUMN_COUNT}\" class=\"{class}\">{}</td>\n</tr>\n",
            escape_html(message)
        );
    }
}

impl RenderSink for HtmlTableSink {
    fn render_loading(&mut self) {
        self.render_message("text-center", LOADING_MESSAGE);
    }

    fn render_rows(&mut self, rows: &[TableRow]) {
        let mut body = String::new();
        for row in rows {
            write!(
                body,
                "<tr>\n    <th scope=\"row\">{}</th>\n    <td>{}</td>\n    <td>{}</td>\n{}{}{}</tr>\n",
                row.index,
                escape_html(&row.name),
                escape_html(&row.district),
                textarea_cell(150, 2, &row.area),
                textarea_cell(200, 3, &row.center),
                textarea_cell(900, 4, &row.geometry),
            )
            .unwrap();
        }
        self.body = body;
    }

    fn render_error(&mut self, message: &str) {
        self.render_message("text-center text-danger", message);
    }
}

fn textarea_cell(width: u32, rows: u32, text: &str) -> String {
    format!(
        "    <td style=\"width: {width}px;\">\n        <textarea class=\"form-control\" rows=\"{rows}\" readonly style=\"resize: vertical;\">{}</textarea>\n    </td>\n",
        escape_html(text)
    )
}

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, name: &str) -> TableRow {
        TableRow {
            index,
            name: name.to_string(),
            district: "Buleleng".to_string(),
            area: "512.3".to_string(),
            center: "[0.8,0.8]".to_string(),
            geometry: r#"{"type":"Point","coordinates":[0.8,0.8]}"#.to_string(),
        }
    }

    #[test]
    fn renders_one_tr_per_row() {
        let mut sink = HtmlTableSink::new();
        sink.render_rows(&[row(1, "Anturan"), row(2, "Baktiseraga")]);
        let html = sink.html();

        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("<th scope=\"row\">1</th>"));
        assert!(html.contains("<th scope=\"row\">2</th>"));
        assert!(html.contains("<td>Anturan</td>"));
        assert!(html.contains(">512.3</textarea>"));
        assert!(html.contains(">[0.8,0.8]</textarea>"));
        assert!(html.contains("{&quot;type&quot;:&quot;Point&quot;"));
    }

    #[test]
    fn row_markup_is_exact() {
        let mut sink = HtmlTableSink::new();
        sink.render_rows(&[row(3, "Gitgit")]);
        let html = sink.into_html();

        assert!(html.starts_with(
            "<tr>\n    <th scope=\"row\">3</th>\n    <td>Gitgit</td>\n    <td>Buleleng</td>\n"
        ));
        assert!(html.ends_with("</tr>\n"));
        assert_eq!(html.matches("<textarea").count(), 3);
    }

    #[test]
    fn empty_rows_render_empty_body() {
        let mut sink = HtmlTableSink::new();
        sink.render_loading();
        sink.render_rows(&[]);
        assert_eq!(sink.html(), "");
    }

    #[test]
    fn loading_and_error_span_the_table() {
        let mut sink = HtmlTableSink::new();
        sink.render_loading();
        assert!(sink.html().contains("colspan=\"6\""));
        assert!(sink.html().contains("Loading..."));

        sink.render_error("Failed to load data.");
        assert!(!sink.html().contains("Loading..."));
        assert!(sink.html().contains("text-danger"));
        assert!(sink.html().contains("Failed to load data."));
    }

    #[test]
    fn escapes_markup_in_values() {
        let mut sink = HtmlTableSink::new();
        sink.render_rows(&[row(1, "<script>alert('x')</script> & co")]);
        let html = sink.into_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }
}
