//! HTML rendering of search results.

use crate::types::Wishlist;

const HEADERS: [&str; 6] = ["ID", "Title", "Description", "User ID", "Count", "Date"];

/// Render a striped results table, one `row_{i}` per record. An empty slice
/// still yields the header row and an empty `<tbody>`.
pub fn results_table(wishlists: &[Wishlist]) -> String {
    let mut table = String::from(r#"<table class="table table-striped" cellpadding="10">"#);
    table.push_str("<thead><tr>");
    for header in HEADERS {
        table.push_str(&format!(r#"<th class="col-md-2">{header}</th>"#));
    }
    table.push_str("</tr></thead><tbody>");
    for (i, w) in wishlists.iter().enumerate() {
        table.push_str(&format!(
            r#"<tr id="row_{i}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            w.id,
            escape(&w.title),
            escape(&w.description),
            blank_or(w.user_id),
            blank_or(w.count),
            escape(&w.date),
        ));
    }
    table.push_str("</tbody></table>");
    table
}

/// Number of `<tr>` rows inside `<tbody>`.
pub fn body_rows(table: &str) -> usize {
    table
        .split_once("<tbody>")
        .map(|(_, body)| body.matches("<tr").count())
        .unwrap_or(0)
}

fn blank_or<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wishlist(id: u64, title: &str) -> Wishlist {
        Wishlist {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            user_id: Some(1),
            count: Some(0),
            date: "2024-01-01".to_string(),
            items: Vec::new(),
        }
    }

    #[test]
    fn empty_results_keep_the_header() {
        let table = results_table(&[]);
        assert!(table.contains("<th class=\"col-md-2\">User ID</th>"));
        assert!(table.ends_with("<tbody></tbody></table>"));
        assert_eq!(body_rows(&table), 0);
    }

    #[test]
    fn one_row_per_record() {
        let table = results_table(&[wishlist(1, "a"), wishlist(2, "b"), wishlist(3, "c")]);
        assert_eq!(body_rows(&table), 3);
        assert!(table.contains(r#"<tr id="row_0"><td>1</td><td>a</td>"#));
        assert!(table.contains(r#"<tr id="row_2"><td>3</td><td>c</td>"#));
    }

    #[test]
    fn text_cells_are_escaped() {
        let table = results_table(&[wishlist(1, "<script>alert('x')</script> & co")]);
        assert!(table.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(!table.contains("<script>"));
    }
}
