// HTML rendering of the route table

use crate::routes::sorter::{RouteTable, SortDirection, SortKey, SortState};

/// Arrow shown next to a column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Indicator for `column`, or `None` when it is not the active sort column.
    pub fn for_column(state: SortState, column: SortKey) -> Option<SortIndicator> {
        if state.key != Some(column) {
            return None;
        }
        Some(match state.direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
        })
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

pub fn column_label(column: SortKey) -> &'static str {
    match column {
        SortKey::Address => "Destination address",
        SortKey::Gateway => "Gateway",
        SortKey::Interface => "Interface",
    }
}

/// Render the full page for the current table.
///
/// Each header is a one-button form posting to `/sort/{column}`.
pub fn render_page(title: &str, table: &RouteTable) -> String {
    let state = table.state();
    let title = escape_html(title);

    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/static/table.css\">\n\
         </head>\n<body>\n<h1>{title}</h1>\n<table class=\"routes\">\n<thead>\n<tr>\n"
    );

    for column in SortKey::ALL {
        let arrow = SortIndicator::for_column(state, column)
            .map(|indicator| format!(" {}", indicator.glyph()))
            .unwrap_or_default();
        html.push_str(&format!(
            "<th><form method=\"post\" action=\"/sort/{}\"><button type=\"submit\">{}{}</button></form></th>\n",
            column,
            column_label(column),
            arrow
        ));
    }

    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for route in table.routes() {
        html.push_str(&format!(
            "<tr data-id=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            route.id,
            escape_html(&route.destination()),
            escape_html(&route.gateway),
            escape_html(&route.interface)
        ));
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
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
