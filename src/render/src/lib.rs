//! Result rendering: HTML fragments for the results area, plain text for terminals

use client::SearchResult;

pub const SEARCHING: &str = "Searching...";
pub const NO_RESULTS: &str = "No results found.";
pub const ERROR_PREFIX: &str = "An error occurred:";

/// How the results area is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Html,
    Text,
}

impl Format {
    pub fn results(&self, results: &[SearchResult]) -> String {
        match self {
            Format::Html => render_results(results),
            Format::Text => render_results_text(results),
        }
    }

    pub fn error(&self, message: &str) -> String {
        match self {
            Format::Html => render_error(message),
            Format::Text => format!("{} {}\n", ERROR_PREFIX, message),
        }
    }
}

/// Render results as the markup placed in the results container.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut out = String::new();
    for (i, r) in results.iter().enumerate() {
        out.push_str("<div class=\"result-item\">\n");
        out.push_str(&format!("    <h3>Result {}</h3>\n", i + 1));
        out.push_str(&format!("    <p>{}</p>\n", escape_html(&r.content)));
        out.push_str(&format!("    <p>Score: {}</p>\n", format_score(r.score)));
        out.push_str("</div>\n");
    }
    out
}

/// Render results for a terminal
pub fn render_results_text(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let mut out = String::new();
    for (i, r) in results.iter().enumerate() {
        out.push_str(&format!("[{}] score={}\n", i + 1, format_score(r.score)));
        for line in r.content.lines() {
            out.push_str(&format!("    {}\n", line));
        }
        out.push('\n');
    }
    out
}

pub fn render_error(message: &str) -> String {
    format!("{} {}", ERROR_PREFIX, escape_html(message))
}

/// Fixed four decimal places, e.g. `0.5` -> `0.5000`
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
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
    out
}
