//! HTML output: sectioned report pages and the multi-viewer page
//!
//! Everything is emitted as a single self-contained document. Section bodies
//! classified as trusted markup are injected unescaped; structured text goes
//! through [`escape`] into a `<pre>` block.

use crate::client::AnalysisReport;
use crate::render::{classify, sections, ResultSet, SectionBody};
use crate::report::Summary;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Fixed dimensions for embedded report viewers.
pub const VIEWER_WIDTH: u32 = 960;
pub const VIEWER_HEIGHT: u32 = 600;

const STYLE: &str = r#"
        :root {
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
            --error: #f85149;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }
        .container { max-width: 1100px; margin: 0 auto; padding: 2rem; }
        .header {
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 1px solid var(--border);
        }
        .header h1 { font-size: 1.8rem; }
        .subtitle { color: var(--dim); font-size: 0.9rem; }
        .stats { color: var(--dim); font-size: 0.875rem; margin-top: 0.5rem; }
        .section {
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
        }
        .section h2 { font-size: 1.1rem; margin-bottom: 1rem; color: var(--accent); }
        .section pre {
            font-family: 'SF Mono', 'Fira Code', monospace;
            font-size: 0.85rem;
            white-space: pre-wrap;
            overflow-x: auto;
        }
        .section svg { max-width: 100%; height: auto; }
        .section iframe { border: 1px solid var(--border); border-radius: 8px; background: #fff; }
        .message { color: var(--dim); padding: 2rem 0; }
        .message.error { color: var(--error); }
"#;

/// Wrap a body fragment in the full document shell.
pub fn document(subtitle: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Exploratory Data Analysis Results</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n\
         <div class=\"header\">\n\
         <h1>Exploratory Data Analysis Results</h1>\n\
         <div class=\"subtitle\">{}</div>\n\
         </div>\n\
         {body}\n\
         </div>\n\
         </body>\n\
         </html>\n",
        escape(subtitle),
    )
}

/// Minimal HTML escaping for text content and attribute values.
pub fn escape(s: &str) -> String {
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

fn push_section(out: &mut String, title: &str, body: &SectionBody) {
    out.push_str("<div class=\"section\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape(title));
    match body {
        // Trusted markup goes through verbatim.
        SectionBody::Markup(markup) => {
            out.push_str(markup);
            out.push('\n');
        }
        SectionBody::Text(text) => {
            let _ = writeln!(out, "<pre>{}</pre>", escape(text));
        }
    }
    out.push_str("</div>\n");
}

/// Body fragment: one section per result entry, in mapping order.
pub fn sections_body(results: &ResultSet) -> String {
    let secs = sections(results);
    let summary = Summary::from_sections(&secs);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div class=\"stats\">{} section(s), {} chart(s), {} text</div>",
        summary.total, summary.markup, summary.text
    );
    for section in &secs {
        push_section(&mut out, &section.title, &section.body);
    }
    out
}

/// Body fragment for a completed on-demand analysis: the inline structured
/// dump followed by the three embedded report viewers at fixed size.
pub fn report_body(report: &AnalysisReport) -> String {
    let mut out = String::new();
    push_section(&mut out, "pandas_profiling", &classify(&report.pandas_profiling));

    for (name, url) in report.viewers() {
        out.push_str("<div class=\"section\">\n");
        let _ = writeln!(out, "<h2>{}</h2>", escape(name));
        let _ = writeln!(
            out,
            "<iframe src=\"{}\" width=\"{VIEWER_WIDTH}\" height=\"{VIEWER_HEIGHT}\"></iframe>",
            escape(url)
        );
        out.push_str("</div>\n");
    }
    out
}

/// Body fragment for the loading / error / no-data pages.
pub fn message_body(message: &str, is_error: bool) -> String {
    let class = if is_error { "message error" } else { "message" };
    format!("<div class=\"{class}\">{}</div>\n", escape(message))
}

/// Write the full sectioned report document.
pub fn write_sections<W: Write>(writer: &mut W, results: &ResultSet) -> io::Result<()> {
    let html = document("Fetched result set", &sections_body(results));
    writer.write_all(html.as_bytes())
}
