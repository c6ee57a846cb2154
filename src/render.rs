//! HTML rendering for the demo pages.
//!
//! Pages are assembled from string fragments. Catalog descriptions are
//! trusted markup; everything else that reaches the page is escaped.

use crate::demo::{DemoId, DemoReport, DetailLine, catalog};

const PAGE_TITLE: &str = "Record Validation Demo Results";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
.success { color: green; font-weight: bold; padding: 10px; background-color: #e8f5e9; border-radius: 5px; }
.failure { color: #d32f2f; font-weight: bold; padding: 10px; background-color: #ffebee; border-radius: 5px; }
.result { margin: 20px 0; padding: 20px; border: 1px solid #ddd; border-radius: 5px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.code { background-color: #f5f5f5; padding: 15px; border-left: 4px solid #2196f3; font-family: monospace; overflow-x: auto; }
.demo-description { background-color: #e3f2fd; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
.constraint { font-family: monospace; background-color: #fff3e0; padding: 2px 5px; border-radius: 3px; }
h3 { color: #1976d2; border-bottom: 1px solid #bbdefb; padding-bottom: 5px; }
table { border-collapse: collapse; width: 100%; margin: 15px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f5f5f5; }
";

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(STYLE.len() + body.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn results_page(body: &str) -> String {
    let mut content = String::from(body);
    content.push_str("<p><a href=\"/\">Back to Home</a></p>\n");
    page(PAGE_TITLE, &content)
}

/// Page shown when no demo was requested.
pub fn render_prompt() -> String {
    results_page(
        "<p>Please select a demo to run from the <a href=\"/\">home page</a>.</p>\n",
    )
}

/// Page shown for a demo name outside the fixed set.
pub fn render_unknown(name: &str) -> String {
    results_page(&format!(
        "<p class=\"failure\">Invalid demo method: {}</p>\n",
        escape_html(name)
    ))
}

pub fn render_report(report: &DemoReport) -> String {
    let demo = report.demo;
    let mut body = String::new();

    body.push_str(&format!(
        "<h2>Running Demo: {}</h2>\n",
        escape_html(&demo.title())
    ));
    body.push_str("<div class=\"result\">\n");

    body.push_str("<div class=\"demo-description\">\n");
    body.push_str(catalog::description(demo));
    body.push_str("\n</div>\n");

    body.push_str("<h3>Validation Constraints Being Demonstrated:</h3>\n");
    push_code_block(&mut body, catalog::code_snippet(demo));

    if report.success {
        body.push_str("<div class=\"success\">&#10004; Demo passed successfully!</div>\n");
    } else {
        body.push_str(&format!(
            "<div class=\"failure\">&#10008; Demo failed: {}</div>\n",
            escape_html(&report.message)
        ));
    }

    body.push_str("<h3>Demo Results:</h3>\n");
    if !report.details.is_empty() {
        if report.violation_rows() > 0 {
            push_details_table(&mut body, &report.details);
        } else {
            push_details_block(&mut body, &report.details);
        }
    }

    body.push_str("<h3>Validation API Used:</h3>\n");
    push_code_block(&mut body, catalog::api_usage(demo));
    body.push_str("</div>\n");

    results_page(&body)
}

fn push_code_block(body: &mut String, code: &str) {
    body.push_str("<div class=\"code\">\n<pre>");
    body.push_str(&escape_html(code));
    body.push_str("</pre>\n</div>\n");
}

fn push_details_table(body: &mut String, details: &[DetailLine]) {
    body.push_str("<table>\n<tr><th>Type</th><th>Path</th><th>Message</th></tr>\n");
    for line in details {
        match line {
            DetailLine::Violation {
                kind,
                path,
                message,
            } => body.push_str(&format!(
                "<tr><td>{}</td><td><span class=\"constraint\">{}</span></td><td>{}</td></tr>\n",
                escape_html(kind),
                escape_html(path),
                escape_html(message)
            )),
            DetailLine::Note { text } => body.push_str(&format!(
                "<tr><td colspan=\"3\">{}</td></tr>\n",
                escape_html(text)
            )),
        }
    }
    body.push_str("</table>\n");
}

fn push_details_block(body: &mut String, details: &[DetailLine]) {
    body.push_str("<pre>");
    for line in details {
        if let DetailLine::Note { text } = line {
            body.push_str(&escape_html(text));
            body.push('\n');
        }
    }
    body.push_str("</pre>\n");
}

/// Landing page linking every demo at `demo_path`.
pub fn render_home(demo_path: &str) -> String {
    let mut body = String::from(
        "<p>Each demo builds sample records, validates them and compares the violations against the expected outcome.</p>\n<ul>\n",
    );
    for demo in DemoId::all() {
        body.push_str(&format!(
            "<li><a href=\"{}?demo={}\">{}</a></li>\n",
            escape_html(demo_path),
            demo.name(),
            escape_html(&demo.title())
        ));
    }
    body.push_str("</ul>\n");
    page("Record Validation Demos", &body)
}
