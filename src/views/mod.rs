// Server-rendered HTML for the landing and results pages

mod page;
mod results;

pub use page::{render_page, PageView};
pub use results::render_results;

const RULES: [&str; 3] = [
    "Pick any dollar amount \u{2014} from $0 to as high as you want.",
    "You only win if you\u{2019}re below the average \u{2014} but not too far below.",
    "Find the sweet spot and cash in.",
];

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; text-align: center; }
    .card { border: 1px solid #ddd; border-radius: 0.5rem; padding: 1rem 1.5rem; margin: 1rem 0; }
    .success { background: #e6f4ea; color: #1e7e34; padding: 0.75rem; border-radius: 0.5rem; }
    .info { background: #e7f1fb; color: #1c5d99; padding: 0.75rem; border-radius: 0.5rem; }
    .button { display: block; width: 100%; padding: 0.6rem; margin: 0.5rem 0; box-sizing: border-box; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

fn rules_card(inner: &str) -> String {
    let rules: String = RULES.iter().map(|r| format!("<p>{}</p>\n", escape(r))).collect();
    format!(
        "<section class=\"card\">\n<h3>The Greed Line</h3>\n{}{}</section>\n",
        rules, inner
    )
}

/// Minimal HTML escaping for text and attribute values
pub fn escape(text: &str) -> String {
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
