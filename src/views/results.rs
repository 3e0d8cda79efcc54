use super::{layout, rules_card};

/// Yesterday's results. World results are not computed yet; the page shows
/// the visitor's own stored amount.
pub fn render_results(stored_amount: Option<f64>) -> String {
    let entered = match stored_amount {
        Some(amount) => format!("{:.2}", amount),
        None => "__".to_string(),
    };

    let inner = format!(
        "<div class=\"success\">You entered: {}.</div>\n<p>Display world results here</p>\n",
        entered
    );

    let body = format!(
        "<h2>Yesterday's Results</h2>\n\
         <div class=\"success\">You won against the world! \u{1F389}</div>\n\
         {}<a class=\"button\" href=\"/\">Back</a>\n",
        rules_card(&inner)
    );

    layout("Yesterday's Results", &body)
}
