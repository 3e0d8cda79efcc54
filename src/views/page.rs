use super::{escape, layout, rules_card};

/// Everything the landing page shows for one visitor
#[derive(Debug, Clone)]
pub struct PageView {
    pub first_time: bool,
    pub amount: Option<f64>,
    pub results_date: String,
    pub results_time: String,
}

pub fn render_page(view: &PageView) -> String {
    let mut body = String::new();

    if view.first_time {
        body.push_str(
            "<div class=\"success\">Welcome, first-time visitor! \u{1F389} Play against the world and win!</div>\n",
        );
    } else {
        body.push_str("<div class=\"info\">Welcome back player!</div>\n");
    }

    body.push_str("<h2>What's the World Thinking Today?</h2>\n");
    body.push_str("<a class=\"button\" href=\"/results\">Yesterday's Results</a>\n");

    match view.amount {
        None => {
            body.push_str(&rules_card(
                "<form id=\"amount-form\" method=\"post\" action=\"/submit\">\n\
                 <label for=\"amount\">Select an amount:</label>\n\
                 <span>$</span><input id=\"amount\" name=\"amount\" type=\"number\" min=\"0\" step=\"any\" value=\"0\" \
                 title=\"For those obsessed with statistics, we're taking 1 standard deviation below the average.\">\n\
                 </form>\n",
            ));
            body.push_str("<button class=\"button\" type=\"submit\" form=\"amount-form\">Submit</button>\n");
        }
        Some(amount) => {
            let confirmation = format!(
                "<div class=\"success\">You entered: {:.2}. Check results at {} {}!</div>\n",
                amount,
                escape(&view.results_date),
                escape(&view.results_time)
            );
            body.push_str(&rules_card(&confirmation));
        }
    }

    layout("What's the World Thinking Today?", &body)
}
