//! Server-rendered dashboard page.

use std::fmt::Write as _;

use crate::analytics::Highlight;
use crate::catalog::IndicatorKey;
use crate::model::MetricValue;
use crate::pipeline::DashboardBundle;

pub fn render_dashboard(bundle: &DashboardBundle) -> String {
    let mut html = String::with_capacity(16_384);
    let title = escape(&bundle.target_country);

    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Gender Equality in {title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 1100px; margin: 24px auto; padding: 0 12px; color: #222; }}
    .card {{ border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }}
    .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 12px; }}
    table {{ border-collapse: collapse; width: 100%; font-size: 0.9rem; }}
    th, td {{ border-bottom: 1px solid #eee; padding: 6px; text-align: left; }}
    th span {{ display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 4px; }}
    tr.target {{ font-weight: 700; background: #fff8e1; }}
    .muted {{ color: #777; font-size: 0.85rem; }}
    .warning {{ color: #8a4b00; }}
  </style>
</head>
<body>
  <h1>Gender Equality in {title} and Neighbors</h1>
  <p class="muted">Generated {generated}</p>
"#,
        generated = escape(&bundle.generated_at),
    );

    for warning in &bundle.warnings {
        let _ = writeln!(html, "  <p class=\"warning\">{}</p>", escape(warning));
    }

    render_overview(&mut html, bundle);
    render_highlights(&mut html, bundle);
    render_country_table(&mut html, bundle);
    render_named_counts(&mut html, bundle);
    render_papers(&mut html, bundle);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_overview(html: &mut String, bundle: &DashboardBundle) {
    let overview = &bundle.overview;
    html.push_str("  <section class=\"card\">\n    <h2>Quick Overview</h2>\n    <div class=\"grid\">\n");

    let ranking = overview
        .female_population
        .ranking
        .map(|rank| format!("ranked #{rank} in the region"))
        .unwrap_or_else(|| "not ranked".to_string());
    tile(
        html,
        "Female Population",
        &format!("{}%", overview.female_population.value),
        &ranking,
    );
    tile(
        html,
        "Labor Force Participation",
        &format!(
            "{}% women / {}% men",
            overview.labor_force_participation.female, overview.labor_force_participation.male
        ),
        &gap_text(overview.labor_force_participation.gap),
    );
    tile(
        html,
        "Women in Parliament",
        &format!("{}%", overview.women_in_parliament.value),
        &overview
            .women_in_parliament
            .regional_position
            .map(|position| position.to_string())
            .unwrap_or_else(|| "No regional comparison".to_string()),
    );
    tile(
        html,
        "Unemployment",
        &format!(
            "{}% women / {}% men",
            overview.unemployment_rate.female, overview.unemployment_rate.male
        ),
        overview.unemployment_rate.trend.as_deref().unwrap_or("No trend available"),
    );
    tile(
        html,
        "Most Common Sector",
        &overview.sector_employment.most_common.to_string(),
        &overview.sector_employment.comparison_to_region,
    );
    tile(
        html,
        "Wage and Salaried Workers",
        &format!("{}%", overview.wage_and_salaried_workers.female),
        overview.wage_and_salaried_workers.context.as_deref().unwrap_or(""),
    );
    tile(
        html,
        "Maternal Mortality",
        &format!("{} per 100,000", overview.maternal_mortality_comparison.value),
        overview
            .maternal_mortality_comparison
            .comparison_to_region
            .as_deref()
            .unwrap_or("No regional comparison"),
    );
    tile(
        html,
        "Youth Literacy",
        &format!(
            "{}% women / {}% men",
            overview.youth_literacy_gap.female, overview.youth_literacy_gap.male
        ),
        &gap_text(overview.youth_literacy_gap.gap),
    );
    tile(
        html,
        "Self-Employment",
        &format!(
            "{}% women / {}% men",
            overview.self_employment.female, overview.self_employment.male
        ),
        overview.self_employment.context.as_deref().unwrap_or(""),
    );
    tile(
        html,
        "Financial Access",
        &format!("{}%", overview.financial_access.value),
        &overview.financial_access.context,
    );
    tile(
        html,
        "Vulnerable Employment",
        &format!(
            "{}% women / {}% men",
            overview.vulnerable_employment.female, overview.vulnerable_employment.male
        ),
        overview.vulnerable_employment.context.as_deref().unwrap_or(""),
    );

    html.push_str("    </div>\n  </section>\n");
}

fn tile(html: &mut String, heading: &str, value: &str, note: &str) {
    let _ = writeln!(
        html,
        "      <div><strong>{}</strong><div>{}</div><div class=\"muted\">{}</div></div>",
        escape(heading),
        escape(value),
        escape(note)
    );
}

fn gap_text(gap: Option<f64>) -> String {
    gap.map(|gap| format!("Gap: {gap} percentage points"))
        .unwrap_or_else(|| "Gap unavailable".to_string())
}

fn render_highlights(html: &mut String, bundle: &DashboardBundle) {
    let highlights = &bundle.highlights;
    html.push_str("  <section class=\"card\">\n    <h2>Highlights</h2>\n    <ul>\n");
    highlight_item(html, "Highest female population share", &highlights.top_female_population);
    highlight_item(html, "Most women in parliament", &highlights.top_parliament);
    highlight_item(
        html,
        "Lowest female labor force participation",
        &highlights.lowest_labor_force,
    );
    html.push_str("    </ul>\n  </section>\n");
}

fn highlight_item(html: &mut String, label: &str, highlight: &Option<Highlight>) {
    let text = match highlight {
        Some(highlight) => format!("{} ({}%)", highlight.country, highlight.value),
        None => "No data".to_string(),
    };
    let _ = writeln!(html, "      <li>{}: {}</li>", escape(label), escape(&text));
}

fn render_country_table(html: &mut String, bundle: &DashboardBundle) {
    html.push_str("  <section class=\"card\">\n    <h2>Country Comparison</h2>\n    <table>\n      <tr><th>Country</th>");
    for key in IndicatorKey::ALL {
        let _ = write!(
            html,
            "<th><span style=\"background:{}\"></span>{}</th>",
            escape(key.color()),
            escape(key.label())
        );
    }
    html.push_str("</tr>\n");

    for (name, record) in bundle.data.countries() {
        let class = if name == bundle.data.target_name() {
            " class=\"target\""
        } else {
            ""
        };
        let _ = write!(html, "      <tr{class}><td>{}</td>", escape(name));
        for (_, value) in record.iter() {
            let cell = match value {
                MetricValue::Present(value) => value.to_string(),
                MetricValue::Absent => "N/A".to_string(),
            };
            let _ = write!(html, "<td>{cell}</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("    </table>\n  </section>\n");
}

fn render_named_counts(html: &mut String, bundle: &DashboardBundle) {
    html.push_str("  <section class=\"card\">\n    <h2>Streets and Buildings Named After</h2>\n");
    if bundle.gender_named_counts.is_empty() {
        html.push_str("    <p class=\"muted\">No data available.</p>\n");
    } else {
        html.push_str("    <ul>\n");
        for (label, count) in &bundle.gender_named_counts {
            let _ = writeln!(html, "      <li>{}: {count}</li>", escape(label));
        }
        html.push_str("    </ul>\n");
    }
    html.push_str("  </section>\n");
}

fn render_papers(html: &mut String, bundle: &DashboardBundle) {
    html.push_str("  <section class=\"card\">\n    <h2>Latest Research</h2>\n");
    if bundle.research_papers.is_empty() {
        html.push_str("    <p class=\"muted\">No papers available.</p>\n");
    }
    for paper in &bundle.research_papers {
        let access = if paper.open_access { "Open access" } else { "Closed access" };
        let license = paper
            .license
            .as_deref()
            .map(|license| format!(" · {}", escape(license)))
            .unwrap_or_default();
        let _ = writeln!(
            html,
            "    <article><h3><a href=\"{}\">{}</a></h3><p>{}</p><p class=\"muted\">{} · {}{} · {}</p></article>",
            escape(&paper.link),
            escape(&paper.title),
            escape(&paper.authors),
            escape(&paper.publication_date),
            access,
            license,
            escape(&paper.categories.join(", ")),
        );
    }
    html.push_str("  </section>\n");
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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
    use super::escape;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">R&D's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
    }
}
