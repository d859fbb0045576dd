/// HTML rendering for the per-site pages and the index page.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use super::{MAP_DATA_FILE, SiteReport, escape_html, format_duration};
use crate::model::{ReportIndexEntry, RiskLevel};

const STYLE: &str = r#"    <style>
        body { font-family: Arial, sans-serif; margin: 2em; text-align: center; }
        h1 { color: #006699; text-align: center; }
        table { border-collapse: collapse; margin: 1.5em auto 0 auto; text-align: center; }
        th, td { border: 1px solid #aaa; padding: 0.5em 1em; text-align: center; }
        th { background: #e3f1fa; }
        tr:nth-child(even) { background: #f9f9f9; }
        caption { font-weight: bold; font-size: 1.1em; margin-bottom: 0.5em; text-align: center; }
        ul.warnings { list-style: none; padding: 0; }
        .risk-high { color: red; font-weight: bold; font-size: 1.3em; }
        .risk-medium { color: orange; font-weight: bold; font-size: 1.1em; }
        .risk-low { color: green; font-weight: bold; font-size: 1.1em; }
        .poo-emoji { font-size: 4em; display: block; text-align: center; margin: 0.3em 0; }
        .disclaimer { font-size: 0.95em; color: #444; margin-top: 1em; text-align: center; }
        .generated { font-size: 0.85em; color: #777; margin-top: 1em; }
        #map { height: 420px; max-width: 800px; margin: 1.5em auto; }
    </style>
"#;

const DISCLAIMER: &str = "Distances are as the crow flies (not measured along the river or watercourse). \
    Whether an overflow is upstream is estimated with a simple latitude/longitude cut-off for each site, \
    so some overflows may be wrongly included or left out.";

fn head(title: &str, extra: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <title>{}</title>\n{}{}</head>\n",
        escape_html(title),
        STYLE,
        extra
    )
}

fn risk_span(risk: RiskLevel) -> String {
    format!("<span class=\"{}\">{}</span>", risk.css_class(), risk)
}

fn generated_line(generated_at: DateTime<Utc>) -> String {
    format!(
        "<div class=\"generated\">Generated {}</div>\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    )
}

/// Renders the page for a single site.
pub fn render_site_page(report: &SiteReport, generated_at: DateTime<Utc>) -> String {
    let name = escape_html(&report.site.name);
    let title = format!("Is there poo in {}?", report.site.name);

    let mut html = head(&title, "");
    html.push_str("<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&title));

    if report.risk == RiskLevel::High {
        html.push_str("<span class=\"poo-emoji\">💩</span>\n");
    }

    let _ = writeln!(html, "<p>\nRisk level = {}\n</p>", risk_span(report.risk));

    html.push_str("<table>\n");
    let _ = writeln!(
        html,
        "    <caption>Total storm overflows upstream of {} by distance (last 48 hours)</caption>",
        name
    );
    html.push_str("    <tr>\n        <th>Distance Band</th>\n        <th>Total Duration</th>\n    </tr>\n");
    for (edge, seconds) in report.totals.iter() {
        let _ = writeln!(
            html,
            "    <tr><td>Within {} mile(s)</td><td>{}</td></tr>",
            edge,
            format_duration(seconds)
        );
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Rain forecast</h2>\n");
    if report.warnings.is_empty() {
        html.push_str("<p>No heavy rain forecast</p>\n");
    } else {
        html.push_str("<ul class=\"warnings\">\n");
        for warning in &report.warnings {
            let _ = writeln!(html, "    <li>{}</li>", escape_html(&warning.message));
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(html, "<div class=\"disclaimer\">\n    {}\n</div>", DISCLAIMER);
    html.push_str(&generated_line(generated_at));
    html.push_str("<p><a href=\"index.html\">All swim sites</a></p>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Renders the overview page listing every site, all warnings and the map.
pub fn render_index_page(entries: &[ReportIndexEntry], generated_at: DateTime<Utc>) -> String {
    let leaflet = "    <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\">\n    \
                   <script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n";

    let mut html = head("Is there poo in the river?", leaflet);
    html.push_str("<body>\n<h1>Is there poo in the river?</h1>\n");

    html.push_str("<table>\n    <caption>Storm overflow risk by swim site</caption>\n");
    html.push_str("    <tr>\n        <th>Site</th>\n        <th>Risk</th>\n    </tr>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "    <tr><td><a href=\"{}\">{}</a></td><td>{}</td></tr>",
            escape_html(&entry.link()),
            escape_html(&entry.name),
            risk_span(entry.risk)
        );
    }
    html.push_str("</table>\n");

    html.push_str("<div id=\"map\"></div>\n");

    html.push_str("<h2>Rain forecast</h2>\n");
    let warnings: Vec<String> = entries
        .iter()
        .flat_map(|entry| {
            entry
                .warnings
                .iter()
                .map(move |w| format!("{}: {}", entry.name, w.message))
        })
        .collect();
    if warnings.is_empty() {
        html.push_str("<p>No heavy rain forecast</p>\n");
    } else {
        html.push_str("<ul class=\"warnings\">\n");
        for warning in &warnings {
            let _ = writeln!(html, "    <li>{}</li>", escape_html(warning));
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(html, "<div class=\"disclaimer\">\n    {}\n</div>", DISCLAIMER);
    html.push_str(&generated_line(generated_at));
    let _ = writeln!(html, "<script src=\"{}\"></script>", MAP_DATA_FILE);
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrecipitationWarning;
    use crate::report::sample_report;
    use chrono::{NaiveDate, TimeZone};

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 3, 12, 5, 0).unwrap()
    }

    fn warning(message: &str) -> PrecipitationWarning {
        PrecipitationWarning {
            date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            rainfall_mm: 12.3,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_site_page_lists_every_band_with_duration() {
        let page = render_site_page(&sample_report("conham", "Avon at Conham River", RiskLevel::High), when());
        assert!(page.contains("<td>Within 1 mile(s)</td><td>0 hours 1 minute</td>"));
        assert!(page.contains("<td>Within 5 mile(s)</td><td>0 hours 30 minutes</td>"));
        assert!(page.contains("<td>Within 10 mile(s)</td><td>0 hours 0 minutes</td>"));
        assert!(page.contains("<td>Within 50 mile(s)</td><td>1 hour 1 minute</td>"));
    }

    #[test]
    fn test_site_page_high_risk_has_emphasis_and_marker() {
        let page = render_site_page(&sample_report("conham", "Avon at Conham River", RiskLevel::High), when());
        assert!(page.contains("<span class=\"risk-high\">High</span>"));
        assert!(page.contains("<span class=\"poo-emoji\">💩</span>"));
        assert!(page.contains("<title>Is there poo in Avon at Conham River?</title>"));
    }

    #[test]
    fn test_site_page_low_risk_has_no_marker() {
        let page = render_site_page(&sample_report("chew", "River Chew at Publow", RiskLevel::Low), when());
        assert!(page.contains("<span class=\"risk-low\">Low</span>"));
        assert!(!page.contains("poo-emoji\">"));
    }

    #[test]
    fn test_site_page_warnings_or_none() {
        let mut report = sample_report("chew", "River Chew at Publow", RiskLevel::Medium);
        let page = render_site_page(&report, when());
        assert!(page.contains("No heavy rain forecast"));

        report.warnings.push(warning("2024-05-04: 12.3 mm of rain forecast"));
        let page = render_site_page(&report, when());
        assert!(page.contains("<li>2024-05-04: 12.3 mm of rain forecast</li>"));
        assert!(!page.contains("No heavy rain forecast"));
    }

    #[test]
    fn test_site_page_has_disclaimer_timestamp_and_back_link() {
        let page = render_site_page(&sample_report("chew", "River Chew at Publow", RiskLevel::Low), when());
        assert!(page.contains("as the crow flies"));
        assert!(page.contains("Generated 2024-05-03 12:05 UTC"));
        assert!(page.contains("href=\"index.html\""));
    }

    #[test]
    fn test_site_page_escapes_names() {
        let page = render_site_page(&sample_report("x", "Avon <b>& Frome</b>", RiskLevel::Low), when());
        assert!(page.contains("Avon &lt;b&gt;&amp; Frome&lt;/b&gt;"));
        assert!(!page.contains("<b>&"));
    }

    #[test]
    fn test_index_lists_sites_with_links_and_risk() {
        let entries = vec![
            sample_report("conham", "Avon at Conham River", RiskLevel::High).index_entry(),
            sample_report("salford", "Avon at Salford", RiskLevel::Medium).index_entry(),
        ];
        let page = render_index_page(&entries, when());
        assert!(page.contains("<a href=\"conham.html\">Avon at Conham River</a></td><td><span class=\"risk-high\">High</span>"));
        assert!(page.contains("<a href=\"salford.html\">Avon at Salford</a></td><td><span class=\"risk-medium\">Medium</span>"));
        assert!(page.contains("<div id=\"map\"></div>"));
        assert!(page.contains("<script src=\"index.js\"></script>"));
    }

    #[test]
    fn test_index_combines_warnings_prefixed_by_site() {
        let mut wet = sample_report("farleigh", "River Frome at Farleigh Hungerford", RiskLevel::Low);
        wet.warnings.push(warning("2024-05-04: 12.3 mm of rain forecast"));
        let dry = sample_report("chew", "River Chew at Publow", RiskLevel::Low);

        let page = render_index_page(&[dry.index_entry(), wet.index_entry()], when());
        assert!(page.contains("<li>River Frome at Farleigh Hungerford: 2024-05-04: 12.3 mm of rain forecast</li>"));
        assert!(!page.contains("No heavy rain forecast"));
    }

    #[test]
    fn test_index_without_warnings() {
        let page = render_index_page(&[], when());
        assert!(page.contains("No heavy rain forecast"));
    }
}
