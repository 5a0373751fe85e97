//! League list parser for the team-directory page.

use scraper::{Html, Selector};

use crate::types::League;

/// Parser for the team-directory page's league dropdown
pub struct LeaguePageParser;

impl LeaguePageParser {
    /// Parse the league dropdown into (url, name) pairs.
    ///
    /// A missing dropdown returns an empty list rather than an error: league
    /// listings rarely change, and a degraded directory page should not take
    /// down an otherwise-working run.
    pub fn parse(html: &str) -> Vec<League> {
        let document = Html::parse_document(html);

        let dropdown_selector = match Selector::parse("select.dropdown__select") {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };
        let option_selector = Selector::parse("option").expect("static selector");

        let Some(dropdown) = document.select(&dropdown_selector).next() else {
            return Vec::new();
        };

        dropdown
            .select(&option_selector)
            .filter_map(|option| {
                let url = option.value().attr("value")?.trim().to_string();
                let name = option.text().collect::<String>().trim().to_string();
                if url.is_empty() || name.is_empty() {
                    return None;
                }
                Some(League::new(url, name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<select class="dropdown__select">
  <option value="eng.1">English Premier League</option>
  <option value="esp.1">Spanish LaLiga</option>
  <option value="">Choose a league</option>
</select>
</body>
</html>"#;

    #[test]
    fn test_parse_dropdown_options() {
        let leagues = LeaguePageParser::parse(SAMPLE_HTML);

        assert_eq!(leagues.len(), 2);
        assert_eq!(leagues[0], League::new("eng.1", "English Premier League"));
        assert_eq!(leagues[1], League::new("esp.1", "Spanish LaLiga"));
    }

    #[test]
    fn test_missing_dropdown_is_soft_failure() {
        let leagues = LeaguePageParser::parse("<html><body><p>maintenance</p></body></html>");
        assert!(leagues.is_empty());
    }
}
