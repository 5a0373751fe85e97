//! Club list parser for the per-league teams JSON endpoint.
//!
//! Response shape: `sports[0].leagues[0].teams[].team.{id,name}`. The id
//! arrives as a string; entries whose id does not parse as an integer are
//! dropped rather than failing the league.

use serde::Deserialize;

use crate::types::{Club, League};

#[derive(Debug, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub sports: Vec<SportNode>,
}

#[derive(Debug, Deserialize)]
pub struct SportNode {
    #[serde(default)]
    pub leagues: Vec<LeagueNode>,
}

#[derive(Debug, Deserialize)]
pub struct LeagueNode {
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TeamEntry {
    pub team: TeamNode,
}

#[derive(Debug, Deserialize)]
pub struct TeamNode {
    pub id: String,
    pub name: String,
}

/// Parser for teams endpoint responses
pub struct TeamsApiParser;

impl TeamsApiParser {
    /// Flatten a teams response into clubs owned by `league`.
    pub fn clubs(response: &TeamsResponse, league: &League) -> Vec<Club> {
        response
            .sports
            .iter()
            .flat_map(|sport| &sport.leagues)
            .flat_map(|node| &node.teams)
            .filter_map(|entry| {
                let id = entry.team.id.parse::<u32>().ok()?;
                Some(Club::new(id, entry.team.name.clone(), league.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "sports": [{
            "leagues": [{
                "teams": [
                    {"team": {"id": "359", "name": "Arsenal"}},
                    {"team": {"id": "360", "name": "Manchester United"}},
                    {"team": {"id": "not-a-number", "name": "Ghost FC"}}
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_parse_teams_response() {
        let response: TeamsResponse = serde_json::from_str(SAMPLE_JSON).unwrap();
        let league = League::new("eng.1", "English Premier League");

        let clubs = TeamsApiParser::clubs(&response, &league);

        assert_eq!(clubs.len(), 2);
        assert_eq!(clubs[0].club_id, 359);
        assert_eq!(clubs[0].name, "Arsenal");
        assert_eq!(clubs[0].league, league);
        assert_eq!(clubs[1].club_id, 360);
    }

    #[test]
    fn test_empty_response() {
        let response: TeamsResponse = serde_json::from_str("{}").unwrap();
        let league = League::new("eng.1", "English Premier League");
        assert!(TeamsApiParser::clubs(&response, &league).is_empty());
    }
}
