//! ESPN scoreboard response types. Only the fields we read.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Scoreboard {
    #[serde(default)]
    pub events: Option<Vec<Event>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: String,
    #[serde(default)]
    pub team: Option<Team>,
    /// ESPN sends scores as strings.
    #[serde(default)]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    #[serde(rename = "type")]
    pub kind: StatusType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusType {
    pub name: String,
}

impl Competition {
    pub fn side(&self, home_away: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.home_away == home_away)
    }
}

impl Competitor {
    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref()?.display_name.as_deref()
    }
}
