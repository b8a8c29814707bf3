use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fs, path::Path};
use tracing::info;

use crate::{
    client::InjuredSuspendedClient,
    fetcher::HtmlFetcher,
    types::{Championship, OutageType, Player, Position},
};

/// A player of a fantasy team, as exported from the fantasy platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_position")]
    pub position: Position,
    #[serde(default)]
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnavailablePlayer {
    pub entry: RosterEntry,
    pub player: Player,
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    match code {
        Some(code) => code.parse().map_err(serde::de::Error::custom),
        None => Ok(Position::Undefined),
    }
}

pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read roster {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid roster JSON in {:?}", path))
}

/// Roster players listed as injured or suspended, in roster order.
pub fn check_roster<F: HtmlFetcher>(
    client: &InjuredSuspendedClient<F>,
    championship: Championship,
    roster: &[RosterEntry],
    excludes: &[OutageType],
) -> Result<Vec<UnavailablePlayer>> {
    let mut unavailable = Vec::new();
    for entry in roster {
        if let Some(player) = client.find_player(championship, &entry.name, entry.position, &entry.team, excludes)? {
            info!("{} is unavailable: {} ({})", entry.name, player.description, player.length);
            unavailable.push(UnavailablePlayer {
                entry: entry.clone(),
                player,
            });
        }
    }
    Ok(unavailable)
}
