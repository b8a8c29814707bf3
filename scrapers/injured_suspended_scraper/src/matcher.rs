use crate::{
    error::ScrapeError,
    types::{OutageType, Player, Position},
    utils::is_blank,
};

/// Finds the first player matching a name, position and team, in page order.
///
/// Every whitespace-separated word of `name` must appear (case-insensitive)
/// somewhere in the player's "Name (XX)" text, so word order and extra
/// first names on either side don't matter. An undefined position on
/// either side matches anything, and the team is only checked when both
/// sides have one. Players whose outage type is in `excludes` are ignored.
///
/// A candidate's position is only parsed once it passed the outage and name
/// checks. An unmapped position code on that candidate is an error.
pub fn find_player<'a>(
    players: &'a [Player],
    name: &str,
    position: Position,
    team: &str,
    excludes: &[OutageType],
) -> Result<Option<&'a Player>, ScrapeError> {
    let name = name.to_lowercase();
    let tokens: Vec<&str> = name.split_whitespace().collect();

    for player in players {
        if excludes.contains(&player.outage_type) || !name_matches(&tokens, player) {
            continue;
        }
        if player.position()?.matches(position) && team_matches(team, player.team.as_deref()) {
            return Ok(Some(player));
        }
    }
    Ok(None)
}

fn name_matches(tokens: &[&str], player: &Player) -> bool {
    let full_name = player.full_name_with_position.to_lowercase();
    tokens.iter().all(|token| full_name.contains(token))
}

fn team_matches(team: &str, player_team: Option<&str>) -> bool {
    match player_team {
        Some(player_team) if !is_blank(Some(team)) && !is_blank(Some(player_team)) => player_team == team,
        _ => true,
    }
}
