use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::{
    error::ScrapeError,
    teams::TeamNameTables,
    types::{OutageType, Player},
    utils::{self, element_text, is_blank},
};

const ITEM: &str = "div.injuries_item";
const PLAYER_NAME: &str = "div.injuries_playername";
const DESCRIPTION: &str = "div.injuries_name";
const LENGTH: &str = "div.injuries_length";
const STATUS_ICON: &str = "div.injuries_type span";
const LOGO: &str = "img";

struct ItemSelectors {
    item: Selector,
    player_name: Selector,
    description: Selector,
    length: Selector,
    status_icon: Selector,
    logo: Selector,
}

impl ItemSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            item: utils::selector(ITEM)?,
            player_name: utils::selector(PLAYER_NAME)?,
            description: utils::selector(DESCRIPTION)?,
            length: utils::selector(LENGTH)?,
            status_icon: utils::selector(STATUS_ICON)?,
            logo: utils::selector(LOGO)?,
        })
    }
}

#[derive(Default)]
struct ScanState {
    current_team: Option<String>,
    team_found: bool,
    players: Vec<Player>,
}

/// Turns an EquipeActu injuries page into player records.
pub struct InjuryPageParser {
    tables: TeamNameTables,
}

impl Default for InjuryPageParser {
    fn default() -> Self {
        Self::new(TeamNameTables::default())
    }
}

impl InjuryPageParser {
    pub fn new(tables: TeamNameTables) -> Self {
        Self { tables }
    }

    /// Team names only appear before the first item of each team, so the
    /// last resolved team is carried over to the following items.
    pub fn parse(&self, html: &str) -> Result<Vec<Player>, ScrapeError> {
        let document = Html::parse_document(html);
        let selectors = ItemSelectors::new()?;

        let state = document
            .select(&selectors.item)
            .try_fold(ScanState::default(), |mut state, item| -> Result<ScanState, ScrapeError> {
                state.current_team = self.resolve_team(&item, state.current_team, &selectors);
                if !is_blank(state.current_team.as_deref()) {
                    state.team_found = true;
                }

                // No injured or suspended player in this team
                if item.select(&selectors.description).next().is_none() {
                    return Ok(state);
                }

                let player = self.extract_player(&item, state.current_team.as_deref(), &selectors)?;
                debug!(
                    "Found {} ({:?}) for team {:?}",
                    player.full_name_with_position, player.outage_type, player.team
                );
                state.players.push(player);
                Ok(state)
            })?;

        if !state.team_found {
            return Err(ScrapeError::NoTeamFound);
        }
        info!("Parsed {} unavailable players", state.players.len());
        Ok(state.players)
    }

    fn resolve_team(
        &self,
        item: &ElementRef,
        current_team: Option<String>,
        selectors: &ItemSelectors,
    ) -> Option<String> {
        let Some(container) = team_container(item) else {
            return current_team;
        };
        let Some(logo) = container.select(&selectors.logo).next() else {
            return current_team;
        };

        let name = element_text(&container);
        if !name.is_empty() {
            return Some(name);
        }
        // No team name, fall back to the logo file name
        self.tables
            .team_from_logo(logo.value().attr("src").unwrap_or_default())
    }

    fn extract_player(
        &self,
        item: &ElementRef,
        team: Option<&str>,
        selectors: &ItemSelectors,
    ) -> Result<Player, ScrapeError> {
        let class = first(item, &selectors.status_icon, STATUS_ICON)?
            .value()
            .attr("class")
            .unwrap_or_default()
            .trim()
            .to_string();
        let outage_type = OutageType::from_class(&class)?;

        let full_name = element_text(&first(item, &selectors.player_name, PLAYER_NAME)?);
        let description = element_text(&first(item, &selectors.description, DESCRIPTION)?);
        let length = element_text(&first(item, &selectors.length, LENGTH)?);
        let team = team.map(|team| self.tables.normalize_team(team).to_string());

        Player::new(full_name, team, outage_type, description, length)
    }
}

// The element just before the item's parent holds the team logo and name.
fn team_container<'a>(item: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    item.parent()?.prev_siblings().find_map(ElementRef::wrap)
}

fn first<'a>(item: &ElementRef<'a>, selector: &Selector, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    item.select(selector)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement {
            selector: css.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use pretty_assertions::assert_eq;

    fn team_block(header: &str, items: &str) -> String {
        format!(
            r#"<div class="injuries_team">{}</div><div class="injuries_list">{}</div>"#,
            header, items
        )
    }

    fn item(class: &str, name: &str, description: &str, length: &str) -> String {
        format!(
            r#"<div class="injuries_item">
                <div class="injuries_type"><span class="{}"></span></div>
                <div class="injuries_playername">{}</div>
                <div class="injuries_name">{}</div>
                <div class="injuries_length">{}</div>
            </div>"#,
            class, name, description, length
        )
    }

    fn empty_item() -> String {
        r#"<div class="injuries_item"><div class="injuries_none">Aucun joueur</div></div>"#.to_string()
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body><div id=\"injuries\">{}</div></body></html>", blocks.concat())
    }

    #[test]
    fn test_parse_carries_team_forward() {
        let html = page(&[team_block(
            r#"<img src="/img/logos/equipes/lyon.png"> Olympique Lyonnais"#,
            &[
                item("sitesprite icon_injury_red", "Smith John (MI)", "Knee", "2 weeks"),
                item("sitesprite icon_red_card", "Doe Jane (DE)", "Red card", "1 match"),
            ]
            .concat(),
        )]);

        let players = InjuryPageParser::default().parse(&html).unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].full_name_with_position, "Smith John (MI)");
        assert_eq!(players[0].team.as_deref(), Some("Lyon"));
        assert_eq!(players[0].outage_type, OutageType::InjuryRed);
        assert_eq!(players[0].position(), Ok(Position::Midfielder));
        assert_eq!(players[0].description, "Knee");
        assert_eq!(players[0].length, "2 weeks");
        assert_eq!(players[1].team.as_deref(), Some("Lyon"));
        assert_eq!(players[1].outage_type, OutageType::RedCard);
    }

    #[test]
    fn test_unmapped_position_does_not_reject_page() {
        let html = page(&[team_block(
            r#"<img src="/img/logos/equipes/lyon.png"> Lyon"#,
            &[
                item("sitesprite icon_injury_red", "Smith John (MI)", "Knee", "2 weeks"),
                item("sitesprite icon_injury_orange", "Other Guy (LB)", "Hip", "1 week"),
            ]
            .concat(),
        )]);

        let players = InjuryPageParser::default().parse(&html).unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[1].full_name_with_position, "Other Guy (LB)");
        assert_eq!(players[1].team.as_deref(), Some("Lyon"));
        assert_eq!(players[1].position(), Err(ScrapeError::UnknownPosition("(LB)".to_string())));
    }

    #[test]
    fn test_team_carried_across_lists() {
        let html = page(&[
            team_block(
                r#"<img src="/img/logos/equipes/lyon.png"> Lyon"#,
                &item("sitesprite icon_injury_red", "Smith John (MI)", "Knee", "2 weeks"),
            ),
            team_block(
                "<span>Publicité</span>",
                &item("sitesprite icon_red_card", "Doe Jane (DE)", "Red card", "1 match"),
            ),
            format!(
                r#"<div class="injuries_list">{}</div>"#,
                item("sitesprite icon_injury_green", "Roux Marc (AT)", "Cramp", "1 day")
            ),
        ]);

        let players = InjuryPageParser::default().parse(&html).unwrap();

        let teams: Vec<Option<&str>> = players.iter().map(|player| player.team.as_deref()).collect();
        assert_eq!(teams, vec![Some("Lyon"), Some("Lyon"), Some("Lyon")]);
    }

    #[test]
    fn test_team_without_players_is_skipped() {
        let html = page(&[
            team_block(r#"<img src="/img/logos/equipes/brest.png"> Brest"#, &empty_item()),
            team_block(
                r#"<img src="/img/logos/equipes/psg.png"> PSG"#,
                &item("sitesprite icon_injury_orange", "Martin Paul (AT)", "Ankle", "Doubtful"),
            ),
        ]);

        let players = InjuryPageParser::default().parse(&html).unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].team.as_deref(), Some("Paris"));
        assert_eq!(players[0].outage_type, OutageType::InjuryOrange);
    }

    #[test]
    fn test_team_from_logo_when_name_is_blank() {
        let html = page(&[
            team_block(
                r#"<img src="/img/logos/equipes/athletic-club.png">"#,
                &item("sitesprite icon_injury_green", "Garcia Luis (GA)", "Back", "1 week"),
            ),
            team_block(
                r#"<img src="/img/logos/equipes/blank_team.png">"#,
                &item("sitesprite icon_injury_red", "Nobody Known", "Unknown", "?"),
            ),
        ]);

        let players = InjuryPageParser::default().parse(&html).unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].team.as_deref(), Some("Bilbao"));
        assert_eq!(players[1].team, None);
        assert_eq!(players[1].position(), Ok(Position::Undefined));
    }

    #[test]
    fn test_no_team_found() {
        let html = page(&[team_block(
            "<span>no logo here</span>",
            &item("sitesprite icon_injury_red", "Smith John (MI)", "Knee", "2 weeks"),
        )]);

        assert_eq!(InjuryPageParser::default().parse(&html), Err(ScrapeError::NoTeamFound));
        assert_eq!(
            InjuryPageParser::default().parse("<html><body></body></html>"),
            Err(ScrapeError::NoTeamFound)
        );
    }

    #[test]
    fn test_status_without_prefix_aborts() {
        let html = page(&[team_block(
            r#"<img src="/img/logos/equipes/lyon.png"> Lyon"#,
            &item("icon_injury_red", "Smith John (MI)", "Knee", "2 weeks"),
        )]);

        assert!(matches!(
            InjuryPageParser::default().parse(&html),
            Err(ScrapeError::MissingStatusPrefix { .. })
        ));
    }

    #[test]
    fn test_missing_length_aborts() {
        let html = page(&[team_block(
            r#"<img src="/img/logos/equipes/lyon.png"> Lyon"#,
            r#"<div class="injuries_item">
                <div class="injuries_type"><span class="sitesprite icon_injury_red"></span></div>
                <div class="injuries_playername">Smith John (MI)</div>
                <div class="injuries_name">Knee</div>
            </div>"#,
        )]);

        assert_eq!(
            InjuryPageParser::default().parse(&html),
            Err(ScrapeError::MissingElement {
                selector: LENGTH.to_string()
            })
        );
    }
}
