use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::LazyLock};

use crate::error::ScrapeError;

/// Class prefix carried by the status icon of every injury item.
pub const OUTAGE_CLASS_PREFIX: &str = "sitesprite icon_";

static POSITION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.* (\([A-Z]{2}\))$").expect("position suffix regex is valid"));

/// A player listed as unavailable on the source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub full_name_with_position: String,
    pub team: Option<String>,
    pub outage_type: OutageType,
    pub description: String,
    pub length: String,
}

impl Player {
    pub fn new(
        full_name_with_position: impl Into<String>,
        team: Option<String>,
        outage_type: OutageType,
        description: impl Into<String>,
        length: impl Into<String>,
    ) -> Result<Self, ScrapeError> {
        let full_name_with_position = full_name_with_position.into();
        if full_name_with_position.trim().is_empty() {
            return Err(ScrapeError::EmptyPlayerName);
        }
        Ok(Self {
            full_name_with_position,
            team,
            outage_type,
            description: description.into(),
            length: length.into(),
        })
    }

    /// Position read from the name suffix. Only looked up when a player is
    /// matched, so an unmapped code never rejects the whole page.
    pub fn position(&self) -> Result<Position, ScrapeError> {
        Position::from_full_name(&self.full_name_with_position)
    }
}

/// Why a player is unavailable, as shown by the status icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutageType {
    /// Injured, out.
    InjuryRed,
    /// Doubtful.
    InjuryOrange,
    /// Light knock, probably available.
    InjuryGreen,
    /// Suspended.
    RedCard,
}

impl OutageType {
    pub const ALL: [OutageType; 4] = [
        OutageType::InjuryRed,
        OutageType::InjuryOrange,
        OutageType::InjuryGreen,
        OutageType::RedCard,
    ];

    pub fn value(self) -> &'static str {
        match self {
            OutageType::InjuryRed => "injury_red",
            OutageType::InjuryOrange => "injury_orange",
            OutageType::InjuryGreen => "injury_green",
            OutageType::RedCard => "red_card",
        }
    }

    pub fn from_value(value: &str) -> Result<Self, ScrapeError> {
        Self::ALL
            .into_iter()
            .find(|outage| outage.value() == value)
            .ok_or_else(|| ScrapeError::UnknownOutageType(value.to_string()))
    }

    /// Parses the `class` attribute of the status icon, e.g. `sitesprite icon_injury_red`.
    pub fn from_class(class: &str) -> Result<Self, ScrapeError> {
        let value = class
            .strip_prefix(OUTAGE_CLASS_PREFIX)
            .ok_or_else(|| ScrapeError::MissingStatusPrefix {
                prefix: OUTAGE_CLASS_PREFIX.to_string(),
                found: class.to_string(),
            })?;
        Self::from_value(value)
    }
}

impl fmt::Display for OutageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for OutageType {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    #[default]
    Undefined,
}

impl Position {
    /// The parenthesised code used on the source page, e.g. `(MI)`.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Position::Goalkeeper => Some("(GA)"),
            Position::Defender => Some("(DE)"),
            Position::Midfielder => Some("(MI)"),
            Position::Forward => Some("(AT)"),
            Position::Undefined => None,
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ScrapeError> {
        match code {
            "(GA)" => Ok(Position::Goalkeeper),
            "(DE)" => Ok(Position::Defender),
            "(MI)" => Ok(Position::Midfielder),
            "(AT)" => Ok(Position::Forward),
            other => Err(ScrapeError::UnknownPosition(other.to_string())),
        }
    }

    /// Reads the trailing ` (XX)` code of a "Name (XX)" string.
    /// Anything without that suffix is `Undefined`.
    pub fn from_full_name(full_name: &str) -> Result<Self, ScrapeError> {
        match POSITION_SUFFIX.captures(full_name).and_then(|caps| caps.get(1)) {
            Some(code) => Self::from_code(code.as_str()),
            None => Ok(Position::Undefined),
        }
    }

    /// Compatible when either side is undefined or both are the same.
    pub fn matches(self, other: Position) -> bool {
        self == Position::Undefined || other == Position::Undefined || self == other
    }
}

impl FromStr for Position {
    type Err = ScrapeError;

    /// Accepts a bare code (`MI`) or the parenthesised form (`(MI)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Position::Undefined);
        }
        if s.starts_with('(') {
            Self::from_code(s)
        } else {
            Self::from_code(&format!("({})", s.to_uppercase()))
        }
    }
}

/// A league covered by the source site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Championship {
    Ligue1,
    Ligue2,
    PremierLeague,
    Liga,
    SerieA,
}

impl Championship {
    pub const ALL: [Championship; 5] = [
        Championship::Ligue1,
        Championship::Ligue2,
        Championship::PremierLeague,
        Championship::Liga,
        Championship::SerieA,
    ];

    /// Path of the championship page, relative to the site base URL.
    pub fn path(self) -> &'static str {
        match self {
            Championship::Ligue1 => "france/ligue-1",
            Championship::Ligue2 => "france/ligue-2",
            Championship::PremierLeague => "angleterre/premier-league",
            Championship::Liga => "espagne/primera-division",
            Championship::SerieA => "italie/serie-a",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Championship::Ligue1 => "ligue-1",
            Championship::Ligue2 => "ligue-2",
            Championship::PremierLeague => "premier-league",
            Championship::Liga => "liga",
            Championship::SerieA => "serie-a",
        }
    }
}

impl fmt::Display for Championship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Championship {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|championship| championship.name() == wanted)
            .ok_or_else(|| ScrapeError::UnknownChampionship(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outage_type_from_class() {
        assert_eq!(OutageType::from_class("sitesprite icon_injury_red").unwrap(), OutageType::InjuryRed);
        assert_eq!(OutageType::from_class("sitesprite icon_injury_orange").unwrap(), OutageType::InjuryOrange);
        assert_eq!(OutageType::from_class("sitesprite icon_injury_green").unwrap(), OutageType::InjuryGreen);
        assert_eq!(OutageType::from_class("sitesprite icon_red_card").unwrap(), OutageType::RedCard);
    }

    #[test]
    fn test_outage_type_requires_prefix() {
        for class in ["injury_red", "icon_injury_red", "sprite icon_red_card", ""] {
            assert!(matches!(
                OutageType::from_class(class),
                Err(ScrapeError::MissingStatusPrefix { .. })
            ));
        }
    }

    #[test]
    fn test_outage_type_unknown_value() {
        assert_eq!(
            OutageType::from_class("sitesprite icon_yellow_card"),
            Err(ScrapeError::UnknownOutageType("yellow_card".to_string()))
        );
    }

    #[test]
    fn test_position_from_full_name() {
        assert_eq!(Position::from_full_name("John Smith (MI)").unwrap(), Position::Midfielder);
        assert_eq!(Position::from_full_name("Hugo Lloris (GA)").unwrap(), Position::Goalkeeper);
        assert_eq!(Position::from_full_name("Raphaël Varane (DE)").unwrap(), Position::Defender);
        assert_eq!(Position::from_full_name("Kylian Mbappé (AT)").unwrap(), Position::Forward);
        assert_eq!(Position::from_full_name("John Smith").unwrap(), Position::Undefined);
        assert_eq!(Position::from_full_name("John Smith (mi)").unwrap(), Position::Undefined);
        assert_eq!(Position::from_full_name("John Smith(MI)").unwrap(), Position::Undefined);
        assert_eq!(Position::from_full_name("John Smith (MID)").unwrap(), Position::Undefined);
    }

    #[test]
    fn test_position_unknown_code() {
        assert_eq!(
            Position::from_full_name("John Smith (XX)"),
            Err(ScrapeError::UnknownPosition("(XX)".to_string()))
        );
    }

    #[test]
    fn test_position_matches() {
        assert!(Position::Undefined.matches(Position::Forward));
        assert!(Position::Forward.matches(Position::Undefined));
        assert!(Position::Forward.matches(Position::Forward));
        assert!(!Position::Forward.matches(Position::Defender));
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("MI".parse::<Position>().unwrap(), Position::Midfielder);
        assert_eq!("(DE)".parse::<Position>().unwrap(), Position::Defender);
        assert_eq!("ga".parse::<Position>().unwrap(), Position::Goalkeeper);
        assert_eq!("".parse::<Position>().unwrap(), Position::Undefined);
        assert!("XX".parse::<Position>().is_err());
    }

    #[test]
    fn test_championship_from_str() {
        for championship in Championship::ALL {
            assert_eq!(championship.name().parse::<Championship>().unwrap(), championship);
        }
        assert_eq!("Ligue-1".parse::<Championship>().unwrap(), Championship::Ligue1);
        assert!("bundesliga".parse::<Championship>().is_err());
    }

    #[test]
    fn test_player_requires_name() {
        assert_eq!(
            Player::new("  ", None, OutageType::InjuryRed, "", ""),
            Err(ScrapeError::EmptyPlayerName)
        );
        let player = Player::new("Smith John (MI)", Some("Lyon".to_string()), OutageType::InjuryRed, "Knee", "2 weeks").unwrap();
        assert_eq!(player.position(), Ok(Position::Midfielder));
    }

    #[test]
    fn test_player_with_unmapped_position_is_kept() {
        let player = Player::new("Other Guy (LB)", None, OutageType::InjuryOrange, "Hip", "1 week").unwrap();
        assert_eq!(player.full_name_with_position, "Other Guy (LB)");
        assert_eq!(player.position(), Err(ScrapeError::UnknownPosition("(LB)".to_string())));
    }
}
