// Errors raised while turning an EquipeActu page into player records.
// Anything here means the page layout no longer matches what we expect,
// except the two `Unknown*` variants which mean a lookup table needs a new entry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("No teams have been found, parsing problem")]
    NoTeamFound,
    #[error("HTML content should start with prefix '{prefix}': {found}")]
    MissingStatusPrefix { prefix: String, found: String },
    #[error("Unknown outage type: {0}")]
    UnknownOutageType(String),
    #[error("Unknown position code: {0}")]
    UnknownPosition(String),
    #[error("Missing element '{selector}' in injury item")]
    MissingElement { selector: String },
    #[error("Injury item has an empty player name")]
    EmptyPlayerName,
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
    #[error("Unknown championship: {0}")]
    UnknownChampionship(String),
}
