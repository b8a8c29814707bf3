use std::collections::HashMap;
use tracing::debug;

use crate::utils::capitalize_words;

/// Logos with this marker in their path belong to no team.
pub const BLANK_TEAM_LOGO: &str = "blank_team";

// EquipeActu team name -> MPG team name. The site renames teams from time to time.
const TEAM_NAMES: &[(&str, &str)] = &[
    // Ligue 1
    ("Amiens SC", "Amiens"),
    ("Angers Sco", "Angers"),
    ("Angers SCO", "Angers"),
    ("Nimes", "Nîmes"),
    ("PSG", "Paris"),
    ("Olympique Lyon", "Lyon"),
    ("Olympique Lyonnais", "Lyon"),
    ("Olympique Marseille", "Marseille"),
    ("Paris Saint Germain", "Paris"),
    ("Saint Etienne", "Saint-Étienne"),
    // Premier League
    ("Afc Bournemouth", "Bournemouth"),
    ("Brighton And Hove Albion", "Brighton"),
    ("Manchester City", "Man. City"),
    ("Leicester City", "Leicester"),
    ("Manchester United", "Man. United"),
    ("Newcastle United", "Newcastle"),
    ("Norwich City", "Norwich"),
    ("Sheffield United", "Sheffield"),
    ("Sheffield U.", "Sheffield"),
    ("West Ham United", "West Ham"),
    ("Wolverhampton Wanderers", "Wolverhampton"),
    // Serie A
    ("Bologne", "Bologna"),
    ("AC Milan", "Milan"),
    ("Rome", "Roma"),
    ("SSC Napoli", "Napoli"),
    ("SPAL 2013", "Spal"),
    ("Internazionale", "Inter"),
    ("SSD Parma", "Parma"),
    ("Hellas Verona", "Verona"),
    // Liga
    ("Alaves", "Alavés"),
    ("Celta Vigo", "Celta"),
    ("Celta De Vigo", "Celta"),
    ("Deportivo Alavés", "Alavés"),
    ("Athletic Bilbao", "Bilbao"),
    ("Atletico Bilbao", "Bilbao"),
    ("Atlético Madrid", "Atlético"),
    ("Atletico Madrid", "Atlético"),
    ("Barcelone", "Barcelona"),
    ("Grenade", "Granada"),
    ("Leganes", "Leganés"),
    ("Majorque", "Mallorca"),
    ("Séville", "Sevilla"),
    ("Real Betis", "Betis"),
    ("Real Valladolid", "Valladolid"),
    ("Valence", "Valencia"),
];

// Name rebuilt from a logo file name -> MPG team name.
const LOGO_NAMES: &[(&str, &str)] = &[
    ("Psg", "Paris"),
    ("Athletic Club", "Bilbao"),
    ("Internazionale", "Inter"),
];

/// Lookup tables translating the source site's team names into canonical ones.
#[derive(Debug, Clone)]
pub struct TeamNameTables {
    team_names: HashMap<String, String>,
    logo_names: HashMap<String, String>,
}

impl Default for TeamNameTables {
    fn default() -> Self {
        Self::new(TEAM_NAMES, LOGO_NAMES)
    }
}

impl TeamNameTables {
    pub fn new(team_names: &[(&str, &str)], logo_names: &[(&str, &str)]) -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect::<HashMap<_, _>>()
        };
        Self {
            team_names: to_map(team_names),
            logo_names: to_map(logo_names),
        }
    }

    /// Canonical name for a team name read from the page.
    /// Names missing from the table are returned as they are.
    pub fn normalize_team<'a>(&'a self, raw_name: &'a str) -> &'a str {
        match self.team_names.get(raw_name) {
            Some(canonical) => canonical.as_str(),
            None => {
                debug!("No team alias for '{}', keeping it", raw_name);
                raw_name
            }
        }
    }

    /// Team name rebuilt from a logo path such as `/img/logos/athletic-club.png`.
    /// Returns `None` for the blank team logo.
    pub fn team_from_logo(&self, logo_src: &str) -> Option<String> {
        if logo_src.contains(BLANK_TEAM_LOGO) {
            return None;
        }
        let file_name = logo_src.rsplit('/').next().unwrap_or(logo_src);
        let stem = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _extension)| stem);
        let name = capitalize_words(&stem.replace('-', " "));
        if name.is_empty() {
            return None;
        }
        match self.logo_names.get(&name) {
            Some(canonical) => Some(canonical.clone()),
            None => Some(name),
        }
    }
}
