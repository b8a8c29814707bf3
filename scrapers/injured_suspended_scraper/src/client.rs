use anyhow::{anyhow, Context, Result};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::{debug, info};

use crate::{
    config::{with_trailing_slash, ScraperConfig},
    fetcher::{HtmlFetcher, WebHtmlFetcher},
    injury_scraper::InjuryPageParser,
    matcher,
    types::{Championship, OutageType, Player, Position},
};

/// Injured and suspended players from EquipeActu, parsed at most once per
/// championship for the lifetime of the client.
pub struct InjuredSuspendedClient<F: HtmlFetcher = WebHtmlFetcher> {
    fetcher: F,
    base_url: String,
    parser: InjuryPageParser,
    cache: Mutex<HashMap<Championship, Arc<Vec<Player>>>>,
}

impl InjuredSuspendedClient<WebHtmlFetcher> {
    pub fn build(config: &ScraperConfig) -> Result<Self> {
        let fetcher = WebHtmlFetcher::new(config)?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: HtmlFetcher> InjuredSuspendedClient<F> {
    pub fn new(config: &ScraperConfig, fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: with_trailing_slash(&config.scraping.base_url),
            parser: InjuryPageParser::default(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    pub fn with_parser(mut self, parser: InjuryPageParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn url(&self, championship: Championship) -> String {
        format!("{}{}", self.base_url, championship.path())
    }

    pub fn get_html_content(&self, championship: Championship) -> Result<String> {
        let url = self.url(championship);
        info!("Fetching injured and suspended players for {} from {}", championship, url);
        self.fetcher
            .fetch_html(&url)
            .with_context(|| format!("Failed to fetch {} page from {}", championship, url))
    }

    /// The lock is held while a missing championship is fetched and parsed,
    /// so a page is never downloaded twice. Failures are not cached.
    pub fn get_players(&self, championship: Championship) -> Result<Arc<Vec<Player>>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| anyhow!("Players cache lock poisoned"))?;
        if let Some(players) = cache.get(&championship) {
            debug!("Using cached players for {}", championship);
            return Ok(Arc::clone(players));
        }

        let html = self.get_html_content(championship)?;
        let players = self
            .parser
            .parse(&html)
            .with_context(|| format!("Failed to parse {} injuries page", championship))?;
        let players = Arc::new(players);
        cache.insert(championship, Arc::clone(&players));
        Ok(players)
    }

    /// Injured or suspended player matching the given name, position and team.
    /// `Ok(None)` means the player is available. Fails if the first candidate
    /// passing the outage and name checks carries an unmapped position code.
    pub fn find_player(
        &self,
        championship: Championship,
        name: &str,
        position: Position,
        team: &str,
        excludes: &[OutageType],
    ) -> Result<Option<Player>> {
        let players = self.get_players(championship)?;
        let found = matcher::find_player(&players, name, position, team, excludes)?.cloned();
        match &found {
            Some(player) => debug!("'{}' matched {}", name, player.full_name_with_position),
            None => debug!("'{}' not found in {}", name, championship),
        }
        Ok(found)
    }

    pub fn find_player_any(
        &self,
        championship: Championship,
        name: &str,
        position: Position,
        team: &str,
    ) -> Result<Option<Player>> {
        self.find_player(championship, name, position, team, &[])
    }
}
