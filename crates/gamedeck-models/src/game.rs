//! Game catalog entries and client-side catalog queries.
//!
//! A [`Game`] is immutable once fetched: it lives for as long as the
//! dashboard response it came from. Searching the catalog with
//! [`filter_games`] is a pure function of the list and the search term.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Betting limits advertised for a game.
///
/// Amounts are kept as the decimal strings the operator sends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BetConfig {
    /// Smallest accepted stake.
    pub min_bet_amount: String,
    /// Largest accepted stake.
    pub max_bet_amount: String,
    /// Currency code of both amounts.
    pub currency: String,
}

/// A single playable title from the dashboard catalog.
///
/// # Examples
///
/// ```
/// use gamedeck_models::Game;
///
/// let game: Game = serde_json::from_str(r#"{
///     "gameCode": "G1", "gameName": "game_one", "displayName": "Game One",
///     "platform": "SLOT", "gameType": "VIDEO", "isActive": true,
///     "betConfig": { "minBetAmount": "0.1", "maxBetAmount": "100", "currency": "USD" }
/// }"#).unwrap();
/// assert_eq!(game.display_name, "Game One");
/// assert!(game.images.is_empty());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique game identifier.
    pub game_code: String,
    /// Internal name.
    pub game_name: String,
    /// Name shown to players.
    pub display_name: String,
    /// Provider platform, forwarded to the launch call.
    pub platform: String,
    /// Game type, forwarded to the launch call.
    pub game_type: String,
    /// Whether the operator currently offers the game.
    pub is_active: bool,
    /// Marketing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Animated demo preview URL.
    #[serde(default)]
    pub demo_gif: Option<String>,
    /// Screenshot URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Return-to-player rate, in percent.
    #[serde(default)]
    pub rtp: Option<f64>,
    /// Betting limits.
    pub bet_config: BetConfig,
    /// Host serving the game frontend.
    #[serde(default)]
    pub frontend_host: Option<String>,
}

impl Game {
    /// Case-insensitive substring match against the name, display name
    /// and description. `needle` must already be lower-cased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.game_name.to_lowercase().contains(needle)
            || self.display_name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Filter `games` by a free-text search term.
///
/// An empty term yields every game. Otherwise a game is kept when its
/// name, display name or description contains the term verbatim, ignoring
/// case; whitespace in the term is matched like any other character. The
/// relative order of `games` is preserved.
pub fn filter_games<'a>(games: &'a [Game], term: &str) -> Vec<&'a Game> {
    if term.is_empty() {
        return games.iter().collect();
    }
    let needle = term.to_lowercase();
    games
        .iter()
        .filter(|game| game.matches_lowercase(&needle))
        .collect()
}

/// Locate a game by its code.
pub fn find_game<'a>(games: &'a [Game], code: &str) -> Result<&'a Game, ModelError> {
    games
        .iter()
        .find(|game| game.game_code == code)
        .ok_or_else(|| ModelError::GameNotFound {
            code: code.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn game(code: &str, display: &str, description: Option<&str>) -> Game {
        Game {
            game_code: code.to_string(),
            game_name: code.to_lowercase(),
            display_name: display.to_string(),
            platform: "SLOT".to_string(),
            game_type: "VIDEO".to_string(),
            is_active: true,
            description: description.map(String::from),
            thumbnail: None,
            demo_gif: None,
            images: Vec::new(),
            rtp: Some(96.5),
            bet_config: BetConfig {
                min_bet_amount: "0.10".to_string(),
                max_bet_amount: "100.00".to_string(),
                currency: "USD".to_string(),
            },
            frontend_host: None,
        }
    }

    fn catalog() -> Vec<Game> {
        vec![
            game("G1", "Game One", Some("Fruit reels")),
            game("DRAGON", "Dragon Gold", None),
            game("G3", "Lucky Sevens", Some("Classic FRUIT machine")),
        ]
    }

    fn codes(games: &[&Game]) -> Vec<String> {
        games.iter().map(|g| g.game_code.clone()).collect()
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let games = catalog();
        assert_eq!(codes(&filter_games(&games, "")), ["G1", "DRAGON", "G3"]);
    }

    #[test]
    fn whitespace_is_part_of_the_term() {
        let games = vec![game("G1", "Game One", None), game("SOLO", "Solo", None)];
        assert_eq!(codes(&filter_games(&games, " ")), ["G1"]);
        assert_eq!(codes(&filter_games(&games, "game o")), ["G1"]);
        assert!(filter_games(&games, " solo").is_empty());
    }

    #[test]
    fn matches_description_case_insensitively() {
        let games = catalog();
        assert_eq!(codes(&filter_games(&games, "fruit")), ["G1", "G3"]);
    }

    #[test]
    fn matches_display_name_and_internal_name() {
        let games = catalog();
        assert_eq!(codes(&filter_games(&games, "GOLD")), ["DRAGON"]);
        assert_eq!(codes(&filter_games(&games, "dragon")), ["DRAGON"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let games = catalog();
        let first = codes(&filter_games(&games, "e"));
        let second = codes(&filter_games(&games, "e"));
        assert_eq!(first, second);
    }

    #[test]
    fn no_match_is_empty() {
        let games = catalog();
        assert!(filter_games(&games, "poker").is_empty());
    }

    #[test]
    fn find_game_by_code() {
        let games = catalog();
        assert_eq!(find_game(&games, "G3").unwrap().display_name, "Lucky Sevens");
        assert_eq!(
            find_game(&games, "NOPE"),
            Err(ModelError::GameNotFound {
                code: "NOPE".into()
            })
        );
    }

    #[test]
    fn deserializes_nullable_fields() {
        let game: Game = serde_json::from_value(serde_json::json!({
            "gameCode": "G1",
            "gameName": "game_one",
            "displayName": "Game One",
            "platform": "SLOT",
            "gameType": "VIDEO",
            "isActive": false,
            "description": null,
            "thumbnail": null,
            "demoGif": null,
            "images": ["a.png", "b.png"],
            "rtp": null,
            "betConfig": { "minBetAmount": "1", "maxBetAmount": "50", "currency": "EUR" },
            "frontendHost": "games.example.com"
        }))
        .unwrap();
        assert!(!game.is_active);
        assert_eq!(game.description, None);
        assert_eq!(game.images.len(), 2);
        assert_eq!(game.rtp, None);
        assert_eq!(game.bet_config.currency, "EUR");
        assert_eq!(game.frontend_host.as_deref(), Some("games.example.com"));
    }
}
