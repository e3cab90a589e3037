//! One-shot subcommands: each fetches what it needs, prints, and exits.

use std::fmt::Write as _;

use anyhow::{bail, Context};
use gamedeck_sdk::detail::drive;
use gamedeck_sdk::{Catalog, CatalogPhase, CredentialStore, DetailFlow, DetailPhase, GameApi};
use tracing::info;

/// Fetch the dashboard once and return the populated catalog and store.
async fn load<A: GameApi>(api: &A) -> anyhow::Result<(Catalog, CredentialStore)> {
    let mut catalog = Catalog::new();
    let mut store = CredentialStore::new();
    let token = catalog.begin_fetch();
    catalog.on_dashboard(token, api.dashboard().await, &mut store);
    if let CatalogPhase::Failed(message) = catalog.phase() {
        bail!("failed to load games: {message}");
    }
    Ok((catalog, store))
}

/// Render the catalog filtered by `search`, as a table or as JSON.
pub async fn list_games<A: GameApi>(
    api: &A,
    search: Option<&str>,
    json: bool,
) -> anyhow::Result<String> {
    let (mut catalog, _) = load(api).await?;
    catalog.set_search(search.unwrap_or_default());
    let games = catalog.visible();

    if json {
        return serde_json::to_string_pretty(&games).context("failed to encode games");
    }
    if games.is_empty() {
        return Ok(if catalog.games().is_empty() {
            "No games available".to_string()
        } else {
            format!("No games match \"{}\"", catalog.search().trim())
        });
    }

    let mut out = String::new();
    for game in games {
        let rtp = game.rtp.map(|r| format!("{r:.2}%")).unwrap_or_default();
        let status = if game.is_active { "" } else { " (inactive)" };
        writeln!(
            out,
            "{:<12} {:<28} {:>7}  {}-{} {}{status}",
            game.game_code,
            game.display_name,
            rtp,
            game.bet_config.min_bet_amount,
            game.bet_config.max_bet_amount,
            game.bet_config.currency,
        )?;
    }
    Ok(out.trim_end().to_string())
}

/// Launch `game_code` and return the playable URL.
///
/// With `user_id`, that identity is selected before launching; otherwise the
/// dashboard's primary identity is used.
pub async fn launch_game<A: GameApi>(
    api: &A,
    game_code: &str,
    user_id: Option<&str>,
) -> anyhow::Result<String> {
    let (_, mut store) = load(api).await?;
    if let Some(user_id) = user_id {
        store.select(user_id)?;
    }

    let (mut flow, effect) = DetailFlow::enter(game_code);
    if let Some(effect) = effect {
        drive(api, &mut flow, &store, effect).await;
    }

    match (flow.phase(), flow.url()) {
        (DetailPhase::Launched, Some(url)) => {
            info!(game_code = %flow.game_code(), "launch url ready");
            Ok(url.to_string())
        }
        (phase, _) => bail!(
            "{}",
            flow.error().map_or_else(|| phase.to_string(), String::from)
        ),
    }
}
