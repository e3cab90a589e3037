//! Canned catalog and identities served by the mock.

use gamedeck_models::{BetConfig, Game, Identity};

use crate::config::MockConfig;

/// Suffix marking an identity whose wallet is empty.
pub const BROKE_SUFFIX: &str = "-broke";

fn game(code: &str, name: &str, display: &str, description: Option<&str>) -> Game {
    Game {
        game_code: code.to_string(),
        game_name: name.to_string(),
        display_name: display.to_string(),
        platform: "MOCK".to_string(),
        game_type: "SLOT".to_string(),
        is_active: true,
        description: description.map(String::from),
        thumbnail: Some(format!("https://cdn.example.com/{code}/thumb.png")),
        demo_gif: Some(format!("https://cdn.example.com/{code}/demo.gif")),
        images: (1..=3)
            .map(|i| format!("https://cdn.example.com/{code}/shot-{i}.png"))
            .collect(),
        rtp: Some(96.0),
        bet_config: BetConfig {
            min_bet_amount: "0.10".to_string(),
            max_bet_amount: "100.00".to_string(),
            currency: "USD".to_string(),
        },
        frontend_host: None,
    }
}

/// The fixed catalog, in display order. `MOCK-004` is inactive.
pub fn games() -> Vec<Game> {
    let mut dragon = game(
        "MOCK-002",
        "dragon_hoard",
        "Dragon Hoard",
        Some("Chase the dragon's gold across five reels."),
    );
    dragon.frontend_host = Some("dragon.example.com".to_string());
    dragon.rtp = Some(95.2);

    let mut retired = game("MOCK-004", "old_timer", "Old Timer", None);
    retired.is_active = false;
    retired.rtp = None;

    vec![
        game(
            "MOCK-001",
            "fruit_frenzy",
            "Fruit Frenzy",
            Some("Classic fruit machine with sticky wilds."),
        ),
        dragon,
        game("MOCK-003", "lucky_sevens", "Lucky Sevens", None),
        retired,
    ]
}

/// The primary identity plus `config.sub_accounts` sub-accounts.
///
/// The last sub-account, when there is more than one, has an empty wallet.
pub fn identities(config: &MockConfig) -> Vec<Identity> {
    let mut ids = vec![Identity::new("player-001", &config.agent_id, "cert-player-001")];
    for i in 1..=config.sub_accounts {
        let user_id = if config.sub_accounts > 1 && i == config.sub_accounts {
            format!("sub-{i:03}{BROKE_SUFFIX}")
        } else {
            format!("sub-{i:03}")
        };
        let cert = format!("cert-{user_id}");
        ids.push(Identity::new(user_id, &config.agent_id, cert));
    }
    ids
}
