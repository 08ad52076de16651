use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::DemoConfig;
use crate::leaderboard::Leaderboard;
use crate::scoring::round_score;

/// Fill a season with generated maps, players and records.
///
/// Adds maps `Map1..=MapN` and players `Player1..=PlayerN`. Every player
/// has a record on every map by the configured chance. The same seed
/// always generates the same season.
///
/// # Errors
/// Returns an error if the config does not pass `DemoConfig::check`.
/// The season remains unchanged.
pub fn populate(lb: &mut Leaderboard, config: &DemoConfig) -> anyhow::Result<()> {
    config.check()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let map_ids: Vec<String> = (1..=config.nb_maps).map(|i| format!("Map{}", i)).collect();
    let player_ids: Vec<String> = (1..=config.nb_players)
        .map(|i| format!("Player{}", i))
        .collect();

    for map_id in map_ids.iter() {
        lb.create_map(map_id);
    }
    for player_id in player_ids.iter() {
        lb.create_player(player_id);
    }

    let mut nb_records = 0;
    for map_id in map_ids.iter() {
        for player_id in player_ids.iter() {
            if !rng.gen_bool(config.participation_chance) {
                continue;
            }
            let time = round_score(rng.gen_range(config.min_time..config.max_time));
            match lb.submit(map_id, player_id, time) {
                Ok(outcome) if outcome.is_accepted() => nb_records += 1,
                Ok(_) => {}
                Err(err) => log::warn!("failed to add generated record: {}", err),
            }
        }
    }
    log::info!(
        "generated {} maps, {} players, {} records",
        map_ids.len(),
        player_ids.len(),
        nb_records
    );
    Ok(())
}
