use anyhow::Context;

use quickquack::constants::VERSION;
use quickquack::{demo, format, storage, Config, Leaderboard};

/// Loads the season from the configured database file, or generates
/// a season if that file does not exist yet. Prints every map's records
/// and the season ranking, and writes the season back to the file.
fn main() -> anyhow::Result<()> {
    // Read environment variables from an '.env' file in the working directory.
    // We use these env vars:
    //  - RUST_LOG
    //  - QUICKQUACK_CONFIG
    let using_env_file = dotenv::dotenv().is_ok();

    env_logger::init(); // Use log::* to write to stderr

    if using_env_file {
        log::info!("using .env file")
    }
    log::debug!("using quickquack version '{}'", VERSION.to_string());

    let config = Config::read_from_env()?;
    let db_file = config.database_file();

    let lb = if db_file.is_file() {
        let season = storage::load(&db_file)?;
        Leaderboard::restore(season, config.scoring.clone())
    } else {
        log::info!("{:?} does not exist: generating a season", db_file);
        let mut lb = Leaderboard::new(config.scoring.clone());
        demo::populate(&mut lb, &config.demo)?;
        lb
    };

    for map_id in lb.map_ids() {
        println!("{}", format::time_table(&lb, map_id));
    }
    println!("{}", format::season_table(&lb));

    storage::dump(&db_file, lb.snapshot()).context("failed to save season")?;
    Ok(())
}
