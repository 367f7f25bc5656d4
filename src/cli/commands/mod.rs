mod episode;
mod season;
mod series;

pub use episode::{cmd_episode_add, cmd_episode_list, cmd_episode_remove, cmd_episode_show};
pub use season::{cmd_season_add, cmd_season_list, cmd_season_remove};
pub use series::{cmd_series_add, cmd_series_list, cmd_series_remove, cmd_series_show};

use std::sync::Arc;

use crate::config::Config;
use crate::services::{CatalogError, CatalogService};
use crate::state::SharedState;

async fn open_catalog(config: &Config) -> anyhow::Result<Arc<dyn CatalogService>> {
    let state = SharedState::new(config.clone()).await?;
    Ok(state.catalog)
}

fn parse_id(kind: &str, id_str: &str) -> Option<i32> {
    match id_str.parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            println!("Invalid {kind} ID: {id_str}");
            None
        }
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    println!("{prompt}");
    println!("Enter 'y' to confirm, anything else to cancel:");

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn join_words(parts: &[String]) -> String {
    parts.join(" ").trim().to_string()
}

/// Prints errors the user can fix and passes the rest up.
fn report(err: CatalogError) -> anyhow::Result<()> {
    match err {
        CatalogError::NotFound { .. } | CatalogError::Conflict(_) | CatalogError::Validation(_) => {
            println!("✗ {err}");
            Ok(())
        }
        other => Err(other.into()),
    }
}
