use super::{confirm, open_catalog, parse_id, report};
use crate::config::Config;
use crate::domain::{SeasonId, SeriesId};
use crate::models::SeasonInput;

pub async fn cmd_season_list(config: &Config, series_id_str: &str) -> anyhow::Result<()> {
    let Some(series_id) = parse_id("series", series_id_str) else {
        return Ok(());
    };
    let catalog = open_catalog(config).await?;

    let seasons = match catalog.list_seasons(SeriesId::new(series_id)).await {
        Ok(seasons) => seasons,
        Err(err) => return report(err),
    };

    if seasons.is_empty() {
        println!("No seasons for series {series_id}.");
        return Ok(());
    }

    for season in seasons {
        println!("#{:<3} {} (ID: {})", season.number, season.title, season.id);
    }

    Ok(())
}

pub async fn cmd_season_add(
    config: &Config,
    series_id_str: &str,
    number: i32,
    title: Option<String>,
    description: Option<String>,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let Some(series_id) = parse_id("series", series_id_str) else {
        return Ok(());
    };
    let catalog = open_catalog(config).await?;

    let input = SeasonInput {
        series_id: SeriesId::new(series_id),
        number,
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        release_year: year,
    };

    match catalog.create_season(input).await {
        Ok(season) => {
            println!("✓ Added: {} (ID: {})", season.title, season.id);
            Ok(())
        }
        Err(err) => report(err),
    }
}

pub async fn cmd_season_remove(config: &Config, id_str: &str, yes: bool) -> anyhow::Result<()> {
    let Some(id) = parse_id("season", id_str) else {
        return Ok(());
    };
    let id = SeasonId::new(id);
    let catalog = open_catalog(config).await?;

    let season = match catalog.get_season(id).await {
        Ok(season) => season,
        Err(err) => return report(err),
    };

    let prompt = format!(
        "Remove '{}' (ID: {}) with all of its episodes?",
        season.title, season.id
    );
    if !yes && !confirm(&prompt)? {
        println!("Cancelled.");
        return Ok(());
    }

    match catalog.delete_season(id).await {
        Ok(deleted) => {
            println!("✓ Removed: {} ({} episodes)", season.title, deleted.episodes);
            Ok(())
        }
        Err(err) => report(err),
    }
}
