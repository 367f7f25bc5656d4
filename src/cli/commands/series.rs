//! Series command handlers

use super::{confirm, join_words, open_catalog, parse_id, report};
use crate::config::Config;
use crate::domain::SeriesId;
use crate::models::{SeriesFilter, SeriesInput};

pub async fn cmd_series_list(
    config: &Config,
    search: Option<String>,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let catalog = open_catalog(config).await?;
    let filter = SeriesFilter {
        search,
        release_year: year,
        limit: None,
    };
    let series_list = catalog.list_series(filter).await?;

    if series_list.is_empty() {
        println!("No series in the catalog.");
        println!();
        println!("Add one with: series-catalog series add \"Title\"");
        return Ok(());
    }

    println!("Series ({} total)", series_list.len());
    println!("{:-<70}", "");

    for series in series_list {
        let year = series
            .release_year
            .map_or_else(|| "?".to_string(), |y| y.to_string());
        println!("• {} ({})", series.title, year);
        println!("  ID: {} | Slug: {}", series.id, series.slug);
    }

    Ok(())
}

/// Accepts either a numeric ID or a slug.
pub async fn cmd_series_show(config: &Config, key: &str) -> anyhow::Result<()> {
    let catalog = open_catalog(config).await?;

    let found = match key.parse::<i32>() {
        Ok(id) => catalog.get_series(SeriesId::new(id)).await,
        Err(_) => catalog.get_series_by_slug(key).await,
    };
    let series = match found {
        Ok(series) => series,
        Err(err) => return report(err),
    };

    println!("{}", series.title);
    println!("{:-<70}", "");
    println!("ID:       {}", series.id);
    println!("Slug:     {}", series.slug);
    if let Some(year) = series.release_year {
        println!("Released: {year}");
    }
    if let Some(cover) = &series.cover_image {
        println!("Cover:    {cover}");
    }
    if !series.description.is_empty() {
        println!();
        println!("{}", series.description);
    }

    let seasons = catalog.list_seasons(series.id).await?;
    println!();
    if seasons.is_empty() {
        println!("No seasons yet.");
    } else {
        println!("Seasons:");
        for season in seasons {
            println!("  [{}] {} (#{})", season.id, season.title, season.number);
        }
    }

    Ok(())
}

pub async fn cmd_series_add(
    config: &Config,
    title: &[String],
    slug: Option<String>,
    description: Option<String>,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let catalog = open_catalog(config).await?;

    let input = SeriesInput {
        title: join_words(title),
        slug: slug.unwrap_or_default(),
        description: description.unwrap_or_default(),
        release_year: year,
    };

    match catalog.create_series(input).await {
        Ok(series) => {
            println!("✓ Added: {} (ID: {}, slug: {})", series.title, series.id, series.slug);
            Ok(())
        }
        Err(err) => report(err),
    }
}

pub async fn cmd_series_remove(config: &Config, id_str: &str, yes: bool) -> anyhow::Result<()> {
    let Some(id) = parse_id("series", id_str) else {
        println!("Use 'series-catalog series list' to see series IDs.");
        return Ok(());
    };
    let id = SeriesId::new(id);
    let catalog = open_catalog(config).await?;

    let series = match catalog.get_series(id).await {
        Ok(series) => series,
        Err(err) => return report(err),
    };

    let prompt = format!(
        "Remove '{}' (ID: {}) with all of its seasons and episodes?",
        series.title, series.id
    );
    if !yes && !confirm(&prompt)? {
        println!("Cancelled.");
        return Ok(());
    }

    match catalog.delete_series(id).await {
        Ok(deleted) => {
            println!(
                "✓ Removed: {} ({} seasons, {} episodes)",
                series.title, deleted.seasons, deleted.episodes
            );
            Ok(())
        }
        Err(err) => report(err),
    }
}
