use anyhow::Context;
use std::path::Path;

use super::{confirm, join_words, open_catalog, parse_id, report};
use crate::config::Config;
use crate::domain::{EpisodeId, SeasonId};
use crate::models::{EpisodeInput, Upload};

pub async fn cmd_episode_list(config: &Config, season_id_str: &str) -> anyhow::Result<()> {
    let Some(season_id) = parse_id("season", season_id_str) else {
        return Ok(());
    };
    let catalog = open_catalog(config).await?;

    let episodes = match catalog.list_episodes(SeasonId::new(season_id)).await {
        Ok(episodes) => episodes,
        Err(err) => return report(err),
    };

    if episodes.is_empty() {
        println!("No episodes for season {season_id}.");
        return Ok(());
    }

    for episode in episodes {
        let duration = episode
            .duration()
            .map_or_else(String::new, |d| format!(" [{}m]", d.as_secs() / 60));
        println!(
            "E{:02} {}{} (ID: {}, slug: {})",
            episode.number, episode.title, duration, episode.id, episode.slug
        );
    }

    Ok(())
}

pub async fn cmd_episode_show(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = parse_id("episode", id_str) else {
        return Ok(());
    };
    let catalog = open_catalog(config).await?;

    let detail = match catalog.get_episode(EpisodeId::new(id)).await {
        Ok(detail) => detail,
        Err(err) => return report(err),
    };

    println!("{detail}");
    println!("{:-<70}", "");
    println!("ID:     {}", detail.episode.id);
    println!("Series: {} (ID: {})", detail.series().title, detail.series().id);
    println!("Season: {} (ID: {})", detail.season.title, detail.season.id);
    println!("URL:    {}", detail.url());
    println!(
        "Video:  {}",
        config.media_root().join(&detail.episode.video).display()
    );
    if !detail.episode.description.is_empty() {
        println!();
        println!("{}", detail.episode.description);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_episode_add(
    config: &Config,
    season_id_str: &str,
    number: i32,
    title: &[String],
    video: &Path,
    slug: Option<String>,
    description: Option<String>,
    duration: Option<i64>,
) -> anyhow::Result<()> {
    let Some(season_id) = parse_id("season", season_id_str) else {
        return Ok(());
    };

    let size = tokio::fs::metadata(video)
        .await
        .with_context(|| format!("Failed to read video file {}", video.display()))?
        .len();
    let filename = video
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let catalog = open_catalog(config).await?;

    let input = EpisodeInput {
        season_id: SeasonId::new(season_id),
        title: join_words(title),
        slug: slug.unwrap_or_default(),
        number,
        description: description.unwrap_or_default(),
        duration_secs: duration,
    };

    let upload = Upload::local(filename, video.to_path_buf(), size);
    match catalog.create_episode(input, upload).await {
        Ok(detail) => {
            println!("✓ Added: {detail}");
            println!("  ID: {} | URL: {}", detail.episode.id, detail.url());
            println!("  Video stored at {}", detail.episode.video);
            Ok(())
        }
        Err(err) => report(err),
    }
}

pub async fn cmd_episode_remove(config: &Config, id_str: &str, yes: bool) -> anyhow::Result<()> {
    let Some(id) = parse_id("episode", id_str) else {
        return Ok(());
    };
    let id = EpisodeId::new(id);
    let catalog = open_catalog(config).await?;

    let detail = match catalog.get_episode(id).await {
        Ok(detail) => detail,
        Err(err) => return report(err),
    };

    if !yes && !confirm(&format!("Remove '{detail}'?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    match catalog.delete_episode(id).await {
        Ok(()) => {
            println!("✓ Removed: {detail}");
            println!("  The video file at {} was kept.", detail.episode.video);
            Ok(())
        }
        Err(err) => report(err),
    }
}
