use chrono::{DateTime, Utc};

use crate::{
    db::CatalogStore,
    error::StoreResult,
    models::{ContentRecord, ContentType, WatchProgress},
};

/// User the demo watch history belongs to
pub const DEMO_USER_ID: &str = "demo_user_1";

/// What the startup seed actually inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub content_inserted: usize,
    pub watch_history_inserted: usize,
}

/// Populates empty collections with the demo catalog and history
///
/// Each collection is checked on its own, so a store that already has content
/// but no history still gets the demo history. Count-then-insert is not
/// atomic; two instances starting at once against an empty store may both
/// insert.
pub async fn seed_if_empty(store: &dyn CatalogStore) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    if store.count_content().await? == 0 {
        tracing::info!(store = store.name(), "Populating initial content");
        let content = initial_content();
        store.insert_content(&content).await?;
        report.content_inserted = content.len();
    }

    if store.count_watch_history().await? == 0 {
        tracing::info!(store = store.name(), user_id = DEMO_USER_ID, "Populating initial watch history");
        let history = initial_watch_history(Utc::now());
        for entry in &history {
            store.upsert_watch_progress(entry).await?;
        }
        report.watch_history_inserted = history.len();
    }

    Ok(report)
}

/// The fixed demo catalog, in display order
pub fn initial_content() -> Vec<ContentRecord> {
    vec![
        content(
            "the-boys-series",
            "The Boys",
            ContentType::Series,
            &["Superhero Satire", "Action", "Comedy"],
            "https://oyster.ignimgs.com/wordpress/stg.ign.com/2020/08/Homelander-Clean.jpg",
            "A dark, satirical superhero series.",
            &["English"],
            2019,
            "https://www.youtube.com/watch?v=5D_fU0s1468",
        ),
        content(
            "reacher-series",
            "Reacher",
            ContentType::Series,
            &["Action", "Thriller"],
            "https://resizing.flixster.com/Q4ZEIAczaoZAaxivmrwDE_Inxco=/ems.cHJkLWVtcy1hc3NldHMvdHZzZWFzb24vMWQ3Zjk0ZDAtZDcyNC00YjI2LThlZTMtYmJkMTFkMzZiNWFkLmpwZw==",
            "An action-crime series based on Lee Child's novels.",
            &["English"],
            2022,
            "https://www.youtube.com/watch?v=GSb0bixhE1M",
        ),
        content(
            "rings-of-power-series",
            "Rings of Power",
            ContentType::Series,
            &["Fantasy", "Adventure"],
            "https://bazaarvietnam.vn/wp-content/uploads/2022/09/harper-bazaar-review-the-lord-of-the-rings-the-rings-of-power-2-e1662283735938.png",
            "A grand fantasy epic set in Middle-earth.",
            &["English"],
            2022,
            "https://www.youtube.com/watch?v=x8UFIl7R0mQ",
        ),
        content(
            "summer-i-turned-pretty",
            "Summer I Turned Pretty",
            ContentType::Series,
            &["Romantic Drama", "Coming-of-age"],
            "https://cdn.seat42f.com/wp-content/uploads/2023/07/02200337/The-Summer-I-Turned-Pretty-Season-2-Poster-Key-Art.jpg",
            "A popular young adult romantic drama.",
            &["English"],
            2022,
            "https://www.youtube.com/watch?v=F0SjGfJd9gA",
        ),
        content(
            "spider-man-far-from-home",
            "Spider-Man: Far From Home",
            ContentType::Movie,
            &["Superhero", "Action", "Sci-Fi"],
            "https://www.sonypictures.co.uk/sites/unitedkingdom/files/2021-09/DP_4710017_TC_1400x2100_DP_4710018_SpiderManFarFromHome_2019_ITUNES_2000x3000_UK_1333x2000_thumbnail.jpg",
            "A fun and action-packed Spider-Man movie.",
            &["English", "Tamil"],
            2019,
            "https://www.youtube.com/watch?v=DYYt6q24t2s",
        ),
        content(
            "interstellar-movie",
            "Interstellar",
            ContentType::Movie,
            &["Sci-Fi", "Drama"],
            "https://i.pinimg.com/originals/8e/0d/ab/8e0dab8699be85720ce55845065bf6dc.jpg",
            "Christopher Nolan's acclaimed sci-fi epic.",
            &["English", "Tamil"],
            2014,
            "https://www.youtube.com/watch?v=zSWdZVtXT7E",
        ),
        content(
            "the-dark-knight-movie",
            "The Dark Knight",
            ContentType::Movie,
            &["Action", "Crime", "Thriller"],
            "https://m.media-amazon.com/images/I/91KkWf50SoL._AC_SL1500_.jpg",
            "The critically acclaimed Batman film.",
            &["English", "Tamil"],
            2008,
            "https://www.youtube.com/watch?v=EXeK8d58r7g",
        ),
    ]
}

/// Demo history for [`DEMO_USER_ID`], all stamped with `now`
pub fn initial_watch_history(now: DateTime<Utc>) -> Vec<WatchProgress> {
    [
        ("the-boys-series", 1500, 2400),
        ("interstellar-movie", 3600, 10620),
        ("reacher-series", 1200, 2700),
    ]
    .into_iter()
    .map(|(content_id, progress_seconds, total_seconds)| WatchProgress {
        user_id: DEMO_USER_ID.to_string(),
        content_id: content_id.to_string(),
        progress_seconds,
        total_seconds,
        watched_at: now,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn content(
    content_id: &str,
    title: &str,
    content_type: ContentType,
    genre: &[&str],
    image_url: &str,
    description: &str,
    language: &[&str],
    release_year: i32,
    video_url: &str,
) -> ContentRecord {
    ContentRecord {
        content_id: content_id.to_string(),
        title: title.to_string(),
        content_type,
        genre: genre.iter().map(|g| g.to_string()).collect(),
        image_url: image_url.to_string(),
        description: description.to_string(),
        language: language.iter().map(|l| l.to_string()).collect(),
        release_year,
        video_url: video_url.to_string(),
    }
}
