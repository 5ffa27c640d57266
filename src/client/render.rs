use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::models::{ContentRecord, WatchHistoryRecord};

use super::{api::CatalogClient, carousel::Carousel};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const POSTER_FALLBACK: &str = "https://placehold.co/192x288/4B0082/FFF?text=Image+Error";
const GENRE_FALLBACK: &str = "Content";

pub const LOAD_ERROR_MESSAGE: &str = "Error loading content. Please try again.";
pub const EMPTY_HISTORY_MESSAGE: &str =
    "No content in your Continue Watching list yet. Start watching something!";

/// Share of `total_seconds` already watched, in percent
///
/// Anything that is not a finite number (e.g. a zero total) renders as 0.
pub fn progress_percentage(progress_seconds: i64, total_seconds: i64) -> f64 {
    let ratio = progress_seconds as f64 / total_seconds as f64 * 100.0;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Full home page: hero carousel, catalog grid and continue-watching rail
pub async fn render_home_page(client: &CatalogClient, user_id: &str, carousel: &Carousel) -> String {
    let catalog = render_content_grid(client).await;
    let rail = render_continue_watching(client, user_id).await;

    page(
        "Catalog",
        html! {
            main class="min-h-screen bg-gray-900 text-white" {
                (hero(carousel))
                section class="px-6 py-8" {
                    h2 class="text-2xl font-bold mb-4" { "Continue Watching" }
                    div id="continue-watching-container" class="flex gap-4 overflow-x-auto" { (rail) }
                }
                section class="px-6 py-8" {
                    h2 class="text-2xl font-bold mb-4" { "Browse" }
                    div id="initial-content-container" class="flex flex-wrap gap-4" { (catalog) }
                }
            }
        },
    )
}

/// Catalog grid region; a failed fetch replaces the whole region
pub async fn render_content_grid(client: &CatalogClient) -> Markup {
    match client.list_content().await {
        Ok(content) => html! {
            @for record in &content {
                (content_card(record))
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Error fetching all content");
            load_error()
        }
    }
}

/// Continue-watching region for `user_id`
///
/// Each history entry costs one content lookup, issued in order. Entries
/// whose lookup fails or finds nothing are skipped; only a failed history
/// fetch replaces the region with the error message.
pub async fn render_continue_watching(client: &CatalogClient, user_id: &str) -> Markup {
    let history = match client.continue_watching(user_id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Error fetching watch history");
            return load_error();
        }
    };

    if history.is_empty() {
        return html! { p class="text-gray-400" { (EMPTY_HISTORY_MESSAGE) } };
    }

    let mut cards = Vec::with_capacity(history.len());
    for entry in &history {
        match client.get_content(&entry.content_id).await {
            Ok(Some(record)) => cards.push(continue_watching_card(&record, entry)),
            Ok(None) => {
                tracing::warn!(content_id = %entry.content_id, "Content details not found");
            }
            Err(e) => {
                tracing::warn!(content_id = %entry.content_id, error = %e, "Content lookup failed");
            }
        }
    }

    html! {
        @for card in cards {
            (card)
        }
    }
}

pub fn content_card(record: &ContentRecord) -> Markup {
    html! {
        div class="flex-none w-40 md:w-48 bg-gray-800 rounded-lg shadow-md overflow-hidden cursor-pointer" onclick=(open_video(record)) {
            (poster(record))
            div class="p-3" {
                h3 class="text-sm font-semibold truncate" { (card_label(record)) }
            }
        }
    }
}

pub fn continue_watching_card(record: &ContentRecord, entry: &WatchHistoryRecord) -> Markup {
    let percentage = progress_percentage(entry.progress_seconds, entry.total_seconds);

    html! {
        div class="flex-none w-40 md:w-48 bg-gray-800 rounded-lg shadow-md overflow-hidden cursor-pointer" onclick=(open_video(record)) {
            (poster(record))
            div class="p-3" {
                h3 class="text-sm font-semibold truncate" { (card_label(record)) }
                div class="w-full bg-gray-700 rounded-full h-1 mt-2" {
                    div class="bg-green-500 h-1 rounded-full" style={ "width: " (percentage) "%;" } {}
                }
            }
        }
    }
}

/// Hero image plus the data needed to keep cycling it in the browser
pub fn hero(carousel: &Carousel) -> Markup {
    let images = serde_json::to_string(carousel.images()).unwrap_or_else(|_| "[]".to_string());
    let interval_ms = carousel.interval().as_millis() as u64;

    html! {
        section class="relative h-96 overflow-hidden" {
            @if let Some(src) = carousel.current() {
                img id="hero-carousel-image" class="w-full h-full object-cover" src=(src) alt="Featured"
                    data-images=(images) data-interval-ms=(interval_ms);
            }
        }
        script {
            (PreEscaped(HERO_SCRIPT))
        }
    }
}

const HERO_SCRIPT: &str = r#"(() => {
  const img = document.getElementById('hero-carousel-image');
  if (!img) return;
  const images = JSON.parse(img.dataset.images || '[]');
  let index = 0;
  setInterval(() => {
    if (images.length === 0) return;
    index = (index + 1) % images.length;
    img.src = images[index];
  }, Number(img.dataset.intervalMs));
})();"#;

fn card_label(record: &ContentRecord) -> String {
    format!(
        "{} ({})",
        record.title,
        record.primary_genre().unwrap_or(GENRE_FALLBACK)
    )
}

fn open_video(record: &ContentRecord) -> String {
    let url = if record.video_url.is_empty() {
        "#"
    } else {
        record.video_url.as_str()
    };
    format!("window.open('{}', '_blank')", url)
}

fn poster(record: &ContentRecord) -> Markup {
    html! {
        img src=(record.image_url) alt={ (record.title) " Poster" }
            class="w-full h-auto object-cover rounded-t-lg"
            onerror=(format!("this.onerror=null;this.src='{}';", POSTER_FALLBACK));
    }
}

fn load_error() -> Markup {
    html! { p class="text-red-400" { (LOAD_ERROR_MESSAGE) } }
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;
    use chrono::Utc;

    fn record(genre: &[&str], video_url: &str) -> ContentRecord {
        ContentRecord {
            content_id: "the-boys-series".to_string(),
            title: "The Boys".to_string(),
            content_type: ContentType::Series,
            genre: genre.iter().map(|g| g.to_string()).collect(),
            image_url: "https://example.com/boys.jpg".to_string(),
            description: "A dark, satirical superhero series.".to_string(),
            language: vec!["English".to_string()],
            release_year: 2019,
            video_url: video_url.to_string(),
        }
    }

    fn entry(progress_seconds: i64, total_seconds: i64) -> WatchHistoryRecord {
        WatchHistoryRecord {
            id: 1,
            user_id: "demo_user_1".to_string(),
            content_id: "the-boys-series".to_string(),
            progress_seconds,
            total_seconds,
            last_watched_timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(1500, 2400), 62.5);
        assert_eq!(progress_percentage(0, 2400), 0.0);
        assert_eq!(progress_percentage(3000, 2400), 125.0);
    }

    #[test]
    fn test_progress_percentage_not_a_number_is_zero() {
        assert_eq!(progress_percentage(0, 0), 0.0);
        assert_eq!(progress_percentage(10, 0), 0.0);
        assert_eq!(progress_percentage(-10, 0), 0.0);
    }

    #[test]
    fn test_card_label_falls_back_without_genre() {
        assert_eq!(card_label(&record(&["Action"], "")), "The Boys (Action)");
        assert_eq!(card_label(&record(&[], "")), "The Boys (Content)");
    }

    #[test]
    fn test_open_video_falls_back_to_placeholder() {
        assert_eq!(
            open_video(&record(&["Action"], "https://example.com/v")),
            "window.open('https://example.com/v', '_blank')"
        );
        assert_eq!(open_video(&record(&["Action"], "")), "window.open('#', '_blank')");
    }

    #[test]
    fn test_content_card_links_video() {
        let html = content_card(&record(&["Action"], "https://example.com/v")).into_string();
        assert!(html.contains("https://example.com/v"));
        assert!(html.contains("The Boys (Action)"));
        assert!(html.contains(POSTER_FALLBACK));
    }

    #[test]
    fn test_continue_watching_card_progress_width() {
        let html = continue_watching_card(&record(&["Action"], ""), &entry(1500, 2400)).into_string();
        assert!(html.contains("width: 62.5%;"));

        let html = continue_watching_card(&record(&["Action"], ""), &entry(0, 0)).into_string();
        assert!(html.contains("width: 0%;"));
    }

    #[test]
    fn test_card_escapes_title() {
        let mut tricky = record(&["Drama"], "");
        tricky.title = "<script>alert(1)</script>".to_string();

        let html = content_card(&tricky).into_string();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_hero_renders_current_image() {
        let carousel = Carousel::default();
        let html = hero(&carousel).into_string();

        assert!(html.contains("id=\"hero-carousel-image\""));
        assert!(html.contains("data-interval-ms=\"5000\""));
        assert!(html.contains(carousel.current().unwrap()));
    }
}
