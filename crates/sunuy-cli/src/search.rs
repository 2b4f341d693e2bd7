use std::fmt::Write as _;
use std::sync::Arc;

use sunuy_core::{AppConfig, ArtisanRecord, FilterCriteria, StaticDirectory};
use sunuy_directory::{DirectorySession, SimulatedBackend};

/// Run one search and reveal up to `pages` pages of results.
///
/// Uses the configured search and show-more delays, so the output appears
/// with the same pacing as the web listing.
///
/// # Errors
///
/// Returns an error if the search backend reports a failure.
pub(crate) async fn run_search(
    directory: StaticDirectory,
    config: &AppConfig,
    criteria: FilterCriteria,
    pages: u32,
) -> anyhow::Result<()> {
    let backend = SimulatedBackend::new(Arc::new(directory), config.search_delay());
    let session = DirectorySession::new(backend, config.page_size, config.show_more_delay());
    session.set_criteria(criteria).await;
    let mut state = session.settled().await;
    if let Some(error) = state.last_error.take() {
        anyhow::bail!("search failed: {error}");
    }

    for _ in 1..pages.max(1) {
        if !session.show_more().await {
            break;
        }
    }
    let state = session.snapshot();
    tracing::debug!(
        total = state.window.total(),
        visible = state.window.visible(),
        "search settled"
    );

    if state.results.is_empty() {
        println!("no artisans match these filters");
        return Ok(());
    }

    print!("{}", render_table(state.visible_artisans()));
    let window = state.window;
    if window.has_more() {
        println!(
            "showing {} of {}; pass --pages {} to see more",
            window.visible(),
            window.total(),
            window.visible() / window.page_size() + 1
        );
    } else {
        println!("all {} artisans shown", window.total());
    }
    Ok(())
}

pub(crate) fn render_table(artisans: &[ArtisanRecord]) -> String {
    let mut out = format!(
        "{:<5}{:<26}{:<22}{:<8}LOCATION\n",
        "ID", "NAME", "PROFESSION", "RATING"
    );
    for artisan in artisans {
        let badge = if artisan.agreed { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:<5}{:<26}{:<22}{:<8.1}{}",
            artisan.id,
            format!("{}{badge}", artisan.name),
            artisan.profession.as_str(),
            artisan.rating,
            artisan.display_location()
        );
    }
    out
}
