use std::path::Path;

use chrono::NaiveDate;
use sunuy_core::forms::{
    AuthRequest, FormKind, LoginForm, MarketProposal, MarketType, SubmitStatus,
};
use sunuy_core::{DirectoryProvider, StaticDirectory};

use super::*;
use crate::backend::SimulatedBackend;
use crate::submit::{SimulatedAuthenticator, SimulatedSubmitter};

const SEARCH_DELAY: Duration = Duration::from_millis(300);
const SHOW_MORE_DELAY: Duration = Duration::from_millis(1500);

fn seed_directory() -> Arc<StaticDirectory> {
    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
    let directory = StaticDirectory::load(
        &config.join("artisans.yaml"),
        &config.join("locations.yaml"),
    )
    .expect("seed data should load");
    Arc::new(directory)
}

async fn seeded_session() -> DirectorySession<SimulatedBackend<StaticDirectory>> {
    let backend = SimulatedBackend::new(seed_directory(), SEARCH_DELAY);
    DirectorySession::open(backend, 8, SHOW_MORE_DELAY).await
}

fn ids(records: &[ArtisanRecord]) -> Vec<&str> {
    records.iter().map(|a| a.id.as_str()).collect()
}

/// Slow for searches mentioning "slow", fast otherwise.
struct StaggeredBackend {
    inner: SimulatedBackend<StaticDirectory>,
}

impl SearchBackend for StaggeredBackend {
    async fn search(&self, criteria: FilterCriteria) -> Result<Vec<ArtisanRecord>, DirectoryError> {
        let delay = if criteria.search().contains("slow") {
            Duration::from_millis(500)
        } else {
            Duration::from_millis(100)
        };
        tokio::time::sleep(delay).await;
        if criteria.search().contains("slow") {
            return Ok(self.inner.provider().artisans().to_vec());
        }
        self.inner.search(criteria).await
    }
}

/// Serves the full catalog for empty criteria and fails any filtered search.
struct FailingBackend {
    directory: Arc<StaticDirectory>,
}

impl SearchBackend for FailingBackend {
    async fn search(&self, criteria: FilterCriteria) -> Result<Vec<ArtisanRecord>, DirectoryError> {
        if criteria.is_empty() {
            Ok(self.directory.artisans().to_vec())
        } else {
            Err(DirectoryError::Backend("connection reset".to_string()))
        }
    }
}

#[tokio::test(start_paused = true)]
async fn open_shows_first_page_after_search_delay() {
    let session = seeded_session().await;
    assert!(session.snapshot().is_loading());

    let state = session.settled().await;
    assert_eq!(state.phase, SessionPhase::Idle);
    assert_eq!(state.result_count(), 19);
    assert_eq!(state.visible_artisans().len(), 8);
    assert!(state.window.has_more());
}

#[tokio::test(start_paused = true)]
async fn show_more_grows_eight_sixteen_nineteen() {
    let session = seeded_session().await;
    session.settled().await;

    assert!(session.show_more().await);
    assert_eq!(session.snapshot().window.visible(), 16);
    assert!(session.show_more().await);
    assert_eq!(session.snapshot().window.visible(), 19);
    assert!(session.snapshot().window.is_exhausted());

    assert!(!session.show_more().await);
    assert_eq!(session.snapshot().window.visible(), 19);
}

#[tokio::test(start_paused = true)]
async fn show_more_waits_for_its_delay() {
    let session = seeded_session().await;
    session.settled().await;
    let started = tokio::time::Instant::now();
    session.show_more().await;
    assert!(started.elapsed() >= SHOW_MORE_DELAY);
}

#[tokio::test(start_paused = true)]
async fn show_more_is_ignored_while_searching() {
    let session = seeded_session().await;
    assert!(!session.show_more().await);
    let state = session.settled().await;
    assert_eq!(state.window.visible(), 8);
}

#[tokio::test(start_paused = true)]
async fn filters_narrow_results() {
    let session = seeded_session().await;
    session.settled().await;

    session
        .update_criteria(|c| c.set_search("dakar"))
        .await;
    let state = session.settled().await;
    assert_eq!(ids(&state.results), ["1", "7", "18"]);
    assert!(state.window.is_exhausted());

    session
        .set_criteria(FilterCriteria::new("", "Maçon", "", ""))
        .await;
    let state = session.settled().await;
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].name, "Fatou Sow");
}

#[tokio::test(start_paused = true)]
async fn newer_search_supersedes_pending_one() {
    let session = seeded_session().await;
    session.settled().await;

    session
        .set_criteria(FilterCriteria::new("", "", "Dakar", ""))
        .await;
    let latest = session
        .set_criteria(FilterCriteria::new("", "Maçon", "", ""))
        .await;

    let state = session.settled().await;
    assert_eq!(state.generation, latest);
    assert_eq!(state.criteria.metier(), "Maçon");
    assert_eq!(ids(&state.results), ["2"]);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_search_never_overwrites_fast_newer_one() {
    let backend = StaggeredBackend {
        inner: SimulatedBackend::new(seed_directory(), Duration::ZERO),
    };
    let session = DirectorySession::new(backend, 8, SHOW_MORE_DELAY);

    session
        .set_criteria(FilterCriteria::new("slow", "", "", ""))
        .await;
    session
        .set_criteria(FilterCriteria::new("sow", "", "", ""))
        .await;
    let state = session.settled().await;
    assert_eq!(ids(&state.results), ["2", "11", "16"]);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let state = session.snapshot();
    assert_eq!(ids(&state.results), ["2", "11", "16"]);
    assert_eq!(state.phase, SessionPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn new_search_cancels_show_more() {
    let session = seeded_session().await;
    session.settled().await;

    let (grew, _) = tokio::join!(session.show_more(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        session
            .set_criteria(FilterCriteria::new("", "", "Thiès", ""))
            .await
    });
    assert!(!grew);

    let state = session.settled().await;
    assert_eq!(ids(&state.results), ["2", "5", "8", "19"]);
    assert_eq!(state.window.visible(), 4);
}

#[tokio::test(start_paused = true)]
async fn reset_clears_criteria_and_restores_first_page() {
    let session = seeded_session().await;
    session.settled().await;
    session
        .set_criteria(FilterCriteria::new("peinture", "Peintre", "Thiès", ""))
        .await;
    assert_eq!(ids(&session.settled().await.results), ["5"]);

    session.reset().await;
    let state = session.settled().await;
    assert!(state.criteria.is_empty());
    assert_eq!(state.result_count(), 19);
    assert_eq!(state.window.visible(), 8);
}

#[tokio::test(start_paused = true)]
async fn criteria_change_after_show_more_restores_first_page() {
    let session = seeded_session().await;
    session.settled().await;
    assert!(session.show_more().await);
    assert_eq!(session.snapshot().window.visible(), 16);

    session
        .set_criteria(FilterCriteria::new("in", "", "", ""))
        .await;
    let state = session.settled().await;
    assert_eq!(state.result_count(), 12);
    assert_eq!(state.window.visible(), 8);
    assert!(state.window.has_more());
}

#[tokio::test(start_paused = true)]
async fn failed_search_keeps_previous_results() {
    let backend = FailingBackend {
        directory: seed_directory(),
    };
    let session = DirectorySession::open(backend, 8, SHOW_MORE_DELAY).await;
    let before = session.settled().await;
    assert_eq!(before.result_count(), 19);
    assert!(session.show_more().await);

    session
        .update_criteria(|c| c.set_region("Dakar"))
        .await;
    let state = session.settled().await;
    assert_eq!(state.phase, SessionPhase::Idle);
    assert_eq!(ids(&state.results), ids(&before.results));
    assert_eq!(state.window.visible(), 16);
    assert_eq!(
        state.last_error.as_deref(),
        Some("search backend error: connection reset")
    );
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_loading_then_results() {
    let session = DirectorySession::new(
        SimulatedBackend::new(seed_directory(), SEARCH_DELAY),
        8,
        SHOW_MORE_DELAY,
    );
    let mut rx = session.subscribe();
    session.reset().await;
    assert!(rx.borrow_and_update().is_loading());

    rx.changed().await.expect("session alive");
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_loading());
    assert_eq!(state.result_count(), 19);
}

fn login_request() -> AuthRequest {
    AuthRequest::Login(LoginForm {
        phone: "+221 77 000 00 00".to_string(),
        password: "secret".to_string(),
    })
}

fn proposal_for(artisan_id: &str) -> MarketProposal {
    MarketProposal {
        artisan_id: artisan_id.to_string(),
        title: "Tables-bancs".to_string(),
        description: "40 tables-bancs pour l'école".to_string(),
        budget_fcfa: 2_500_000,
        start_date: NaiveDate::from_ymd_opt(2025, 10, 1),
        duration: "3 mois".to_string(),
        market_type: MarketType::Fourniture,
        attachment: None,
    }
}

#[tokio::test(start_paused = true)]
async fn contact_links_are_public() {
    let session = seeded_session().await;
    session.settled().await;
    assert!(!session.snapshot().signed_in);

    let links = session.contact("1").expect("contact links");
    assert_eq!(links.tel.as_deref(), Some("tel:+221771234567"));
    assert_eq!(
        links.whatsapp.as_deref(),
        Some("https://wa.me/221771234567")
    );
    assert!(matches!(
        session.contact("999"),
        Err(DirectoryError::UnknownArtisan(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn market_proposal_requires_sign_in() {
    let session = seeded_session().await;
    session.settled().await;
    let controller = FormController::new(
        SimulatedSubmitter::new(Duration::from_millis(2000)),
        Duration::from_millis(2000),
    );

    let err = session
        .propose_market(&controller, &proposal_for("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::LoginRequired));
    assert_eq!(controller.status(), SubmitStatus::Idle);

    let authenticator = SimulatedAuthenticator::new(Duration::from_millis(1500));
    session
        .sign_in(&authenticator, &login_request())
        .await
        .expect("sign-in should succeed");

    let receipt = session
        .propose_market(&controller, &proposal_for("1"))
        .await
        .expect("proposal accepted");
    assert_eq!(receipt.kind, FormKind::MarketProposal);

    session.sign_out();
    assert!(matches!(
        session.propose_market(&controller, &proposal_for("1")).await,
        Err(DirectoryError::LoginRequired)
    ));
}

#[tokio::test(start_paused = true)]
async fn market_proposal_targets_a_listed_artisan() {
    let session = seeded_session().await;
    session.settled().await;
    let authenticator = SimulatedAuthenticator::new(Duration::ZERO);
    session
        .sign_in(&authenticator, &login_request())
        .await
        .expect("sign-in should succeed");
    let controller = FormController::new(SimulatedSubmitter::new(Duration::ZERO), Duration::ZERO);

    assert!(matches!(
        session.propose_market(&controller, &proposal_for("999")).await,
        Err(DirectoryError::UnknownArtisan(ref id)) if id == "999"
    ));
}

#[tokio::test(start_paused = true)]
async fn incomplete_sign_in_is_rejected() {
    let session = seeded_session().await;
    let authenticator = SimulatedAuthenticator::new(Duration::from_millis(1500));
    let request = AuthRequest::Login(LoginForm::default());

    let err = session
        .sign_in(&authenticator, &request)
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Form(_)));
    assert!(!session.snapshot().signed_in);
}
