//! Directory listing state shared between a searching task and its observers.
//!
//! Every criteria change bumps a generation counter and aborts whatever task
//! is pending. A task only writes state while its generation is current, so
//! a superseded search or "show more" timer can never overwrite newer results.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sunuy_core::forms::{AuthRequest, MarketProposal, SubmissionReceipt, Validate};
use sunuy_core::{ArtisanRecord, FilterCriteria, PaginationWindow};
use tokio::sync::{watch, Mutex};
use tokio::task::AbortHandle;

use crate::backend::SearchBackend;
use crate::error::DirectoryError;
use crate::submit::{Authenticator, FormController, FormSubmitter, Visitor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Searching,
    LoadingMore,
}

/// Snapshot published to subscribers after every change.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub criteria: FilterCriteria,
    pub results: Vec<ArtisanRecord>,
    pub window: PaginationWindow,
    pub phase: SessionPhase,
    /// Message of the last failed search, cleared by the next one.
    pub last_error: Option<String>,
    pub signed_in: bool,
    generation: u64,
}

impl SessionState {
    fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            results: Vec::new(),
            window: PaginationWindow::new(0, page_size),
            phase: SessionPhase::Idle,
            last_error: None,
            signed_in: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn visible_artisans(&self) -> &[ArtisanRecord] {
        self.window.slice(&self.results)
    }

    #[must_use]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Searching
    }
}

/// Call and WhatsApp deep links shown on an artisan's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLinks {
    pub phone: Option<String>,
    pub tel: Option<String>,
    pub whatsapp: Option<String>,
}

impl ContactLinks {
    #[must_use]
    pub fn for_artisan(artisan: &ArtisanRecord) -> Self {
        Self {
            phone: artisan.phone.clone(),
            tel: artisan.tel_link(),
            whatsapp: artisan.whatsapp_link(),
        }
    }
}

pub struct DirectorySession<B> {
    backend: Arc<B>,
    page_size: usize,
    show_more_delay: Duration,
    state: Arc<watch::Sender<SessionState>>,
    pending: Mutex<Option<AbortHandle>>,
}

impl<B: SearchBackend> DirectorySession<B> {
    /// An idle session with no results. Call [`Self::reset`] to load the
    /// unfiltered catalog, or use [`Self::open`].
    #[must_use]
    pub fn new(backend: B, page_size: usize, show_more_delay: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::new(page_size));
        Self {
            backend: Arc::new(backend),
            page_size,
            show_more_delay,
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    /// A session already searching with empty criteria.
    pub async fn open(backend: B, page_size: usize, show_more_delay: Duration) -> Self {
        let session = Self::new(backend, page_size, show_more_delay);
        session.reset().await;
        session
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Wait until no search or "show more" is in flight.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        let state = match rx.wait_for(|s| s.phase == SessionPhase::Idle).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        state
    }

    /// Replace the criteria and start a new search, superseding any pending
    /// one. Returns the generation of the new search.
    pub async fn set_criteria(&self, criteria: FilterCriteria) -> u64 {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            s.criteria = criteria.clone();
            s.phase = SessionPhase::Searching;
            s.last_error = None;
        });
        tracing::debug!(generation, "search started");

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let page_size = self.page_size;
        let task = tokio::spawn(async move {
            let outcome = backend.search(criteria).await;
            state.send_if_modified(|s| {
                if s.generation != generation {
                    tracing::debug!(generation, current = s.generation, "discarding superseded search");
                    return false;
                }
                match outcome {
                    Ok(results) => {
                        tracing::info!(generation, count = results.len(), "search complete");
                        s.window = PaginationWindow::new(results.len(), page_size);
                        s.results = results;
                    }
                    Err(e) => {
                        tracing::warn!(generation, error = %e, "search failed");
                        s.last_error = Some(e.to_string());
                    }
                }
                s.phase = SessionPhase::Idle;
                true
            });
        });
        *pending = Some(task.abort_handle());
        generation
    }

    /// Edit the current criteria in place and search again.
    pub async fn update_criteria(&self, edit: impl FnOnce(&mut FilterCriteria)) -> u64 {
        let mut criteria = self.state.borrow().criteria.clone();
        edit(&mut criteria);
        self.set_criteria(criteria).await
    }

    /// Clear every filter.
    pub async fn reset(&self) -> u64 {
        self.set_criteria(FilterCriteria::default()).await
    }

    /// Reveal one more page after the show-more delay.
    ///
    /// Returns `false` without waiting when every result is already visible
    /// or another request is in flight, and `false` after waiting if a new
    /// search superseded this one.
    pub async fn show_more(&self) -> bool {
        let mut pending = self.pending.lock().await;

        let mut generation = None;
        self.state.send_if_modified(|s| {
            if s.phase != SessionPhase::Idle || s.window.is_exhausted() {
                return false;
            }
            s.phase = SessionPhase::LoadingMore;
            generation = Some(s.generation);
            true
        });
        let Some(generation) = generation else {
            return false;
        };

        let state = Arc::clone(&self.state);
        let delay = self.show_more_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut grew = false;
            state.send_if_modified(|s| {
                if s.generation != generation || s.phase != SessionPhase::LoadingMore {
                    return false;
                }
                grew = s.window.show_more();
                s.phase = SessionPhase::Idle;
                true
            });
            grew
        });
        *pending = Some(task.abort_handle());
        drop(pending);

        task.await.unwrap_or(false)
    }

    /// Validate and authenticate `request`, then unlock market proposals.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Form`] when the request is incomplete, or
    /// whatever the authenticator reports.
    pub async fn sign_in<A: Authenticator>(
        &self,
        authenticator: &A,
        request: &AuthRequest,
    ) -> Result<Visitor, DirectoryError> {
        request.validate()?;
        let visitor = authenticator.authenticate(request).await?;
        self.state.send_modify(|s| s.signed_in = true);
        Ok(visitor)
    }

    pub fn sign_out(&self) {
        self.state.send_if_modified(|s| std::mem::take(&mut s.signed_in));
    }

    /// Contact links for an artisan in the current results.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::UnknownArtisan`] when `id` is not in the
    /// results.
    pub fn contact(&self, id: &str) -> Result<ContactLinks, DirectoryError> {
        self.state
            .borrow()
            .results
            .iter()
            .find(|a| a.id == id)
            .map(ContactLinks::for_artisan)
            .ok_or_else(|| DirectoryError::UnknownArtisan(id.to_string()))
    }

    /// Submit a market proposal to an artisan in the current results.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::LoginRequired`] for anonymous visitors,
    /// [`DirectoryError::UnknownArtisan`] when the target is not in the
    /// results, or whatever `controller` reports.
    pub async fn propose_market<S: FormSubmitter>(
        &self,
        controller: &FormController<S>,
        proposal: &MarketProposal,
    ) -> Result<SubmissionReceipt, DirectoryError> {
        {
            let state = self.state.borrow();
            if !state.signed_in {
                return Err(DirectoryError::LoginRequired);
            }
            if !state.results.iter().any(|a| a.id == proposal.artisan_id) {
                return Err(DirectoryError::UnknownArtisan(proposal.artisan_id.clone()));
            }
        }
        controller.submit(proposal).await
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
