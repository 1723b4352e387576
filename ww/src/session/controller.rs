//! Session controller
//!
//! Owns the [`SessionState`] and maps user events to gateway calls.
//!
//! Long-running requests are split into `begin_*` and `finish_*`. `begin_*`
//! hands out a [`Ticket`] stamped with the current generation; `finish_*`
//! only applies a result whose ticket still matches. Navigation that abandons
//! the current plan bumps the generation, so late answers are dropped.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::{SessionState, StoryResult, View};
use crate::auth::{AuthError, Authenticator, Credentials};
use crate::domain::{Itinerary, StoryTheme, Storybook, TripDetails};
use crate::gateway::{GatewayError, TripGateway};

/// Which request a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Itinerary,
    Storybook,
    Story,
}

/// Proof that a request was started in a given generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: RequestKind,
    generation: u64,
}

/// Inputs for a storybook request, captured at begin time
#[derive(Debug, Clone)]
pub struct StorybookJob {
    pub ticket: Ticket,
    pub itinerary: Itinerary,
    pub details: TripDetails,
}

/// Inputs for a story request, captured at begin time
#[derive(Debug, Clone)]
pub struct StoryJob {
    pub ticket: Ticket,
    /// Day whose details screen asked for the story
    pub day: u32,
    pub poi: String,
    pub theme: StoryTheme,
}

pub struct SessionController {
    state: SessionState,
    gateway: Arc<TripGateway>,
    auth: Arc<dyn Authenticator>,
}

impl SessionController {
    pub fn new(gateway: Arc<TripGateway>, auth: Arc<dyn Authenticator>) -> Self {
        Self {
            state: SessionState::default(),
            gateway,
            auth,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn gateway(&self) -> Arc<TripGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn start_journey(&mut self) {
        debug!(from = %self.state.view, "start_journey: called");
        self.state.view = View::Planner;
    }

    /// Show the login prompt; no-op when already signed in
    pub fn request_login(&mut self) {
        debug!(logged_in = self.state.is_logged_in(), "request_login: called");
        if !self.state.is_logged_in() {
            self.state.show_login = true;
        }
    }

    pub fn close_login(&mut self) {
        debug!("close_login: called");
        self.state.show_login = false;
    }

    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        debug!(email = %credentials.email(), "authenticate: called");
        match self.auth.authenticate(credentials).await {
            Ok(user) => {
                info!(name = %user.name, "Signed in");
                self.state.user = Some(user);
                self.state.show_login = false;
                self.state.error = None;
                self.state.view = View::Planner;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "authenticate: rejected");
                self.state.show_login = true;
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        debug!("logout: called");
        self.state.user = None;
        self.state.view = View::Home;
        self.abandon_requests();
        info!("Signed out");
    }

    /// Back to the landing screen, dropping the current plan
    pub fn go_home(&mut self) {
        debug!(from = %self.state.view, "go_home: called");
        self.state.view = View::Home;
        self.state.itinerary = None;
        self.state.storybook = None;
        self.state.selected_day = None;
        self.state.story = None;
        self.state.error = None;
        self.abandon_requests();
    }

    /// Request an itinerary and apply the result
    ///
    /// When signed out this only shows the login prompt.
    pub async fn generate_plan(&mut self, details: TripDetails) {
        debug!(destination = %details.destination, "generate_plan: called");
        let Some(ticket) = self.begin_itinerary(details.clone()) else {
            return;
        };
        let result = self.gateway.generate_itinerary(&details).await;
        self.finish_itinerary(ticket, result);
    }

    pub fn begin_itinerary(&mut self, details: TripDetails) -> Option<Ticket> {
        debug!(destination = %details.destination, "begin_itinerary: called");
        if !self.state.is_logged_in() {
            info!("Plan requested while signed out, asking for login");
            self.state.show_login = true;
            return None;
        }
        if self.state.loading {
            warn!("begin_itinerary: request already in flight");
            return None;
        }

        self.state.loading = true;
        self.state.error = None;
        self.state.trip_details = Some(details);
        Some(self.ticket(RequestKind::Itinerary))
    }

    /// Apply an itinerary result; returns false when the ticket is stale
    pub fn finish_itinerary(&mut self, ticket: Ticket, result: Result<Itinerary, GatewayError>) -> bool {
        debug!(ticket_generation = ticket.generation, "finish_itinerary: called");
        if !self.accepts(ticket, RequestKind::Itinerary) {
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(itinerary) => {
                info!(trip_title = %itinerary.trip_title, "Showing itinerary");
                self.state.itinerary = Some(itinerary);
                self.state.view = View::Itinerary;
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
            }
        }
        true
    }

    /// Open the details screen for a day of the current itinerary
    pub fn know_more(&mut self, day: u32) -> bool {
        debug!(%day, "know_more: called");
        let Some(plan) = self.state.itinerary.as_ref().and_then(|it| it.day(day)) else {
            debug!(%day, "know_more: no such day");
            return false;
        };
        self.state.selected_day = Some(plan.clone());
        self.state.story = None;
        self.state.view = View::Details;
        true
    }

    pub fn back_to_itinerary(&mut self) {
        debug!(from = %self.state.view, "back_to_itinerary: called");
        if self.state.itinerary.is_some() {
            self.state.view = View::Itinerary;
        }
    }

    /// Drop whatever request is in flight, keeping the current plan
    pub fn cancel_pending(&mut self) {
        debug!(loading = self.state.loading, "cancel_pending: called");
        self.abandon_requests();
    }

    /// Back to the questionnaire; only the itinerary is discarded
    pub fn back_to_planner(&mut self) {
        debug!(from = %self.state.view, "back_to_planner: called");
        self.state.view = View::Planner;
        self.state.itinerary = None;
        self.abandon_requests();
    }

    pub async fn create_storybook(&mut self) {
        debug!("create_storybook: called");
        let Some(job) = self.begin_storybook() else {
            return;
        };
        let result = self.gateway.generate_storybook(&job.itinerary, &job.details).await;
        self.finish_storybook(job.ticket, result);
    }

    /// Needs an itinerary and its trip details; None otherwise
    pub fn begin_storybook(&mut self) -> Option<StorybookJob> {
        debug!("begin_storybook: called");
        let (Some(itinerary), Some(details)) = (&self.state.itinerary, &self.state.trip_details) else {
            debug!("begin_storybook: nothing to retell");
            return None;
        };
        if self.state.loading {
            warn!("begin_storybook: request already in flight");
            return None;
        }

        let (itinerary, details) = (itinerary.clone(), details.clone());
        self.state.loading = true;
        self.state.error = None;
        Some(StorybookJob {
            ticket: self.ticket(RequestKind::Storybook),
            itinerary,
            details,
        })
    }

    pub fn finish_storybook(&mut self, ticket: Ticket, result: Result<Storybook, GatewayError>) -> bool {
        debug!(ticket_generation = ticket.generation, "finish_storybook: called");
        if !self.accepts(ticket, RequestKind::Storybook) {
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(book) => {
                info!(title = %book.title, "Showing storybook");
                self.state.storybook = Some(book);
                self.state.view = View::Storybook;
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
            }
        }
        true
    }

    /// Narrate the selected day's landmark
    pub async fn generate_story(&mut self, theme: StoryTheme) {
        debug!(%theme, "generate_story: called");
        let Some(job) = self.begin_story(theme) else {
            return;
        };
        let result = self.gateway.generate_story(&job.poi, job.theme).await;
        self.finish_story(job, result);
    }

    pub fn begin_story(&mut self, theme: StoryTheme) -> Option<StoryJob> {
        debug!(%theme, "begin_story: called");
        let Some(day) = &self.state.selected_day else {
            debug!("begin_story: no day selected");
            return None;
        };
        let (number, poi) = (day.day, day.title.clone());
        self.state.error = None;
        Some(StoryJob {
            ticket: self.ticket(RequestKind::Story),
            day: number,
            poi,
            theme,
        })
    }

    pub fn finish_story(&mut self, job: StoryJob, result: Result<String, GatewayError>) -> bool {
        debug!(poi = %job.poi, "finish_story: called");
        if !self.accepts(job.ticket, RequestKind::Story) {
            return false;
        }
        let selected = self.state.selected_day.as_ref().map(|d| d.day);
        if selected != Some(job.day) {
            warn!(story_day = job.day, ?selected, "Discarding story for a day no longer shown");
            return false;
        }

        match result {
            Ok(text) => {
                self.state.story = Some(StoryResult {
                    poi: job.poi,
                    theme: job.theme,
                    text,
                });
            }
            Err(e) => {
                self.state.story = None;
                self.state.error = Some(e.to_string());
            }
        }
        true
    }

    fn ticket(&self, kind: RequestKind) -> Ticket {
        Ticket {
            kind,
            generation: self.state.generation,
        }
    }

    fn accepts(&self, ticket: Ticket, kind: RequestKind) -> bool {
        if ticket.kind != kind || ticket.generation != self.state.generation {
            warn!(
                ?kind,
                ticket_generation = ticket.generation,
                current_generation = self.state.generation,
                "Discarding stale response"
            );
            return false;
        }
        true
    }

    fn abandon_requests(&mut self) {
        self.state.generation += 1;
        self.state.loading = false;
    }
}
