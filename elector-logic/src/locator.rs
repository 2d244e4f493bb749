use std::time::Duration;

use chrono::Utc;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::UtcDT;
use crate::geo::Coordinate;
use crate::place::Place;
use crate::prelude::*;
use crate::proximity::{DEFAULT_PADDING, Region, fit_region};
use crate::search::{SearchContext, SearchRadius};

/// Floor applied to a fitted region's spans before it's handed to the map,
/// so fitting a single marker doesn't produce an unusably small viewport.
pub const MIN_SPAN_DEG: f64 = 0.01;

/// Reference point used until the location provider has a fix.
pub const DEFAULT_REFERENCE: Coordinate = Coordinate {
    lat: 38.911944,
    long: -77.2225,
};

/// Source of the device's current position. Implementations return `None`
/// when no fix is available rather than erroring.
pub trait LocationService {
    fn get_loc(&self) -> Option<Coordinate>;
}

pub trait StateUpdateSender {
    fn send_update(&self);
}

/// Snapshot of the locator screen handed to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, specta::Type)]
pub struct LocatorUiState {
    pub results: Vec<Place>,
    pub reference: Coordinate,
    pub radius: SearchRadius,
    pub selected: Option<String>,
    /// Viewport that fits every result (min-span floor already applied),
    /// `None` when there are no results to fit.
    pub fit_all: Option<Region>,
    pub computed_at: Option<UtcDT>,
}

struct LocatorState {
    catalog: Vec<Place>,
    context: SearchContext,
    results: Vec<Place>,
    selected: Option<String>,
    /// Generation of the last computation that made it to `results`.
    applied_seq: u64,
    computed_at: Option<UtcDT>,
}

impl LocatorState {
    fn new(catalog: Vec<Place>, context: SearchContext) -> Self {
        Self {
            catalog,
            context,
            results: Vec::new(),
            selected: None,
            applied_seq: 0,
            computed_at: None,
        }
    }

    /// Run the query for `snapshot` and apply the outcome unless a newer
    /// generation already landed. Returns whether anything was applied.
    fn recompute(&mut self, snapshot: SearchContext) -> bool {
        if self.computed_at.is_some() && snapshot.seq < self.applied_seq {
            debug!(
                "Discarding superseded locator results (seq {} < {})",
                snapshot.seq, self.applied_seq
            );
            return false;
        }

        match snapshot.results(&self.catalog) {
            Ok(results) => {
                if self
                    .selected
                    .as_ref()
                    .is_some_and(|id| !results.iter().any(|p| &p.id == id))
                {
                    // Selection fell out of range, drop it
                    self.selected = None;
                }
                self.results = results;
                self.applied_seq = snapshot.seq;
                self.computed_at = Some(Utc::now());
                true
            }
            Err(why) => {
                // Radius presets are always positive, so this is unreachable
                // outside of misuse; fail loudly in the log either way.
                error!("Locator recompute failed: {why}");
                false
            }
        }
    }

    fn fit_all(&self) -> Option<Region> {
        let coords = self.results.iter().map(|p| p.coordinate).collect::<Vec<_>>();
        let mut region = fit_region(&coords, DEFAULT_PADDING).ok()?;
        region.lat_span = region.lat_span.max(MIN_SPAN_DEG);
        region.long_span = region.long_span.max(MIN_SPAN_DEG);
        Some(region)
    }

    fn as_ui_state(&self) -> LocatorUiState {
        LocatorUiState {
            results: self.results.clone(),
            reference: self.context.reference,
            radius: self.context.radius,
            selected: self.selected.clone(),
            fit_all: self.fit_all(),
            computed_at: self.computed_at,
        }
    }
}

/// A running polling-place locator: owns the catalog and the active
/// [SearchContext], polls a [LocationService] on an interval, and pushes
/// recomputed results to the UI through a [StateUpdateSender].
///
/// The context is replaced (never mutated) on every change, so each
/// recompute runs from a consistent snapshot and the newest generation
/// always wins.
pub struct LocatorSession<L: LocationService, S: StateUpdateSender> {
    state: RwLock<LocatorState>,
    location: L,
    state_update_sender: S,
    interval: Duration,
    cancel: CancellationToken,
}

impl<L: LocationService, S: StateUpdateSender> LocatorSession<L, S> {
    pub fn new(
        interval: Duration,
        catalog: Vec<Place>,
        location: L,
        state_update_sender: S,
    ) -> Self {
        let reference = location.get_loc().unwrap_or(DEFAULT_REFERENCE);
        let context = SearchContext::new(reference, SearchRadius::default());
        let mut state = LocatorState::new(catalog, context);
        state.recompute(context);

        Self {
            state: RwLock::new(state),
            location,
            state_update_sender,
            interval,
            cancel: CancellationToken::new(),
        }
    }

    pub async fn get_ui_state(&self) -> LocatorUiState {
        self.state.read().await.as_ui_state()
    }

    pub async fn set_radius(&self, radius: SearchRadius) {
        let mut state = self.state.write().await;
        if state.context.radius == radius {
            return;
        }
        state.context = state.context.with_radius(radius);
        let snapshot = state.context;
        if state.recompute(snapshot) {
            self.state_update_sender.send_update();
        }
    }

    /// Re-run the current search, folding in a fresh location fix if the
    /// provider has one.
    pub async fn refresh(&self) {
        let mut state = self.state.write().await;
        if let Some(loc) = self.location.get_loc()
            && loc != state.context.reference
        {
            state.context = state.context.with_reference(loc);
        }
        let snapshot = state.context;
        if state.recompute(snapshot) {
            self.state_update_sender.send_update();
        }
    }

    pub async fn select_place(&self, id: &str) {
        let mut state = self.state.write().await;
        if state.results.iter().any(|p| p.id == id) {
            state.selected = Some(id.to_string());
            self.state_update_sender.send_update();
        }
    }

    pub async fn clear_selection(&self) {
        let mut state = self.state.write().await;
        if state.selected.take().is_some() {
            self.state_update_sender.send_update();
        }
    }

    pub fn quit(&self) {
        self.cancel.cancel();
    }

    /// Main loop of the locator, polls the location provider on the
    /// configured interval and recomputes when the reference point moves.
    pub async fn main_loop(&self) -> Result {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    break Ok(());
                }

                _ = interval.tick() => {
                    let Some(loc) = self.location.get_loc() else {
                        continue;
                    };

                    let mut state = self.state.write().await;
                    if loc == state.context.reference {
                        continue;
                    }

                    state.context = state.context.with_reference(loc);
                    let snapshot = state.context;
                    if state.recompute(snapshot) {
                        self.state_update_sender.send_update();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::place::tysons_catalog;
    use crate::tests::{CountingSender, MockLocation};
    use tokio::{task::yield_now, test};

    const INTERVAL: Duration = Duration::from_secs(2);

    fn mk_session(
        loc: Option<Coordinate>,
    ) -> (Arc<LocatorSession<MockLocation, CountingSender>>, MockLocation) {
        let location = MockLocation::new(loc);
        let handle = location.clone();
        let session = LocatorSession::new(
            INTERVAL,
            tysons_catalog(),
            location,
            CountingSender::default(),
        );
        (Arc::new(session), handle)
    }

    #[test]
    async fn test_initial_state_uses_default_reference() {
        let (session, _) = mk_session(None);
        let ui = session.get_ui_state().await;

        assert_eq!(ui.reference, DEFAULT_REFERENCE);
        assert_eq!(ui.radius, SearchRadius::Km5);
        assert_eq!(ui.results.len(), 8);
        assert!(ui.computed_at.is_some());
    }

    #[test]
    async fn test_radius_change_refilters() {
        let (session, _) = mk_session(None);

        session.set_radius(SearchRadius::Km1).await;
        let ui = session.get_ui_state().await;

        assert_eq!(ui.radius, SearchRadius::Km1);
        assert_eq!(ui.results.len(), 1);
        assert_eq!(ui.results[0].id, "tysons-pimmit-library");
    }

    #[test]
    async fn test_selection_dropped_when_out_of_range() {
        let (session, _) = mk_session(None);

        session.select_place("vienna-town-hall").await;
        assert_eq!(
            session.get_ui_state().await.selected.as_deref(),
            Some("vienna-town-hall")
        );

        // Vienna Town Hall is ~2 km out, narrowing to 1 km drops it
        session.set_radius(SearchRadius::Km1).await;
        assert_eq!(session.get_ui_state().await.selected, None);

        // Selecting something not in the results is a no-op
        session.select_place("vienna-town-hall").await;
        assert_eq!(session.get_ui_state().await.selected, None);
    }

    #[test]
    async fn test_fit_all_floors_single_result() {
        let (session, _) = mk_session(None);
        session.set_radius(SearchRadius::Km1).await;

        let region = session.get_ui_state().await.fit_all.unwrap();
        assert_eq!(region.lat_span, MIN_SPAN_DEG);
        assert_eq!(region.long_span, MIN_SPAN_DEG);
    }

    #[test]
    async fn test_loop_applies_location_updates() {
        tokio::time::pause();
        let (session, handle) = mk_session(Some(DEFAULT_REFERENCE));

        let looped = session.clone();
        let task = tokio::spawn(async move { looped.main_loop().await });
        yield_now().await;

        // Provider moves to the Tysons Corner mall
        let moved = Coordinate {
            lat: 38.9187,
            long: -77.2311,
        };
        handle.set(Some(moved));

        tokio::time::sleep(INTERVAL + Duration::from_millis(100)).await;
        yield_now().await;

        let ui = session.get_ui_state().await;
        assert_eq!(ui.reference, moved);
        // Nearest result from the mall is the mall itself
        assert_eq!(ui.results[0].id, "tysons-corner-center");
        assert_eq!(ui.results[0].distance_m, Some(0.0));

        session.quit();
        task.await.expect("loop panicked").expect("loop errored");
    }

    #[test]
    async fn test_loop_ignores_unchanged_location() {
        tokio::time::pause();
        let (session, _) = mk_session(Some(DEFAULT_REFERENCE));
        let updates_before = session.state_update_sender.count();

        let looped = session.clone();
        let task = tokio::spawn(async move { looped.main_loop().await });
        yield_now().await;

        tokio::time::sleep(INTERVAL * 3).await;
        yield_now().await;

        assert_eq!(session.state_update_sender.count(), updates_before);
        assert_eq!(session.get_ui_state().await.reference, DEFAULT_REFERENCE);

        session.quit();
        task.await.expect("loop panicked").expect("loop errored");
    }

    #[test]
    async fn test_stale_generation_discarded() {
        let (session, _) = mk_session(None);

        let mut state = session.state.write().await;
        let stale = state.context;
        state.context = state.context.with_radius(SearchRadius::Km1);
        let fresh = state.context;

        assert!(state.recompute(fresh));
        assert_eq!(state.results.len(), 1);

        // A computation from the superseded snapshot must not overwrite
        assert!(!state.recompute(stale));
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.applied_seq, fresh.seq);
    }
}
