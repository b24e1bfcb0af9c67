//! The planner owns all front-end state and is the only thing the GUI talks
//! to. Every handler mutates on the calling (UI) thread; route fetches run on
//! worker threads and come back through a channel drained by
//! [`RoutePlanner::poll_responses`].

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::backend::RouteBackend;
use crate::binding::{build_scene, resolve_map_event, FieldMirror, MapEvent, MapScene};
use crate::details::DetailCard;
use crate::error::BackendError;
use crate::geo::{CoordinateField, Endpoint, LngLat};
use crate::payload::{BoundingBox, RoutePayload};
use crate::position::PositionModel;
use crate::presentation::PresentationState;
use crate::request::{Algorithm, RequestTicket, RouteQuery};
use crate::transport::{TransportMode, TransportState};

/// Result of one worker run, sent back to the UI thread.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: RequestTicket,
    pub route: Result<RoutePayload, BackendError>,
    pub bounding_box: Result<Option<BoundingBox>, BackendError>,
}

pub struct RoutePlanner {
    position: PositionModel,
    transport: TransportState,
    algorithm: Algorithm,
    presentation: PresentationState,
    fields: FieldMirror,
    backend: Arc<dyn RouteBackend>,
    sender: Sender<FetchOutcome>,
    receiver: Receiver<FetchOutcome>,
    next_sequence: u64,
    pending: usize,
    last_applied_sequence: Option<u64>,
}

impl RoutePlanner {
    pub fn new(backend: Arc<dyn RouteBackend>) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        let position = PositionModel::new();
        let fields = FieldMirror::new(&position);
        Self {
            position,
            transport: TransportState::default(),
            algorithm: Algorithm::default(),
            presentation: PresentationState::new(),
            fields,
            backend,
            sender,
            receiver,
            next_sequence: 1,
            pending: 0,
            last_applied_sequence: None,
        }
    }

    pub fn position(&self) -> &PositionModel {
        &self.position
    }

    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn fields(&self) -> &FieldMirror {
        &self.fields
    }

    /// Number of submissions whose outcome has not been applied yet.
    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    pub fn last_applied_sequence(&self) -> Option<u64> {
        self.last_applied_sequence
    }

    // Position handlers

    /// Parse `raw` into one coordinate. The field shows `raw` either way until
    /// [`Self::revert_field`]; rejected input leaves the model untouched.
    pub fn update_from_field(&mut self, field: CoordinateField, raw: &str) -> bool {
        let text = self.fields.text_mut(field);
        text.clear();
        text.push_str(raw);
        self.commit_field(field)
    }

    pub fn update_from_map_click(&mut self, endpoint: Endpoint, lng_lat: LngLat) {
        self.position.update_from_map_click(endpoint, lng_lat);
        self.fields.sync_from(&self.position);
    }

    pub fn update_from_marker_drag(&mut self, endpoint: Endpoint, lng_lat: LngLat) {
        self.position.update_from_marker_drag(endpoint, lng_lat);
        self.fields.sync_from(&self.position);
    }

    /// Route a raw map event through the gesture rules. Returns the endpoint
    /// that moved, if any.
    pub fn handle_map_event(&mut self, event: &MapEvent) -> Option<Endpoint> {
        let (endpoint, lng_lat) = resolve_map_event(event)?;
        match event {
            MapEvent::MarkerDragEnd { .. } => self.update_from_marker_drag(endpoint, lng_lat),
            _ => self.update_from_map_click(endpoint, lng_lat),
        }
        log::debug!(
            "{endpoint:?} point set to ({}, {})",
            lng_lat.lng,
            lng_lat.lat
        );
        Some(endpoint)
    }

    pub fn swap_endpoints(&mut self) {
        self.position.swap_endpoints();
        self.fields.sync_from(&self.position);
    }

    pub fn reset_endpoint(&mut self, endpoint: Endpoint) {
        self.position.reset(endpoint);
        self.fields.sync_from(&self.position);
    }

    /// Mutable text buffer for a coordinate field; follow edits with
    /// [`Self::commit_field`].
    pub fn field_text_mut(&mut self, field: CoordinateField) -> &mut String {
        self.fields.text_mut(field)
    }

    pub fn commit_field(&mut self, field: CoordinateField) -> bool {
        let accepted = self.fields.commit(field, &mut self.position);
        self.fields.sync_from(&self.position);
        accepted
    }

    /// Show the model value again if the field holds rejected text.
    pub fn revert_field(&mut self, field: CoordinateField) -> bool {
        self.fields.revert(field, &self.position)
    }

    // Transport handlers

    pub fn set_active_mode(&mut self, mode: TransportMode) {
        self.transport.set_active_mode(mode);
    }

    pub fn set_speed(&mut self, speed_kmh: f64) {
        self.transport.set_speed(speed_kmh);
    }

    pub fn set_speed_text(&mut self, raw: &str) {
        self.transport.set_speed_text(raw);
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    // Presentation

    pub fn toggle_visibility(&mut self, index: usize) -> bool {
        self.presentation.toggle_visibility(index)
    }

    pub fn scene(&self) -> MapScene<'_> {
        build_scene(&self.position, &self.presentation)
    }

    pub fn detail_cards(&self) -> Vec<DetailCard> {
        self.presentation.detail_cards()
    }

    // Requests

    pub fn current_query(&self) -> RouteQuery {
        RouteQuery::from_form(&self.position, &self.transport, self.algorithm)
    }

    /// Snapshot the form and fetch routes for it on a worker thread. Never
    /// blocks; concurrent submissions are allowed and applied in arrival order.
    pub fn submit(&mut self) -> RequestTicket {
        let ticket = RequestTicket {
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.pending += 1;
        self.fields.revert_all(&self.position);

        let query = self.current_query();
        log::info!(
            "route request {ticket}: ({}, {}) -> ({}, {}) at {} km/h using {}",
            query.start_lat,
            query.start_lon,
            query.end_lat,
            query.end_lon,
            query.vehicle_speed,
            query.algorithm
        );

        let backend = Arc::clone(&self.backend);
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let route = backend.fetch_route(&query);
            let bounding_box = backend.fetch_bounding_box(&query);
            let _ = sender.send(FetchOutcome {
                ticket,
                route,
                bounding_box,
            });
        });
        ticket
    }

    /// Apply every outcome that has arrived. Returns how many were applied.
    pub fn poll_responses(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.receiver.try_recv() {
            self.apply_outcome(outcome);
            applied += 1;
        }
        applied
    }

    /// Block until one outcome arrives or `timeout` elapses, then apply it.
    pub fn wait_for_response(&mut self, timeout: Duration) -> Option<RequestTicket> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                let ticket = outcome.ticket;
                self.apply_outcome(outcome);
                Some(ticket)
            }
            Err(RecvTimeoutError::Timeout) => None,
            // The planner holds a sender, so the channel never disconnects.
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Apply one worker outcome. Failures are logged and leave the
    /// presentation as it was.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let FetchOutcome {
            ticket,
            route,
            bounding_box,
        } = outcome;
        self.pending = self.pending.saturating_sub(1);

        match route {
            Ok(payload) => {
                let routes = payload.slots.iter().filter(|slot| !slot.is_empty()).count();
                self.presentation.apply_route_response(payload);
                self.last_applied_sequence = Some(ticket.sequence);
                log::info!("route response {ticket} applied with {routes} route(s)");
            }
            Err(err) => log::error!("route request {ticket} failed: {err}"),
        }

        match bounding_box {
            Ok(Some(bounding_box)) => {
                self.presentation.apply_bounding_box(bounding_box);
                log::debug!("bounding box from {ticket} applied");
            }
            Ok(None) => {}
            Err(err) => log::warn!("bounding box request {ticket} failed: {err}"),
        }
    }
}

impl std::fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("position", &self.position)
            .field("transport", &self.transport)
            .field("algorithm", &self.algorithm)
            .field("pending", &self.pending)
            .field("last_applied_sequence", &self.last_applied_sequence)
            .finish_non_exhaustive()
    }
}
