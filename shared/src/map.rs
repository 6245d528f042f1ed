//! Map panel: view position, endpoint markers and the lifecycle of the single
//! route overlay.
//!
//! At most one route is active at a time. Every run gets a fresh [`RouteId`];
//! responses and animation callbacks carrying any other id are ignored, which
//! is what keeps a torn-down overlay from being resurrected by a late timer or
//! a slow router.

use std::time::Duration;

use crate::{
    animation::AnimationPlan,
    config::{AppConfig, MapView},
    coordinate::Coordinate,
    error::{CoordinateError, RoutingError},
    geocode::FieldKind,
    routing::Route,
    selection::SearchCommand,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RouteStatus {
    Requested,
    Failed,
    Animating(Route),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    pub id: RouteId,
    pub command: SearchCommand,
    pub status: RouteStatus,
}

/// What the shell must redraw after an endpoint changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointUpdate {
    pub kind: FieldKind,
    pub marker: Option<Coordinate>,
    pub view: Option<MapView>,
    pub teardown: Option<RouteId>,
}

/// A route request the shell must send, after removing `teardown` if set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStart {
    pub id: RouteId,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub teardown: Option<RouteId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Animate(AnimationPlan),
    Failed,
    Stale,
}

#[derive(Debug, Clone)]
pub struct MapPanel {
    view: MapView,
    origin_marker: Option<Coordinate>,
    destination_marker: Option<Coordinate>,
    active: Option<ActiveRoute>,
    next_route: u64,
    recenter_zoom: u8,
    animation_step: Duration,
}

impl MapPanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            view: config.initial_view,
            origin_marker: None,
            destination_marker: None,
            active: None,
            next_route: 0,
            recenter_zoom: config.recenter_zoom,
            animation_step: config.animation_step,
        }
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn marker(&self, kind: FieldKind) -> Option<Coordinate> {
        match kind {
            FieldKind::Origin => self.origin_marker,
            FieldKind::Destination => self.destination_marker,
        }
    }

    pub fn active_route(&self) -> Option<&ActiveRoute> {
        self.active.as_ref()
    }

    /// The route currently being animated, if any.
    pub fn current_route(&self) -> Option<&Route> {
        match self.active.as_ref().map(|active| &active.status) {
            Some(RouteStatus::Animating(route)) => Some(route),
            _ => None,
        }
    }

    /// Reacts to a new origin or destination. Endpoints are route inputs, so
    /// any active route is torn down; a new origin also recenters the view.
    pub fn set_endpoint(&mut self, kind: FieldKind, coordinate: Option<Coordinate>) -> EndpointUpdate {
        let marker = coordinate.filter(Coordinate::is_valid);
        match kind {
            FieldKind::Origin => self.origin_marker = marker,
            FieldKind::Destination => self.destination_marker = marker,
        }

        let view = match (kind, coordinate) {
            (FieldKind::Origin, Some(origin)) => self.recenter(origin).ok(),
            _ => None,
        };

        EndpointUpdate {
            kind,
            marker,
            view,
            teardown: self.teardown(),
        }
    }

    /// Moves the view onto `coordinate`. Invalid coordinates leave the view
    /// where it is.
    pub fn recenter(&mut self, coordinate: Coordinate) -> Result<MapView, CoordinateError> {
        match coordinate.validate() {
            Ok(center) => {
                self.view = MapView {
                    center,
                    zoom: self.recenter_zoom,
                };
                Ok(self.view)
            }
            Err(err) => {
                log::error!("Invalid origin coordinates: {err}");
                Err(err)
            }
        }
    }

    pub fn start_route(&mut self, command: SearchCommand) -> Result<RouteStart, CoordinateError> {
        let origin = command.origin.validate();
        let destination = command.destination.validate();
        let (origin, destination) = match (origin, destination) {
            (Ok(origin), Ok(destination)) => (origin, destination),
            (Err(err), _) | (_, Err(err)) => {
                log::error!("Invalid coordinates for routing: {err}");
                return Err(err);
            }
        };

        let teardown = self.teardown();
        self.next_route += 1;
        let id = RouteId(self.next_route);
        self.active = Some(ActiveRoute {
            id,
            command,
            status: RouteStatus::Requested,
        });
        log::info!(
            "requesting route {} from ({:.5}, {:.5}) to ({:.5}, {:.5})",
            id.0,
            origin.lat,
            origin.lon,
            destination.lat,
            destination.lon
        );

        Ok(RouteStart {
            id,
            origin,
            destination,
            teardown,
        })
    }

    pub fn route_resolved(
        &mut self,
        id: RouteId,
        result: Result<Vec<Route>, RoutingError>,
    ) -> RouteOutcome {
        let step = self.animation_step;
        let Some(active) = self.active.as_mut().filter(|active| active.id == id) else {
            log::debug!("discarding response for superseded route {}", id.0);
            return RouteOutcome::Stale;
        };

        let route = match result.and_then(|routes| routes.into_iter().next().ok_or(RoutingError::NoRoute)) {
            Ok(route) => route,
            Err(err) => {
                log::error!("Routing failed for route {}: {err}", id.0);
                active.status = RouteStatus::Failed;
                return RouteOutcome::Failed;
            }
        };

        let plan = AnimationPlan::new(id, active.command.origin, route.coordinates.clone(), step);
        active.status = RouteStatus::Animating(route);
        RouteOutcome::Animate(plan)
    }

    /// Position for an animation tick, or `None` if the tick belongs to a
    /// route that is no longer on the map.
    pub fn vehicle_position(&self, id: RouteId, index: usize) -> Option<Coordinate> {
        let active = self.active.as_ref().filter(|active| active.id == id)?;
        match &active.status {
            RouteStatus::Animating(route) => route.coordinates.get(index).copied(),
            _ => None,
        }
    }

    /// Drops the active route, returning its id so the overlay can be removed.
    pub fn teardown(&mut self) -> Option<RouteId> {
        let active = self.active.take()?;
        log::debug!("tearing down route {}", active.id.0);
        Some(active.id)
    }
}
