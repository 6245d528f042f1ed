//! Platform-independent core of the route search app.
//!
//! Everything here is plain Rust: the browser shell in `frontend` owns the
//! timers, HTTP calls and Leaflet interop, and feeds their results back into
//! the state machines defined in [`search`] and [`map`].

pub mod animation;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod geocode;
pub mod map;
pub mod routing;
pub mod search;
pub mod selection;

pub use animation::{AnimationPlan, AnimationStep};
pub use config::{AppConfig, MapView, VehicleIcon};
pub use coordinate::Coordinate;
pub use error::{CoordinateError, GeocodeError, RoutingError, SubmitError};
pub use geocode::{FieldKind, Suggestion, parse_suggestions, suggestion_url};
pub use map::{EndpointUpdate, MapPanel, RouteId, RouteOutcome, RouteStart};
pub use routing::{Route, parse_routes, route_url};
pub use search::{
    DebounceTicket, FieldPhase, Resolution, SearchPanel, Selection, SuggestionRequest,
    SuggestionResponse,
};
pub use selection::{RouteSelection, SearchCommand};
