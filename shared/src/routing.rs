use serde::Deserialize;
use url::Url;

use crate::{
    config::AppConfig,
    coordinate::{Coordinate, polyline_length_km},
    error::RoutingError,
};

/// One candidate route as returned by the router.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub coordinates: Vec<Coordinate>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
}

impl Route {
    pub fn distance_km(&self) -> f64 {
        self.distance_m
            .map(|m| m / 1000.0)
            .unwrap_or_else(|| polyline_length_km(&self.coordinates))
    }

    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration_s.map(|s| s / 60.0)
    }
}

/// URL for a driving route between two waypoints. Waypoints are encoded
/// `lon,lat` as the router expects.
pub fn route_url(
    config: &AppConfig,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<Url, RoutingError> {
    let base = format!(
        "{}/{}/{},{};{},{}",
        config.router_url.trim_end_matches('/'),
        config.routing_profile,
        origin.lon,
        origin.lat,
        destination.lon,
        destination.lat
    );
    let url = Url::parse_with_params(
        &base,
        &[
            ("overview", "full"),
            ("geometries", "geojson"),
            ("alternatives", "true"),
            ("steps", "false"),
        ],
    )?;
    Ok(url)
}

#[derive(Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Deserialize)]
struct RawRoute {
    geometry: Geometry,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

/// Decodes a router response into its candidate routes, first one preferred.
pub fn parse_routes(body: &str) -> Result<Vec<Route>, RoutingError> {
    let response: RouteResponse = serde_json::from_str(body)?;
    if response.code != "Ok" {
        return Err(RoutingError::Api {
            message: response.message.unwrap_or_else(|| response.code.clone()),
            code: response.code,
        });
    }

    Ok(response
        .routes
        .into_iter()
        .map(|raw| Route {
            coordinates: raw
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate { lat, lon })
                .collect(),
            distance_m: raw.distance,
            duration_s: raw.duration,
        })
        .collect())
}
