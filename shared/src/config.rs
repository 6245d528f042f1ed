use std::time::Duration;

use crate::coordinate::Coordinate;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_ROUTER_URL: &str = "https://router.project-osrm.org/route/v1";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Where the map sits before anything is selected (New Delhi).
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 28.613939,
    lon: 77.209023,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleIcon {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub geocoder_url: String,
    pub router_url: String,
    pub routing_profile: String,
    pub tile_url: String,
    pub tile_attribution: String,
    /// Quiet period after the last keystroke before a suggestion fetch.
    pub debounce: Duration,
    /// Delay between consecutive vehicle positions, multiplied by vertex index.
    pub animation_step: Duration,
    pub initial_view: MapView,
    pub recenter_zoom: u8,
    pub vehicle_icon: VehicleIcon,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            router_url: DEFAULT_ROUTER_URL.to_string(),
            routing_profile: "driving".to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            debounce: Duration::from_millis(500),
            animation_step: Duration::from_millis(50),
            initial_view: MapView {
                center: DEFAULT_CENTER,
                zoom: 15,
            },
            recenter_zoom: 11,
            vehicle_icon: VehicleIcon {
                url: "assets/vehicle.svg".to_string(),
                size: [50, 50],
                anchor: [25, 50],
            },
        }
    }
}

impl AppConfig {
    /// Defaults with endpoint overrides baked in at compile time.
    pub fn from_build_env() -> Self {
        Self::default().with_overrides(
            option_env!("ROUTE_SEARCH_GEOCODER_URL"),
            option_env!("ROUTE_SEARCH_ROUTER_URL"),
            option_env!("ROUTE_SEARCH_TILE_URL"),
        )
    }

    fn with_overrides(
        mut self,
        geocoder: Option<&str>,
        router: Option<&str>,
        tiles: Option<&str>,
    ) -> Self {
        if let Some(url) = geocoder.filter(|url| !url.trim().is_empty()) {
            self.geocoder_url = url.trim().to_string();
        }
        if let Some(url) = router.filter(|url| !url.trim().is_empty()) {
            self.router_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(url) = tiles.filter(|url| !url.trim().is_empty()) {
            self.tile_url = url.trim().to_string();
        }
        self
    }
}
