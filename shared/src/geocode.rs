use serde::{Deserialize, Serialize};
use url::Url;

use crate::{config::AppConfig, coordinate::Coordinate, error::GeocodeError};

/// Which of the two search fields an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Origin,
    Destination,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Origin => "Origin",
            FieldKind::Destination => "Destination",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Origin => "origin",
            FieldKind::Destination => "destination",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
    pub coordinate: Coordinate,
}

/// Builds the search URL for `query`, or `None` when the query is blank and no
/// request should be made at all.
pub fn suggestion_url(config: &AppConfig, query: &str) -> Result<Option<Url>, GeocodeError> {
    if query.trim().is_empty() {
        return Ok(None);
    }
    let url = Url::parse_with_params(
        &config.geocoder_url,
        &[("q", query), ("format", "json"), ("addressdetails", "1")],
    )?;
    Ok(Some(url))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaceId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct Place {
    place_id: PlaceId,
    display_name: String,
    lat: NumberOrText,
    lon: NumberOrText,
}

impl From<Place> for Suggestion {
    fn from(place: Place) -> Self {
        let id = match place.place_id {
            PlaceId::Number(n) => n.to_string(),
            PlaceId::Text(s) => s,
        };
        Suggestion {
            id,
            label: place.display_name,
            coordinate: Coordinate::from_text(&place.lat.into_text(), &place.lon.into_text()),
        }
    }
}

/// Decodes a geocoder search response, preserving the provider's ranking.
pub fn parse_suggestions(body: &str) -> Result<Vec<Suggestion>, GeocodeError> {
    let places: Vec<Place> = serde_json::from_str(body)?;
    Ok(places.into_iter().map(Suggestion::from).collect())
}
