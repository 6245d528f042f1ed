use crate::{coordinate::Coordinate, geocode::FieldKind};

/// The coordinates chosen so far. Owned by the top-level model and lent to
/// the search panel (submit) and the map panel (markers, routing).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteSelection {
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
}

impl RouteSelection {
    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn get(&self, kind: FieldKind) -> Option<Coordinate> {
        match kind {
            FieldKind::Origin => self.origin,
            FieldKind::Destination => self.destination,
        }
    }

    /// Stores `coordinate` for `kind`. Returns whether the value changed.
    pub fn set(&mut self, kind: FieldKind, coordinate: Option<Coordinate>) -> bool {
        let slot = match kind {
            FieldKind::Origin => &mut self.origin,
            FieldKind::Destination => &mut self.destination,
        };
        let changed = *slot != coordinate;
        *slot = coordinate;
        changed
    }
}

/// One-shot request to route between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCommand {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let mut selection = RouteSelection::default();
        let delhi = Coordinate::new(28.7041, 77.1025);
        assert!(selection.set(FieldKind::Origin, Some(delhi)));
        assert!(!selection.set(FieldKind::Origin, Some(delhi)));
        assert_eq!(selection.origin(), Some(delhi));
        assert_eq!(selection.get(FieldKind::Destination), None);
    }
}
