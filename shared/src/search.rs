//! Search panel: two independent autocomplete fields plus the submit action.
//!
//! The panel is a pure state machine. It never touches timers or the network
//! itself; instead it hands out [`DebounceTicket`]s and [`SuggestionRequest`]s
//! for the shell to schedule, and consumes the results when they come back.
//!
//! Each field walks `Idle -> Debouncing -> Fetching -> Idle`. Two counters keep
//! the field honest:
//!
//! - the debounce generation, bumped on every keystroke, so only the latest
//!   armed timer can settle the field;
//! - the request sequence, bumped on every issued fetch (and on anything that
//!   invalidates one), so only the latest response is applied.

use crate::{
    coordinate::Coordinate,
    error::{GeocodeError, SubmitError},
    geocode::{FieldKind, Suggestion},
    selection::{RouteSelection, SearchCommand},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPhase {
    #[default]
    Idle,
    Debouncing,
    Fetching,
}

/// Handle for one armed debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub kind: FieldKind,
    pub generation: u64,
}

/// A fetch the shell must perform on behalf of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub kind: FieldKind,
    pub seq: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct SuggestionResponse {
    pub kind: FieldKind,
    pub seq: u64,
    pub result: Result<Vec<Suggestion>, GeocodeError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(usize),
    Failed,
    Stale,
}

/// Result of picking a suggestion: the coordinate to publish upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub kind: FieldKind,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Default)]
pub struct SearchField {
    text: String,
    settled: String,
    suggestions: Vec<Suggestion>,
    phase: FieldPhase,
    generation: u64,
    latest_seq: u64,
}

impl SearchField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    fn invalidate_request(&mut self) {
        self.latest_seq += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    origin: SearchField,
    destination: SearchField,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, kind: FieldKind) -> &SearchField {
        match kind {
            FieldKind::Origin => &self.origin,
            FieldKind::Destination => &self.destination,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut SearchField {
        match kind {
            FieldKind::Origin => &mut self.origin,
            FieldKind::Destination => &mut self.destination,
        }
    }

    /// Records a keystroke and arms a fresh debounce window, superseding any
    /// ticket previously handed out for this field.
    pub fn input_changed(&mut self, kind: FieldKind, text: impl Into<String>) -> DebounceTicket {
        let field = self.field_mut(kind);
        field.text = text.into();
        field.generation += 1;
        field.phase = FieldPhase::Debouncing;
        DebounceTicket {
            kind,
            generation: field.generation,
        }
    }

    /// Settles the field once its debounce window elapsed. Returns the fetch
    /// to issue, if any.
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<SuggestionRequest> {
        let field = self.field_mut(ticket.kind);
        if ticket.generation != field.generation {
            log::debug!(
                "ignoring superseded {} debounce ticket {} (current {})",
                ticket.kind.as_str(),
                ticket.generation,
                field.generation
            );
            return None;
        }
        if field.phase != FieldPhase::Debouncing {
            return None;
        }

        if field.text == field.settled {
            field.phase = FieldPhase::Idle;
            return None;
        }
        field.settled = field.text.clone();

        if field.settled.trim().is_empty() {
            field.suggestions.clear();
            field.invalidate_request();
            field.phase = FieldPhase::Idle;
            return None;
        }

        field.latest_seq += 1;
        field.phase = FieldPhase::Fetching;
        log::info!(
            "fetching {} suggestions for {:?} (seq {})",
            ticket.kind.as_str(),
            field.settled,
            field.latest_seq
        );
        Some(SuggestionRequest {
            kind: ticket.kind,
            seq: field.latest_seq,
            query: field.settled.clone(),
        })
    }

    /// Applies a fetch result if it answers the latest request for its field.
    pub fn suggestions_resolved(&mut self, response: SuggestionResponse) -> Resolution {
        let field = self.field_mut(response.kind);
        if response.seq != field.latest_seq {
            log::debug!(
                "discarding stale {} suggestions (seq {}, latest {})",
                response.kind.as_str(),
                response.seq,
                field.latest_seq
            );
            return Resolution::Stale;
        }

        if field.phase == FieldPhase::Fetching {
            field.phase = FieldPhase::Idle;
        }
        match response.result {
            Ok(suggestions) => {
                let count = suggestions.len();
                field.suggestions = suggestions;
                Resolution::Applied(count)
            }
            Err(err) => {
                log::error!("Error fetching {} suggestions: {err}", response.kind.as_str());
                Resolution::Failed
            }
        }
    }

    /// Commits the suggestion at `index` into its field and closes the
    /// dropdown. The other field is left untouched.
    pub fn select(&mut self, kind: FieldKind, index: usize) -> Option<Selection> {
        let field = self.field_mut(kind);
        let suggestion = field.suggestions.get(index)?.clone();

        field.text = suggestion.label.clone();
        field.settled = suggestion.label;
        field.suggestions.clear();
        field.generation += 1;
        field.invalidate_request();
        field.phase = FieldPhase::Idle;

        Some(Selection {
            kind,
            coordinate: suggestion.coordinate,
        })
    }

    /// Turns the current selection into a one-shot search command.
    pub fn submit(&self, selection: &RouteSelection) -> Result<SearchCommand, SubmitError> {
        match (selection.origin(), selection.destination()) {
            (Some(origin), Some(destination)) => Ok(SearchCommand {
                origin,
                destination,
            }),
            _ => Err(SubmitError::MissingEndpoints),
        }
    }
}
