use shared::{
    AppConfig, Coordinate, FieldKind, MapPanel, RouteOutcome, RouteSelection, SearchPanel,
    SubmitError, SuggestionResponse, parse_routes, parse_suggestions, suggestion_url,
};

const ORIGIN_RESULTS: &str = r#"[
    {"place_id": 101, "display_name": "Delhi, India", "lat": "28.7041", "lon": "77.1025"},
    {"place_id": 102, "display_name": "Delhi Cantonment, Delhi, India", "lat": "28.5921", "lon": "77.1316"}
]"#;

const DESTINATION_RESULTS: &str = r#"[
    {"place_id": 201, "display_name": "Noida, Uttar Pradesh, India", "lat": "28.5355", "lon": "77.3910"}
]"#;

const THREE_VERTEX_ROUTE: &str = r#"{
    "code": "Ok",
    "routes": [{
        "geometry": {"type": "LineString", "coordinates": [[77.1025, 28.7041], [77.25, 28.62], [77.391, 28.5355]]},
        "distance": 34100.0,
        "duration": 2640.0
    }]
}"#;

/// Drives the two panels the way the browser shell does, with canned
/// provider payloads standing in for the network.
struct App {
    config: AppConfig,
    search: SearchPanel,
    selection: RouteSelection,
    map: MapPanel,
    network_calls: usize,
    overlays: Vec<u64>,
}

impl App {
    fn new() -> Self {
        let config = AppConfig::default();
        let map = MapPanel::new(&config);
        Self {
            config,
            search: SearchPanel::new(),
            selection: RouteSelection::default(),
            map,
            network_calls: 0,
            overlays: Vec::new(),
        }
    }

    fn type_and_settle(&mut self, kind: FieldKind, text: &str, payload: &str) {
        let ticket = self.search.input_changed(kind, text);
        if let Some(request) = self.search.debounce_elapsed(ticket) {
            let url = suggestion_url(&self.config, &request.query).unwrap();
            assert!(url.is_some());
            self.network_calls += 1;
            self.search.suggestions_resolved(SuggestionResponse {
                kind,
                seq: request.seq,
                result: parse_suggestions(payload),
            });
        }
    }

    fn pick(&mut self, kind: FieldKind, index: usize) {
        let selection = self.search.select(kind, index).unwrap();
        self.selection.set(kind, Some(selection.coordinate));
        let update = self.map.set_endpoint(kind, Some(selection.coordinate));
        if let Some(id) = update.teardown {
            self.overlays.retain(|o| *o != id.0);
        }
    }

    fn submit(&mut self, route_payload: &str) -> Result<Vec<(u128, Coordinate)>, SubmitError> {
        let command = self.search.submit(&self.selection)?;
        let start = self.map.start_route(command).unwrap();
        if let Some(id) = start.teardown {
            self.overlays.retain(|o| *o != id.0);
        }
        match self.map.route_resolved(start.id, parse_routes(route_payload)) {
            RouteOutcome::Animate(plan) => {
                assert_eq!(plan.vehicle_start, command.origin);
                self.overlays.push(plan.route.0);
                Ok(plan
                    .steps
                    .iter()
                    .map(|s| (s.delay.as_millis(), s.position))
                    .collect())
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}

#[test]
fn full_search_animates_vehicle_along_route() {
    let mut app = App::new();
    app.type_and_settle(FieldKind::Origin, "Delhi", ORIGIN_RESULTS);
    app.type_and_settle(FieldKind::Destination, "Noida", DESTINATION_RESULTS);
    assert_eq!(app.network_calls, 2);
    assert_eq!(app.search.field(FieldKind::Origin).suggestions().len(), 2);

    app.pick(FieldKind::Origin, 0);
    app.pick(FieldKind::Destination, 0);
    assert_eq!(app.map.view().center, Coordinate::new(28.7041, 77.1025));
    assert_eq!(app.search.field(FieldKind::Destination).text(), "Noida, Uttar Pradesh, India");

    let schedule = app.submit(THREE_VERTEX_ROUTE).unwrap();
    let delays: Vec<u128> = schedule.iter().map(|(d, _)| *d).collect();
    assert_eq!(delays, vec![0, 50, 100]);
    assert_eq!(schedule[2].1, Coordinate::new(28.5355, 77.391));
    assert_eq!(app.overlays.len(), 1);

    let summary = app.map.current_route().unwrap();
    assert!((summary.distance_km() - 34.1).abs() < 1e-9);
    assert_eq!(summary.duration_minutes(), Some(44.0));
}

#[test]
fn submit_with_one_endpoint_is_rejected() {
    let mut app = App::new();
    app.type_and_settle(FieldKind::Origin, "Delhi", ORIGIN_RESULTS);
    app.pick(FieldKind::Origin, 0);

    assert_eq!(app.submit(THREE_VERTEX_ROUTE), Err(SubmitError::MissingEndpoints));
    assert!(app.map.active_route().is_none());
    assert!(app.overlays.is_empty());
}

#[test]
fn rerun_replaces_overlay_and_replays_same_path() {
    let mut app = App::new();
    app.type_and_settle(FieldKind::Origin, "Delhi", ORIGIN_RESULTS);
    app.type_and_settle(FieldKind::Destination, "Noida", DESTINATION_RESULTS);
    app.pick(FieldKind::Origin, 0);
    app.pick(FieldKind::Destination, 0);

    let first = app.submit(THREE_VERTEX_ROUTE).unwrap();
    let second = app.submit(THREE_VERTEX_ROUTE).unwrap();
    assert_eq!(first, second);
    assert_eq!(app.overlays.len(), 1);
}

#[test]
fn new_origin_after_run_removes_overlay() {
    let mut app = App::new();
    app.type_and_settle(FieldKind::Origin, "Delhi", ORIGIN_RESULTS);
    app.type_and_settle(FieldKind::Destination, "Noida", DESTINATION_RESULTS);
    app.pick(FieldKind::Origin, 0);
    app.pick(FieldKind::Destination, 0);
    app.submit(THREE_VERTEX_ROUTE).unwrap();

    app.type_and_settle(FieldKind::Origin, "Delhi Cantt", ORIGIN_RESULTS);
    app.pick(FieldKind::Origin, 1);
    assert!(app.overlays.is_empty());
    assert!(app.map.active_route().is_none());
    assert_eq!(app.map.view().center, Coordinate::new(28.5921, 77.1316));
}

#[test]
fn clearing_a_field_makes_no_network_call() {
    let mut app = App::new();
    app.type_and_settle(FieldKind::Origin, "Delhi", ORIGIN_RESULTS);
    assert_eq!(app.network_calls, 1);

    app.type_and_settle(FieldKind::Origin, "", ORIGIN_RESULTS);
    assert_eq!(app.network_calls, 1);
    assert!(app.search.field(FieldKind::Origin).suggestions().is_empty());
}
