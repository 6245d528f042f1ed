use std::time::Duration;

use seed::{prelude::*, *};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use shared::{
    AppConfig, Coordinate, DebounceTicket, FieldKind, FieldPhase, GeocodeError, MapPanel, MapView,
    Resolution, Route, RouteId, RouteOutcome, RouteSelection, RouteStart, RoutingError,
    SearchCommand, SearchPanel, SuggestionRequest, SuggestionResponse, parse_routes,
    parse_suggestions, route_url, search::SearchField, suggestion_url,
};
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(options: JsValue);
    #[wasm_bindgen(js_name = setView)]
    fn set_view(lat: f64, lon: f64, zoom: u8);
    #[wasm_bindgen(js_name = setPlaceMarker)]
    fn set_place_marker(kind: &str, coord: JsValue);
    #[wasm_bindgen(js_name = showRoute)]
    fn show_route(route_id: f64, path: JsValue, vehicle: JsValue);
    #[wasm_bindgen(js_name = moveVehicle)]
    fn move_vehicle(route_id: f64, lat: f64, lon: f64);
    #[wasm_bindgen(js_name = removeRoute)]
    fn remove_route(route_id: f64);
}

pub struct Model {
    config: AppConfig,
    search: SearchPanel,
    selection: RouteSelection,
    map: MapPanel,
    origin_timer: Option<CmdHandle>,
    destination_timer: Option<CmdHandle>,
    // Dropping these cancels the pending vehicle moves.
    animation: Vec<CmdHandle>,
}

impl Model {
    fn debounce_timer(&mut self, kind: FieldKind) -> &mut Option<CmdHandle> {
        match kind {
            FieldKind::Origin => &mut self.origin_timer,
            FieldKind::Destination => &mut self.destination_timer,
        }
    }
}

pub enum Msg {
    InputChanged(FieldKind, String),
    DebounceElapsed(DebounceTicket),
    SuggestionsFetched(SuggestionResponse),
    SuggestionPicked(FieldKind, usize),
    Submit,
    RouteFetched(RouteId, Result<Vec<Route>, RoutingError>),
    VehicleStep(RouteId, usize),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions<'a> {
    center: Coordinate,
    zoom: u8,
    tile_url: &'a str,
    attribution: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleMarker<'a> {
    lat: f64,
    lon: f64,
    icon_url: &'a str,
    icon_size: [u32; 2],
    icon_anchor: [u32; 2],
}

pub fn init(_: Url, _: &mut impl Orders<Msg>) -> Model {
    let config = AppConfig::from_build_env();
    let map = MapPanel::new(&config);
    Model {
        config,
        search: SearchPanel::new(),
        selection: RouteSelection::default(),
        map,
        origin_timer: None,
        destination_timer: None,
        animation: Vec::new(),
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::InputChanged(kind, text) => {
            let ticket = model.search.input_changed(kind, text);
            let handle = orders.perform_cmd_with_handle(cmds::timeout(
                timer_ms(model.config.debounce),
                move || Msg::DebounceElapsed(ticket),
            ));
            // Replacing the handle cancels the previous window.
            *model.debounce_timer(kind) = Some(handle);
        }
        Msg::DebounceElapsed(ticket) => {
            *model.debounce_timer(ticket.kind) = None;
            if let Some(request) = model.search.debounce_elapsed(ticket) {
                orders.perform_cmd(fetch_suggestions(model.config.clone(), request));
            }
        }
        Msg::SuggestionsFetched(response) => {
            if model.search.suggestions_resolved(response) == Resolution::Stale {
                orders.skip();
            }
        }
        Msg::SuggestionPicked(kind, index) => {
            if let Some(selection) = model.search.select(kind, index) {
                *model.debounce_timer(kind) = None;
                apply_endpoint(model, selection.kind, Some(selection.coordinate));
            }
        }
        Msg::Submit => match model.search.submit(&model.selection) {
            Ok(command) => run_search(model, command, orders),
            Err(err) => {
                if window().alert_with_message(&err.to_string()).is_err() {
                    log::error!("failed to show alert: {err}");
                }
            }
        },
        Msg::RouteFetched(id, result) => match model.map.route_resolved(id, result) {
            RouteOutcome::Animate(plan) => {
                let vehicle = VehicleMarker {
                    lat: plan.vehicle_start.lat,
                    lon: plan.vehicle_start.lon,
                    icon_url: &model.config.vehicle_icon.url,
                    icon_size: model.config.vehicle_icon.size,
                    icon_anchor: model.config.vehicle_icon.anchor,
                };
                show_route(
                    route_key(plan.route),
                    to_value(&plan.path).unwrap_or(JsValue::NULL),
                    to_value(&vehicle).unwrap_or(JsValue::NULL),
                );

                model.animation = plan
                    .steps
                    .iter()
                    .map(|step| {
                        let (route, index) = (plan.route, step.index);
                        orders.perform_cmd_with_handle(cmds::timeout(timer_ms(step.delay), move || {
                            Msg::VehicleStep(route, index)
                        }))
                    })
                    .collect();
            }
            RouteOutcome::Failed => {}
            RouteOutcome::Stale => {
                orders.skip();
            }
        },
        Msg::VehicleStep(id, index) => {
            orders.skip();
            if let Some(position) = model.map.vehicle_position(id, index) {
                move_vehicle(route_key(id), position.lat, position.lon);
            }
        }
    }
}

fn apply_endpoint(model: &mut Model, kind: FieldKind, coordinate: Option<Coordinate>) {
    model.selection.set(kind, coordinate);
    let update = model.map.set_endpoint(kind, coordinate);
    if let Some(id) = update.teardown {
        clear_route(model, id);
    }

    let marker = update
        .marker
        .and_then(|coord| to_value(&coord).ok())
        .unwrap_or(JsValue::NULL);
    set_place_marker(kind.as_str(), marker);

    if let Some(MapView { center, zoom }) = update.view {
        set_view(center.lat, center.lon, zoom);
    }
}

fn run_search(model: &mut Model, command: SearchCommand, orders: &mut impl Orders<Msg>) {
    // Invalid waypoints are logged by the map panel; nothing else to do.
    if let Ok(start) = model.map.start_route(command) {
        if let Some(id) = start.teardown {
            clear_route(model, id);
        }
        orders.perform_cmd(fetch_route(model.config.clone(), start));
    }
}

fn clear_route(model: &mut Model, id: RouteId) {
    model.animation.clear();
    remove_route(route_key(id));
}

async fn fetch_suggestions(config: AppConfig, request: SuggestionRequest) -> Msg {
    let result = match suggestion_url(&config, &request.query) {
        Err(err) => Err(err),
        Ok(None) => Ok(Vec::new()),
        Ok(Some(url)) => match fetch_text(url.to_string(), true).await {
            Ok(body) => parse_suggestions(&body),
            Err(err) => Err(GeocodeError::Transport(err)),
        },
    };

    Msg::SuggestionsFetched(SuggestionResponse {
        kind: request.kind,
        seq: request.seq,
        result,
    })
}

async fn fetch_route(config: AppConfig, start: RouteStart) -> Msg {
    let result = match route_url(&config, start.origin, start.destination) {
        Err(err) => Err(err),
        // The router reports failures in a JSON envelope even on 4xx.
        Ok(url) => match fetch_text(url.to_string(), false).await {
            Ok(body) => parse_routes(&body),
            Err(err) => Err(RoutingError::Transport(err)),
        },
    };

    Msg::RouteFetched(start.id, result)
}

async fn fetch_text(url: String, check_status: bool) -> Result<String, String> {
    log::debug!("GET {url}");
    let raw = Request::new(url)
        .method(Method::Get)
        .fetch()
        .await
        .map_err(|err| format!("{err:?}"))?;
    let resp = if check_status {
        raw.check_status().map_err(|err| format!("{err:?}"))?
    } else {
        raw
    };
    resp.text().await.map_err(|err| format!("{err:?}"))
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["search-panel"],
        h2!["Show Route"],
        view_field(model.search.field(FieldKind::Origin), FieldKind::Origin),
        view_field(
            model.search.field(FieldKind::Destination),
            FieldKind::Destination
        ),
        button![
            C!["search-btn"],
            "Search",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Submit
            }),
        ],
        view_route_summary(model.map.current_route()),
    ]
}

fn view_field(field: &SearchField, kind: FieldKind) -> Node<Msg> {
    let suggestions = field
        .suggestions()
        .iter()
        .enumerate()
        .map(|(index, suggestion)| {
            li![
                el_key(&suggestion.id),
                C!["suggestion"],
                &suggestion.label,
                ev(Ev::Click, move |_| Msg::SuggestionPicked(kind, index)),
            ]
        });

    div![
        C!["search-field"],
        label![attrs! { At::For => kind.as_str() }, kind.label()],
        input![
            attrs! {
                At::Id => kind.as_str(),
                At::Type => "text",
                At::Value => field.text(),
                At::Placeholder => placeholder(kind),
                At::AutoComplete => "off",
                At::SpellCheck => "false",
            },
            input_ev(Ev::Input, move |text| Msg::InputChanged(kind, text)),
        ],
        if field.phase() == FieldPhase::Fetching {
            small![C!["searching"], "Searching…"]
        } else {
            empty![]
        },
        if field.is_open() {
            ul![C!["suggestions"], suggestions]
        } else {
            empty![]
        }
    ]
}

fn view_route_summary(route: Option<&Route>) -> Node<Msg> {
    match route {
        Some(route) => div![
            C!["route-summary"],
            p![format_distance(route.distance_km())],
            route
                .duration_minutes()
                .map(|minutes| p![format_duration(minutes)])
                .unwrap_or_else(|| empty![]),
        ],
        None => empty![],
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"[frontend] logger already initialised".into());
    }

    let config = AppConfig::from_build_env();
    let options = MapOptions {
        center: config.initial_view.center,
        zoom: config.initial_view.zoom,
        tile_url: &config.tile_url,
        attribution: &config.tile_attribution,
    };
    init_map(to_value(&options).unwrap_or(JsValue::NULL));

    App::start("app", init, update, view);
}

fn route_key(id: RouteId) -> f64 {
    id.0 as f64
}

fn timer_ms(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

fn placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Origin => "Enter origin",
        FieldKind::Destination => "Enter destination",
    }
}

fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

fn format_duration(minutes: f64) -> String {
    let total = minutes.round() as u64;
    if total >= 60 {
        format!("{} h {:02} min", total / 60, total % 60)
    } else {
        format!("{total} min")
    }
}
