use rescuebag::server::routes::route_request;
use rescuebag::server::AppState;
use rescuebag::storage::MemoryStore;

fn state(debug_tools: bool) -> AppState {
    AppState::new(Box::new(MemoryStore::new()), debug_tools)
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response should be valid json")
}

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request(&state(false), "GET", "/api/health", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
}

#[test]
fn tiers_endpoint_lists_ladder_in_rank_order() {
    let response = route_request(&state(false), "GET", "/api/tiers", "");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    let names: Vec<&str> = payload["tiers"]
        .as_array()
        .expect("tiers should be an array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["joe", "shrek", "zeus"]);
    assert!(payload["tiers"][2]["max_orders"].is_null());
}

#[test]
fn fresh_session_starts_at_joe_with_theme() {
    let response = route_request(&state(false), "GET", "/api/progression", "");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["progression"]["completed_orders"], 0);
    assert_eq!(payload["progression"]["current_tier"], "joe");
    assert_eq!(payload["progression"]["next_tier"], "shrek");
    assert_eq!(payload["progression"]["orders_remaining"], 5);
    assert_eq!(payload["data_tier"], "joe");
    assert!(payload["theme"]["--primary"].is_string());
    assert!(payload["upgrade"].is_null());
}

#[test]
fn completing_fifth_order_celebrates_once() {
    let state = state(false);
    route_request(&state, "GET", "/api/progression", "");
    for _ in 0..4 {
        let response = route_request(&state, "POST", "/api/orders/complete", "");
        assert!(json(&response.body)["upgrade"].is_null());
    }

    let response = route_request(&state, "POST", "/api/orders/complete", "");
    let payload = json(&response.body);
    assert_eq!(payload["progression"]["current_tier"], "shrek");
    assert_eq!(payload["upgrade"]["from"], "joe");
    assert_eq!(payload["upgrade"]["to"], "shrek");
    assert_eq!(payload["celebration"]["modals"][0]["tier_name"], "shrek");
    assert_eq!(payload["celebration"]["confetti"][0]["burst"]["kind"], "single");

    let again = json(&route_request(&state, "GET", "/api/progression", "").body);
    assert!(again["upgrade"].is_null());
    assert!(again.get("celebration").is_none());
}

#[test]
fn set_orders_jumps_tiers_and_rejects_negative() {
    let state = state(false);
    route_request(&state, "GET", "/api/progression", "");

    let response = route_request(&state, "PUT", "/api/orders", r#"{"completed_orders":25}"#);
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["progression"]["current_tier"], "zeus");
    assert_eq!(payload["progression"]["progress_percent"], 100.0);
    assert_eq!(payload["celebration"]["confetti"][0]["burst"]["kind"], "waves");

    let response = route_request(&state, "PUT", "/api/orders", r#"{"completed_orders":-1}"#);
    assert_eq!(response.status_code, 400);

    let response = route_request(&state, "PUT", "/api/orders", "{bad json}");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn lowering_the_counter_does_not_celebrate() {
    let state = state(false);
    route_request(&state, "PUT", "/api/orders", r#"{"completed_orders":20}"#);
    let response = route_request(&state, "PUT", "/api/orders", r#"{"completed_orders":19}"#);
    let payload = json(&response.body);
    assert_eq!(payload["progression"]["current_tier"], "shrek");
    assert!(payload["upgrade"].is_null());
}

#[test]
fn debug_cycle_is_hidden_unless_enabled() {
    let response = route_request(&state(false), "POST", "/api/debug/cycle", "");
    assert_eq!(response.status_code, 404);

    let state = state(true);
    let steps: Vec<u64> = (0..3)
        .map(|_| {
            let response = route_request(&state, "POST", "/api/debug/cycle", "");
            assert_eq!(response.status_code, 200);
            json(&response.body)["progression"]["completed_orders"]
                .as_u64()
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(steps, vec![5, 20, 0]);
}

#[test]
fn theme_css_follows_active_tier() {
    let state = state(false);
    route_request(&state, "PUT", "/api/orders", r#"{"completed_orders":6}"#);
    let response = route_request(&state, "GET", "/theme.css", "");
    assert_eq!(response.status_code, 200);
    assert!(response.content_type.starts_with("text/css"));
    assert!(response.body.starts_with(":root {"));
    assert!(response.body.contains("--primary: #6a9a1f;"));
}

#[test]
fn availability_endpoint_evaluates_per_day_schedule() {
    let body = r#"{
        "shop": {"id": "s-1", "name": "Bakery", "business_hours": {"mon": {"open": "09:00", "close": "21:00"}}, "bags_available": 3},
        "at": "2024-06-03T20:59"
    }"#;
    let response = route_request(&state(false), "POST", "/api/shops/availability", body);
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["availability"]["open_now"], true);
    assert_eq!(payload["availability"]["can_reserve"], true);
    assert_eq!(payload["availability"]["today_label"], "09:00 - 21:00");

    let closing = body.replace("20:59", "21:00");
    let payload = json(&route_request(&state(false), "POST", "/api/shops/availability", &closing).body);
    assert_eq!(payload["availability"]["open_now"], false);
}

#[test]
fn availability_endpoint_rejects_bad_timestamp() {
    let body = r#"{"shop": {}, "at": "tomorrow-ish"}"#;
    let response = route_request(&state(false), "POST", "/api/shops/availability", body);
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("tomorrow-ish"));
}

#[test]
fn unknown_route_returns_404() {
    let response = route_request(&state(false), "GET", "/api/bags", "");
    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("Route not found"));
}
