use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use glide_core::{AircraftCatalog, AircraftRecord, SiteCatalog, SiteRecord};

use crate::{api, config::Config, state::AppState};

fn setup_app() -> axum::Router {
    let sites = SiteCatalog::new(vec![
        SiteRecord {
            id: "lake".into(),
            name: "Lake Landout".into(),
            type_code: "L".into(),
            description: "Dry lake".into(),
            latitude: 34.5614,
            longitude: -117.6045,
            altitude_msl: 3500.0,
        },
        SiteRecord {
            id: "tower".into(),
            name: "Tower".into(),
            type_code: "T".into(),
            description: String::new(),
            latitude: 34.62,
            longitude: -117.70,
            altitude_msl: 3100.0,
        },
    ]);
    let aircraft = AircraftCatalog::new(vec![AircraftRecord {
        make: "Schleicher".into(),
        model: "ASK 21".into(),
        glide_ratio: 34.0,
        still_air_speed: 49.0,
    }]);
    let state = AppState::with_catalogs(Config::default(), sites, aircraft);
    api::app(Arc::new(state))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn footprint_request() -> Value {
    json!({
        "site_ids": ["lake", "tower"],
        "aircraft": {"kind": "custom", "glide_ratio": 40, "still_air_speed_kt": 51},
        "wind_speed_kt": 0,
        "wind_direction_deg": 0,
        "spacing": {"range": {"start_ft": 3000, "end_ft": 6500, "step_ft": 3500}}
    })
}

#[tokio::test]
async fn health_and_request_id() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn lists_catalogs() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/v1/sites").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let sites = read_json(res).await;
    assert_eq!(sites.as_array().unwrap().len(), 2);
    assert_eq!(sites[0]["id"], "lake");

    let res = app
        .oneshot(Request::builder().uri("/v1/aircraft").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let aircraft = read_json(res).await;
    assert_eq!(aircraft[0]["model"], "ASK 21");
}

#[tokio::test]
async fn computes_footprints() {
    let app = setup_app();

    let res = app
        .oneshot(post_json("/v1/footprints", footprint_request()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert!(body["generated_at"].is_string());

    let footprints = &body["footprints"];
    assert_eq!(footprints["markers"].as_array().unwrap().len(), 2);

    let bands = footprints["bands"].as_array().unwrap();
    assert_eq!(bands.len(), 2);
    // Lake arrival is 4500 ft MSL: nothing at 3000, one outline at 6500.
    assert_eq!(bands[0]["altitude_ft"], 3000.0);
    assert!(bands[0]["outlines"].as_array().unwrap().is_empty());
    let outlines = bands[1]["outlines"].as_array().unwrap();
    assert_eq!(outlines.len(), 1);
    assert_eq!(outlines[0]["points"].as_array().unwrap().len(), 36);
    assert_eq!(outlines[0]["label_anchors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn computes_geojson() {
    let app = setup_app();

    let res = app
        .oneshot(post_json("/v1/footprints/geojson", footprint_request()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["type"], "FeatureCollection");
    let features = body["features"].as_array().unwrap();
    let count = |kind: &str| {
        features
            .iter()
            .filter(|f| f["properties"]["kind"] == kind)
            .count()
    };
    assert_eq!(count("site"), 2);
    assert_eq!(count("footprint"), 1);
    assert_eq!(count("label"), 4);
}

#[tokio::test]
async fn rejects_unknown_site_and_aircraft() {
    let app = setup_app();

    let mut request = footprint_request();
    request["site_ids"] = json!(["atlantis"]);
    let res = app
        .clone()
        .oneshot(post_json("/v1/footprints", request))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["kind"], "unknown_site");
    assert!(body["error"].as_str().unwrap().contains("atlantis"));

    let mut request = footprint_request();
    request["aircraft"] = json!({"kind": "catalog", "make": "Piper", "model": "Cub"});
    let res = app
        .oneshot(post_json("/v1/footprints", request))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["kind"], "unknown_aircraft");
}

#[tokio::test]
async fn rejects_empty_site_set_and_bad_numbers() {
    let app = setup_app();

    let res = app
        .clone()
        .oneshot(post_json(
            "/v1/footprints",
            json!({
                "aircraft": {"kind": "catalog", "make": "schleicher", "model": "ask 21"}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["kind"], "empty_site_set");

    let mut request = footprint_request();
    request["wind_speed_kt"] = json!(-10);
    let res = app
        .oneshot(post_json("/v1/footprints", request))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["kind"], "invalid_wind");
}

#[tokio::test]
async fn user_sites_need_no_catalog() {
    let app = setup_app();

    let res = app
        .oneshot(post_json(
            "/v1/footprints",
            json!({
                "user_sites": [{"name": "Farm", "lat": 35.0, "lon": -118.0, "altitude_ft": 2500}],
                "aircraft": {"kind": "custom", "glide_ratio": 30, "still_air_speed_kt": 45},
                "arrival_agl_ft": 500,
                "spacing": "legacy"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    let markers = body["footprints"]["markers"].as_array().unwrap();
    assert_eq!(markers[0]["id"], "user-1");
    assert_eq!(markers[0]["arrival_altitude_msl"], 3000.0);
    // Legacy bands start at 3000 ft, which is exactly the arrival altitude.
    assert_eq!(body["footprints"]["bands"].as_array().unwrap().len(), 7);
}
