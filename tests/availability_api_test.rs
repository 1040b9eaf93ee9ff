mod common;

use axum::http::StatusCode;
use chrono::Weekday;
use serde_json::json;

use common::{next_weekday, parse_body, TestApp};

fn slot_starts(body: &serde_json::Value) -> Vec<String> {
    body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start_time"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn empty_weekday_offers_the_full_grid() {
    let app = TestApp::new().await;
    let service_id = app.seed_service("Haircut", 60, 0).await;

    let date = next_weekday(Weekday::Mon, 2);
    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, date))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let starts = slot_starts(&body);
    assert_eq!(starts.len(), 17);
    assert_eq!(starts.first().unwrap(), "09:00");
    assert_eq!(starts.last().unwrap(), "17:00");
}

#[tokio::test]
async fn existing_booking_shifts_following_slots_off_grid() {
    let app = TestApp::new().await;
    let service_id = app.seed_service("Haircut", 60, 0).await;
    let date = next_weekday(Weekday::Mon, 2);

    let res = app
        .post_json(
            "/api/v1/bookings",
            json!({
                "service_id": service_id,
                "date": date.to_string(),
                "start_time": "10:00",
                "name": "Ada",
                "phone": "15550001",
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, date))
        .await;
    let starts = slot_starts(&parse_body(res).await);

    assert!(starts.contains(&"09:00".to_string()), "slots: {:?}", starts);
    assert!(!starts.contains(&"09:30".to_string()));
    assert!(!starts.contains(&"10:00".to_string()));
    assert!(!starts.contains(&"10:30".to_string()));
    assert!(!starts.contains(&"11:00".to_string()));
    assert!(starts.contains(&"11:15".to_string()), "slots: {:?}", starts);
    assert!(starts.contains(&"11:45".to_string()));
}

#[tokio::test]
async fn sunday_is_closed_until_an_allow_exception_opens_it() {
    let app = TestApp::new().await;
    let service_id = app.seed_service("Haircut", 60, 0).await;
    let sunday = next_weekday(Weekday::Sun, 2);

    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, sunday))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(slot_starts(&parse_body(res).await).is_empty());

    let res = app
        .admin_post(
            "/api/v1/admin/exceptions",
            json!({
                "date": sunday.to_string(),
                "start_time": "10:00",
                "end_time": "14:00",
                "exception_type": "allow",
                "description": "special opening",
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, sunday))
        .await;
    let starts = slot_starts(&parse_body(res).await);
    assert_eq!(starts, vec!["10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00"]);
}

#[tokio::test]
async fn block_exception_removes_covered_slots() {
    let app = TestApp::new().await;
    let service_id = app.seed_service("Haircut", 60, 0).await;
    let date = next_weekday(Weekday::Tue, 2);

    let res = app
        .admin_post(
            "/api/v1/admin/exceptions",
            json!({
                "date": date.to_string(),
                "start_time": "12:00",
                "end_time": "13:00",
                "exception_type": "block",
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, date))
        .await;
    let starts = slot_starts(&parse_body(res).await);
    assert!(starts.contains(&"11:00".to_string()));
    assert!(!starts.contains(&"11:30".to_string()));
    assert!(!starts.contains(&"12:00".to_string()));
    assert!(!starts.contains(&"12:30".to_string()));
    assert!(starts.contains(&"13:00".to_string()));
}

#[tokio::test]
async fn preparation_time_widens_the_occupied_span() {
    let app = TestApp::new().await;
    // 60 minutes in the chair plus 15 of cleanup.
    let service_id = app.seed_service("Coloring", 60, 15).await;
    let date = next_weekday(Weekday::Wed, 2);

    let res = app
        .post_json(
            "/api/v1/bookings",
            json!({
                "service_id": service_id,
                "date": date.to_string(),
                "start_time": "10:00",
                "name": "Bea",
                "phone": "15550002",
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, date))
        .await;
    let starts = slot_starts(&parse_body(res).await);
    // Booking occupies 10:00-11:15; with the 15-minute break the next
    // start is 11:30.
    assert!(!starts.contains(&"11:15".to_string()));
    assert!(starts.contains(&"11:30".to_string()), "slots: {:?}", starts);
}

#[tokio::test]
async fn availability_rejects_unknown_service_and_past_dates() {
    let app = TestApp::new().await;
    let service_id = app.seed_service("Haircut", 60, 0).await;

    let date = next_weekday(Weekday::Mon, 2);
    let res = app
        .get(&format!("/api/v1/availability?service_id=nope&date={}", date))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let past = chrono::Local::now().date_naive() - chrono::TimeDelta::days(3);
    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, past))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let far = chrono::Local::now().date_naive() + chrono::TimeDelta::days(90);
    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, far))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deactivated_service_disappears_from_public_surfaces() {
    let app = TestApp::new().await;
    let service_id = app.seed_service("Haircut", 60, 0).await;

    let res = app
        .request(axum::http::Method::DELETE, &format!("/api/v1/admin/services/{}", service_id), None, true)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/v1/services").await;
    let body = parse_body(res).await;
    assert!(body.as_array().unwrap().is_empty());

    let date = next_weekday(Weekday::Mon, 2);
    let res = app
        .get(&format!("/api/v1/availability?service_id={}&date={}", service_id, date))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
