//! Seating service routes

pub mod activity;
pub mod booking;
pub mod contacts;
pub mod events;

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use identity::require_admin;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the full application router
pub fn create_router(state: AppState) -> Router {
    let jwt = state.identity.jwt().clone();

    let admin_routes = Router::new()
        .route("/logactivity", get(activity::list_activity))
        .route(
            "/logactivity/delete",
            post(activity::delete_activity).delete(activity::delete_activity),
        )
        .route("/events", post(events::create_event))
        .route("/events/update", put(events::update_event))
        .route("/events/delete", delete(events::delete_event))
        .route("/contacts", get(contacts::list_contacts))
        .route_layer(middleware::from_fn_with_state(jwt, require_admin));

    Router::new()
        .route("/health", get(health_check))
        .route("/booking", post(booking::submit_booking))
        .route("/occupied-seats", get(booking::occupied_seats))
        .route("/booking/activity", get(booking::booking_activity))
        .route("/events", get(events::list_events))
        .route("/contact", post(contacts::submit_contact))
        .merge(admin_routes)
        .with_state(state.clone())
        .merge(identity::routes::create_router(state.identity))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "seating"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        booking::{BookingService, BookingWindow},
        clock::testing::FixedClock,
        memory::{MemoryBookingStore, MemoryContactStore, MemoryEventStore},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::TimeZone;
    use chrono_tz::Asia::Jakarta;
    use identity::{
        IdentityService,
        jwt::{JwtConfig, JwtService},
        memory::MemoryUserStore,
        rate_limiter::{RateLimiter, RateLimiterConfig},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        bookings: MemoryBookingStore,
        clock: Arc<FixedClock>,
    }

    fn at(hour: u32) -> chrono::DateTime<chrono_tz::Tz> {
        Jakarta.with_ymd_and_hms(2024, 5, 2, hour, 15, 0).unwrap()
    }

    fn harness() -> Harness {
        let bookings = MemoryBookingStore::new();
        let clock = Arc::new(FixedClock::new(at(9)));
        let identity = IdentityService::new(
            Arc::new(MemoryUserStore::new()),
            JwtService::new(JwtConfig {
                secret: "seating-routes-secret".to_string(),
                token_expiry: 3600,
            }),
            RateLimiter::new(RateLimiterConfig::default()),
        )
        .with_admin_signup(true);

        let state = AppState {
            bookings: BookingService::new(Arc::new(bookings.clone()), BookingWindow::new(7, 20)),
            events: Arc::new(MemoryEventStore::new()),
            contacts: Arc::new(MemoryContactStore::new()),
            identity,
            clock: clock.clone(),
        };

        Harness {
            app: create_router(state),
            bookings,
            clock,
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn login_as(app: &Router, username: &str, role: &str) -> String {
        let response = send(
            app,
            request(
                "POST",
                "/register",
                None,
                Some(json!({
                    "username": username,
                    "full_name": "Test User",
                    "password": "hunter22",
                    "role": role,
                })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(
            app,
            request(
                "POST",
                "/login",
                None,
                Some(json!({ "username": username, "password": "hunter22" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn booking(seat: &str) -> Value {
        json!({
            "full_name": "Siti Aminah",
            "division_name": "Finance",
            "selected_seat": seat,
            "status": "occupied",
        })
    }

    #[tokio::test]
    async fn health_reports_service() {
        let h = harness();
        let response = send(&h.app, request("GET", "/health", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "seating");
    }

    #[tokio::test]
    async fn booking_inside_window_is_created() {
        let h = harness();
        let response = send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["selected_seat"], "A1");
        assert_eq!(body["status"], "occupied");
        assert_eq!(body["id"], h.bookings.bookings()[0].id);

        let response = send(&h.app, request("GET", "/occupied-seats", None, None)).await;
        assert_eq!(json_body(response).await, json!(["A1"]));
    }

    #[tokio::test]
    async fn booking_outside_window_is_forbidden() {
        let h = harness();
        h.clock.set(at(21));

        let response = send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(h.bookings.bookings().is_empty());
        assert!(h.bookings.activity().is_empty());
    }

    #[tokio::test]
    async fn double_booking_conflicts() {
        let h = harness();
        send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;

        let response = send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            json_body(response).await["error"],
            "Seat A1 is already occupied"
        );
    }

    #[tokio::test]
    async fn empty_seat_is_bad_request() {
        let h = harness();
        let response = send(&h.app, request("POST", "/booking", None, Some(booking("  ")))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn booking_rejects_get() {
        let h = harness();
        let response = send(&h.app, request("GET", "/booking", None, None)).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn store_failure_hides_details() {
        let h = harness();
        h.bookings.set_failing(true);

        let response = send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Database error");
    }

    #[tokio::test]
    async fn booking_activity_by_id() {
        let h = harness();
        send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;

        let response = send(
            &h.app,
            request("GET", "/booking/activity?booking_id=1", None, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["division_name"], "Finance");

        let response = send(&h.app, request("GET", "/booking/activity", None, None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn activity_log_is_admin_only() {
        let h = harness();
        send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;
        let member = login_as(&h.app, "budi", "member").await;
        let admin = login_as(&h.app, "boss", "admin").await;

        let response = send(&h.app, request("GET", "/logactivity", None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&h.app, request("GET", "/logactivity", Some(&member), None)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&h.app, request("GET", "/logactivity", Some(&admin), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn admin_deletes_activity_entries() {
        let h = harness();
        send(&h.app, request("POST", "/booking", None, Some(booking("A1")))).await;
        let admin = login_as(&h.app, "boss", "admin").await;

        let response = send(
            &h.app,
            request("DELETE", "/logactivity/delete", Some(&admin), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &h.app,
            request("POST", "/logactivity/delete?id=1", Some(&admin), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(h.bookings.activity().is_empty());
        assert_eq!(h.bookings.bookings().len(), 1);

        let response = send(
            &h.app,
            request("DELETE", "/logactivity/delete?id=1", Some(&admin), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn events_crud() {
        let h = harness();
        let admin = login_as(&h.app, "boss", "admin").await;
        let member = login_as(&h.app, "budi", "member").await;
        let event = json!({ "name": "Town hall", "time": "2024-05-03 10:00", "detail": "Main hall" });

        let response = send(
            &h.app,
            request("POST", "/events", Some(&member), Some(event.clone())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&h.app, request("POST", "/events", Some(&admin), Some(event))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = json_body(response).await["id"].as_i64().unwrap();

        let response = send(
            &h.app,
            request(
                "PUT",
                &format!("/events/update?id={}", id),
                Some(&admin),
                Some(json!({ "name": "Town hall", "time": "2024-05-03 11:00", "detail": "Moved" })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["detail"], "Moved");

        let response = send(&h.app, request("GET", "/events", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["time"], "2024-05-03 11:00");

        let uri = format!("/events/delete?id={}", id);
        let response = send(&h.app, request("DELETE", &uri, Some(&admin), None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&h.app, request("DELETE", &uri, Some(&admin), None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &h.app,
            request("PUT", "/events/update?id=99", Some(&admin), Some(json!({}))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn contact_form_is_public_and_listing_is_admin() {
        let h = harness();
        let response = send(
            &h.app,
            request(
                "POST",
                "/contact",
                None,
                Some(json!({
                    "first_name": "Siti",
                    "last_name": "Aminah",
                    "email": "siti@example.com",
                    "phone": "0812",
                    "message": "Is the lobby open on Saturday?",
                })),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let admin = login_as(&h.app, "boss", "admin").await;
        let response = send(&h.app, request("GET", "/contacts", Some(&admin), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["email"], "siti@example.com");
    }

    fn raw_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn closed_window_wins_over_malformed_body() {
        let h = harness();
        h.clock.set(at(5));

        let response = send(&h.app, raw_post("/booking", "{not json")).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn malformed_body_inside_window_is_bad_request() {
        let h = harness();

        let response = send(&h.app, raw_post("/booking", "{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(h.bookings.bookings().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let h = harness();
        let admin = login_as(&h.app, "boss", "admin").await;

        let response = send(
            &h.app,
            request("DELETE", "/logactivity/delete?id=abc", Some(&admin), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &h.app,
            request("GET", "/booking/activity?booking_id=abc", None, None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
