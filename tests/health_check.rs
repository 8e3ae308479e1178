use actix_web::{test, web, App};
use chrono::DateTime;
use todo_server::{health_check, not_found};

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(
        App::new().route("/health", web::get().to(health_check)),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert!(DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
}

#[actix_web::test]
async fn test_unmatched_route_is_404_with_message() {
    let app = test::init_service(
        App::new()
            .route("/health", web::get().to(health_check))
            .default_service(web::route().to(not_found)),
    )
    .await;

    let req = test::TestRequest::get().uri("/no/such/route").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["message"].as_str().is_some());
}
