//! HTTP handlers and route configuration.

mod cards;
mod health;
mod recipes;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Recipe posts
            .service(
                web::scope("/recipes")
                    .route("", web::post().to(recipes::create))
                    .route("/{post_id}", web::get().to(recipes::get))
                    .route("/{post_id}", web::put().to(recipes::update))
                    .route("/{post_id}/cards", web::post().to(cards::mount)),
            )
            // Card sessions
            .service(
                web::scope("/cards")
                    .route("/{session_id}/actions", web::post().to(cards::act))
                    .route("/{session_id}", web::delete().to(cards::end)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use recipe_infra::InMemoryRecordStore;

    use crate::config::AppConfig;
    use crate::middleware::identity::{USER_ID_HEADER, USER_ROLES_HEADER};
    use crate::state::AppState;

    fn state() -> AppState {
        AppState::with_store(&AppConfig::default(), Arc::new(InMemoryRecordStore::new()))
    }

    fn soup() -> Value {
        json!({
            "title": "Soup",
            "picture": "http://x/y.png",
            "ingredients": "Water\nSalt",
            "instructions": "Boil\nSeason"
        })
    }

    #[actix_rt::test]
    async fn test_recipe_card_round_trip() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        // Create as a moderator
        let req = test::TestRequest::post()
            .uri("/api/recipes")
            .insert_header((USER_ID_HEADER, "t2_cook"))
            .insert_header((USER_ROLES_HEADER, "moderator"))
            .set_json(soup())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let post_id = body["data"]["postId"].as_str().unwrap().to_string();

        // Read it back
        let req = test::TestRequest::get()
            .uri(&format!("/api/recipes/{post_id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["ingredients"], "Water\nSalt");
        assert_eq!(body["data"]["author"], "t2_cook");

        // Mount a card as another user
        let req = test::TestRequest::post()
            .uri(&format!("/api/recipes/{post_id}/cards"))
            .insert_header((USER_ID_HEADER, "t2_guest"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();
        assert_eq!(body["view"]["type"], "z_stack");

        // Save, then open the menu
        for action in [json!({"action": "save"}), json!({"action": "toggle_menu"})] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/cards/{session_id}/actions"))
                .insert_header((USER_ID_HEADER, "t2_guest"))
                .set_json(action)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert!(body.get("prompt").is_none());
        }

        let req = test::TestRequest::post()
            .uri(&format!("/api/cards/{session_id}/actions"))
            .insert_header((USER_ID_HEADER, "t2_guest"))
            .set_json(json!({"action": "new"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["prompt"]["form"], "create");

        // Someone else may not drive this session
        let req = test::TestRequest::post()
            .uri(&format!("/api/cards/{session_id}/actions"))
            .insert_header((USER_ID_HEADER, "t2_other"))
            .set_json(json!({"action": "toggle_view"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // End the session
        let req = test::TestRequest::delete()
            .uri(&format!("/api/cards/{session_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::post()
            .uri(&format!("/api/cards/{session_id}/actions"))
            .insert_header((USER_ID_HEADER, "t2_guest"))
            .set_json(json!({"action": "toggle_view"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_health_counts_open_cards() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["open_cards"], 0);
    }

    #[actix_rt::test]
    async fn test_create_requires_moderator_and_valid_form() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/recipes")
            .insert_header((USER_ID_HEADER, "t2_guest"))
            .set_json(soup())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/recipes")
            .set_json(soup())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/recipes")
            .insert_header((USER_ID_HEADER, "t2_cook"))
            .insert_header((USER_ROLES_HEADER, "moderator"))
            .set_json(json!({"title": "", "picture": "", "ingredients": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[actix_rt::test]
    async fn test_missing_recipe_mounts_error_view() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/recipes/t3_missing/cards")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert!(body.get("sessionId").is_none());
        assert_eq!(body["view"]["style"], "error");
        assert!(
            body["view"]["text"]
                .as_str()
                .unwrap()
                .starts_with("Error: ")
        );
    }
}
