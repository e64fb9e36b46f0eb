//! Card session handlers - mount, act, end.

use std::sync::Arc;

use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;
use uuid::Uuid;

use recipe_core::card::{CardAction, CardLoad};
use recipe_core::service::CardSession;
use recipe_infra::RecordingNavigator;
use recipe_shared::dto::CardResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::identity::OptionalViewer;
use crate::sessions::SessionSlot;
use crate::state::AppState;

fn to_json<T: Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

/// POST /api/recipes/{post_id}/cards
///
/// A failed load answers with the terminal error view rather than a problem body.
pub async fn mount(
    state: web::Data<AppState>,
    viewer: OptionalViewer,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let navigator = Arc::new(RecordingNavigator::new());

    let viewer_id = viewer.user_id().map(str::to_string);
    let card = match CardSession::mount(
        state.recipes.clone(),
        navigator.clone(),
        post_id.clone(),
        viewer_id,
    )
    .await
    {
        Ok(card) => card,
        Err(err) => {
            tracing::warn!(post_id = %post_id, error = %err, "Card load failed");
            let message = err.to_string();
            let status = AppError::from(err).status_code();
            return Ok(HttpResponse::build(status).json(CardResponse {
                session_id: None,
                view: to_json(&CardLoad::Failed(&message).render())?,
                prompt: None,
                navigate_to: Vec::new(),
            }));
        }
    };

    let view = to_json(&card.render())?;
    let session_id = state.sessions.insert(SessionSlot { card, navigator }).await;

    Ok(HttpResponse::Created().json(CardResponse {
        session_id: Some(session_id.to_string()),
        view,
        prompt: None,
        navigate_to: Vec::new(),
    }))
}

/// POST /api/cards/{session_id}/actions
pub async fn act(
    state: web::Data<AppState>,
    viewer: OptionalViewer,
    path: web::Path<Uuid>,
    body: web::Json<CardAction>,
) -> AppResult<HttpResponse> {
    let session_id = path.into_inner();
    let action = body.into_inner();

    let response = state
        .sessions
        .with(session_id, |slot| -> AppResult<CardResponse> {
            if slot.card.viewer() != viewer.user_id() {
                return Err(AppError::Forbidden(
                    "Card session belongs to another viewer".to_string(),
                ));
            }

            // Durable writes run detached; the response does not wait for them
            let dispatched = slot.card.dispatch(&action);
            let prompt = dispatched.prompt.as_ref().map(to_json).transpose()?;

            Ok(CardResponse {
                session_id: Some(session_id.to_string()),
                view: to_json(&slot.card.render())?,
                prompt,
                navigate_to: slot.navigator.take(),
            })
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Card session {} not found", session_id)))??;

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/cards/{session_id}
pub async fn end(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let session_id = path.into_inner();
    if state.sessions.remove(session_id).await {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!(
            "Card session {} not found",
            session_id
        )))
    }
}
