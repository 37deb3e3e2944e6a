use crate::domain::timesheet::{Actor, Role};
use crate::errors::AppError;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderMap;
use uuid::Uuid;

/// The caller's stable identity, resolved by the portal's gateway.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// The caller's role, resolved by the portal's gateway.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Authentication happens upstream; this service only trusts the actor the
/// gateway forwards and rejects requests that arrive without one.
pub async fn actor(mut req: Request, next: Next) -> Result<Response, AppError> {
    let actor = resolve_actor(req.headers()).ok_or(AppError::Unauthorized(Some(
        "missing or invalid actor headers".to_string(),
    )))?;

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}

fn resolve_actor(headers: &HeaderMap) -> Option<Actor> {
    let id = headers.get(ACTOR_ID_HEADER)?.to_str().ok()?;
    let role = headers.get(ACTOR_ROLE_HEADER)?.to_str().ok()?;

    Some(Actor {
        id: Uuid::parse_str(id).ok()?,
        role: role.parse::<Role>().ok()?,
    })
}
