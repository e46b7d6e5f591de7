use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::RedeemCodeRequest};

/// Students redeem here with nothing but the code value; no enrollment in
/// the quiz's course is required.
#[post("/api/redeem")]
async fn redeem_access_code(
    state: web::Data<AppState>,
    request: web::Json<RedeemCodeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let quiz = state
        .redemption_service
        .redeem(&request.code, &auth.0.sub)
        .await?;

    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/api/health")]
async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}
