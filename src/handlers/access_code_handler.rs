use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_teacher, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{ExtendCodeRequest, GenerateCodeRequest, PaginationParams},
        response::{AccessCodeDto, AccessLogDto, AccessLogPage},
    },
};

#[post("/api/access-codes")]
async fn generate_access_code(
    state: web::Data<AppState>,
    request: web::Json<GenerateCodeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;
    request.validate()?;

    let request = request.into_inner();
    let code = state
        .access_code_service
        .generate(
            &request.quiz_id,
            &auth.0.sub,
            request.expiry_minutes,
            request.max_usage,
        )
        .await?;

    Ok(HttpResponse::Created().json(AccessCodeDto::from(code)))
}

#[post("/api/access-codes/{id}/revoke")]
async fn revoke_access_code(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    state
        .access_code_service
        .revoke(&id.into_inner(), &auth.0.sub)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "access code revoked" })))
}

#[post("/api/access-codes/{id}/extend")]
async fn extend_access_code(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<ExtendCodeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;
    request.validate()?;

    let code = state
        .access_code_service
        .extend(&id.into_inner(), &auth.0.sub, request.additional_minutes)
        .await?;

    Ok(HttpResponse::Ok().json(AccessCodeDto::from(code)))
}

#[post("/api/access-codes/{id}/regenerate")]
async fn regenerate_access_code(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let code = state
        .access_code_service
        .regenerate(&id.into_inner(), &auth.0.sub)
        .await?;

    Ok(HttpResponse::Created().json(AccessCodeDto::from(code)))
}

#[get("/api/access-codes/{id}/accesses")]
async fn list_code_accesses(
    state: web::Data<AppState>,
    id: web::Path<String>,
    pagination: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;
    pagination.validate()?;

    let (entries, total) = state
        .access_log_service
        .list_accesses(
            &id.into_inner(),
            &auth.0.sub,
            pagination.offset(),
            pagination.limit(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(AccessLogPage {
        data: entries.into_iter().map(AccessLogDto::from).collect(),
        total,
    }))
}

#[get("/api/quizzes/{id}/access-codes")]
async fn list_quiz_access_codes(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let codes = state
        .access_code_service
        .list_for_quiz(&id.into_inner(), &auth.0.sub)
        .await?;

    let dtos: Vec<AccessCodeDto> = codes.into_iter().map(AccessCodeDto::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn assert_error_status(status: actix_web::http::StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    #[actix_web::test]
    async fn test_generate_endpoint_rejects_unauthenticated() {
        let app = test::init_service(App::new().service(generate_access_code)).await;

        let req = test::TestRequest::post()
            .uri("/api/access-codes")
            .set_json(serde_json::json!({ "quiz_id": "quiz-1", "expiry_minutes": 60 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        // No JWT service or token configured, so extraction must fail
        assert_error_status(resp.status());
    }

    #[actix_web::test]
    async fn test_revoke_endpoint_rejects_unauthenticated() {
        let app = test::init_service(App::new().service(revoke_access_code)).await;

        let req = test::TestRequest::post()
            .uri("/api/access-codes/some-id/revoke")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
