//! User profile handler.
//!
//! ```text
//! GET /api/users/{userId}
//! Authorization: Bearer <token>
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{ErrorBody, SuccessBody};
use crate::inbound::http::schemas::UserBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Fetch a profile visible to the caller.
///
/// Users who share no organisation with the caller are reported as missing.
#[utoipa::path(
    get,
    path = "/api/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found successfully; `data` holds the profile", body = UserBody),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    caller: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let target = parse_user_id(&path.into_inner())?;
    let user = state.profiles.fetch_user(caller.user_id(), &target).await?;
    Ok(SuccessBody::with_data("User found successfully", UserBody::from(&user))
        .respond(StatusCode::OK))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::inbound::http::test_utils::{memory_state, register, test_app};
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn get_user(uri: &str, token: &str) -> actix_test::TestRequest {
        actix_test::TestRequest::get()
            .uri(uri)
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
    }

    #[actix_web::test]
    async fn caller_can_read_own_profile() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = register(&app, "ada@example.com", "Ada").await;
        let res = actix_test::call_service(
            &app,
            get_user(&format!("/api/users/{}", ada.user_id), &ada.token).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "User found successfully");
        assert_eq!(body["data"]["userId"], ada.user_id);

        let again = actix_test::call_service(
            &app,
            get_user(&format!("/api/users/{}", ada.user_id), &ada.token).to_request(),
        )
        .await;
        let again: Value = actix_test::read_body_json(again).await;
        assert_eq!(again, body);
    }

    #[actix_web::test]
    async fn strangers_are_hidden() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = register(&app, "ada@example.com", "Ada").await;
        let charles = register(&app, "charles@example.com", "Charles").await;
        let res = actix_test::call_service(
            &app,
            get_user(&format!("/api/users/{}", charles.user_id), &ada.token).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "Not Found");
        assert_eq!(body["message"], "User not found");
    }

    #[actix_web::test]
    async fn malformed_id_is_a_client_error() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = register(&app, "ada@example.com", "Ada").await;
        let res = actix_test::call_service(
            &app,
            get_user("/api/users/not-a-uuid", &ada.token).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "Client error");
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorised() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = register(&app, "ada@example.com", "Ada").await;
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/users/{}", ada.user_id))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "Unauthorized");
        assert_eq!(body["message"], "Not authorised to access this resource");
    }

    #[actix_web::test]
    async fn forged_token_is_rejected() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = register(&app, "ada@example.com", "Ada").await;
        let res = actix_test::call_service(
            &app,
            get_user(&format!("/api/users/{}", ada.user_id), "not.a.jwt").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "Invalid jwt token");
        assert_eq!(body["statusCode"], 401);
    }
}
