//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use crate::domain::ports::{AuthService, OrganisationsQuery, TokenIssuer};
use crate::domain::{AccountService, MembershipService, UserId};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryMembershipRepository;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

const TEST_SECRET: &[u8] = b"membership-test-secret";

fn test_tokens() -> Arc<JwtTokenIssuer> {
    Arc::new(JwtTokenIssuer::new(
        TEST_SECRET,
        chrono::Duration::hours(24),
        Arc::new(mockable::DefaultClock),
    ))
}

fn state_from(
    repository: Arc<InMemoryMembershipRepository>,
    tokens: Arc<dyn TokenIssuer>,
) -> HttpState {
    // Minimal Argon2 cost keeps the suite fast.
    let hasher = Argon2PasswordHasher::with_params(1024, 1, 1).expect("valid argon2 params");
    let auth = AccountService::new(repository.clone(), Arc::new(hasher), tokens.clone());
    let memberships = Arc::new(MembershipService::new(repository));
    HttpState::new(HttpStatePorts {
        auth: Arc::new(auth),
        profiles: memberships.clone(),
        organisations: memberships.clone(),
        memberships,
        tokens,
    })
}

/// State backed by the in-memory repository and real adapters.
pub fn memory_state() -> HttpState {
    state_from(
        Arc::new(InMemoryMembershipRepository::default()),
        test_tokens(),
    )
}

/// [`memory_state`] with a substitute token verifier.
pub fn state_with_tokens(tokens: Arc<dyn TokenIssuer>) -> HttpState {
    state_from(Arc::new(InMemoryMembershipRepository::default()), tokens)
}

/// [`memory_state`] with a substitute authentication service.
pub fn state_with_auth(auth: Arc<dyn AuthService>) -> HttpState {
    HttpState {
        auth,
        ..memory_state()
    }
}

/// [`memory_state`] with a substitute organisation query.
pub fn state_with_organisations(organisations: Arc<dyn OrganisationsQuery>) -> HttpState {
    HttpState {
        organisations,
        ..memory_state()
    }
}

/// Sign a token for `user_id` with the state's issuer.
pub fn token_for(state: &HttpState, user_id: &UserId) -> String {
    state
        .tokens
        .issue(user_id)
        .expect("token issues")
        .as_str()
        .to_owned()
}

/// App with every API route mounted over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(NormalizePath::trim())
        .configure(configure_api)
}

/// Identity returned by [`register`].
pub struct Registered {
    pub user_id: String,
    pub token: String,
}

/// Register a user through the API and return their id and token.
pub async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    first_name: &str,
) -> Registered {
    let req = actix_test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "firstName": first_name,
            "lastName": "Tester",
            "email": email,
            "password": "correct horse",
        }))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());
    let body: Value = actix_test::read_body_json(res).await;
    Registered {
        user_id: body["data"]["user"]["userId"]
            .as_str()
            .expect("user id")
            .to_owned(),
        token: body["data"]["accessToken"]
            .as_str()
            .expect("access token")
            .to_owned(),
    }
}
