//! Login, sign-up and logout against `/auth/*`.

use serde::Serialize;
use serde_json::Value;

use crate::dto::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::fetch::{AuthenticatedFetchClient, FetchError, HttpTransport, REQUEST_FAILED};
use crate::forms::auth::{LoginForm, LoginPayload, SignupForm, SignupPayload};
use crate::query::RequestDescriptor;
use crate::services::{ServiceError, ServiceResult};
use crate::session::{AuthSession, TokenSource};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

const LOGIN_FAILED: &str = "Invalid credentials";
const REGISTRATION_FAILED: &str = "Registration failed";

fn post<B: Serialize>(path: &str, body: &B) -> ServiceResult<RequestDescriptor> {
    let body = serde_json::to_value(body).map_err(|err| FetchError::Decode(err.to_string()))?;
    Ok(RequestDescriptor::post_json(path, body))
}

/// Replaces the generic HTTP failure message with a screen-specific one.
fn with_fallback(err: FetchError, fallback: &str) -> FetchError {
    match err {
        FetchError::Http { status, message } if message == REQUEST_FAILED => FetchError::Http {
            status,
            message: fallback.to_string(),
        },
        other => other,
    }
}

/// Checks the credentials, exchanges them for a token and starts `session`.
pub async fn login<T, S>(
    client: &AuthenticatedFetchClient<T, S>,
    session: &AuthSession,
    form: LoginForm,
) -> ServiceResult<()>
where
    T: HttpTransport,
    S: TokenSource,
{
    let payload = LoginPayload::try_from(form)?;
    let descriptor = post(
        LOGIN_PATH,
        &LoginRequest {
            email: &payload.email,
            password: &payload.password,
        },
    )?;

    // A 2xx body that is not JSON carries no token.
    let body = match client.request_with_token(&descriptor, None).await {
        Ok(body) => body,
        Err(FetchError::Decode(_)) => Value::Null,
        Err(err) => return Err(with_fallback(err, LOGIN_FAILED).into()),
    };

    let response: LoginResponse = serde_json::from_value(body).unwrap_or_default();
    let token = response
        .access_token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            log::error!("Login for {} returned no token", payload.email);
            ServiceError::MissingToken
        })?;

    session.start(token);
    log::info!("Logged in as {}", payload.email);
    Ok(())
}

/// Creates an account. The session is left untouched; the user logs in afterwards.
pub async fn register<T, S>(
    client: &AuthenticatedFetchClient<T, S>,
    form: SignupForm,
) -> ServiceResult<()>
where
    T: HttpTransport,
    S: TokenSource,
{
    let payload = SignupPayload::try_from(form)?;
    let descriptor = post(
        REGISTER_PATH,
        &RegisterRequest {
            username: &payload.username,
            email: &payload.email,
            password: &payload.password,
        },
    )?;

    client
        .send_with_token(&descriptor, None)
        .await
        .map_err(|err| with_fallback(err, REGISTRATION_FAILED))?;

    log::info!("Registered account {}", payload.email);
    Ok(())
}

/// Drops the token; later requests go out anonymously.
pub fn logout(session: &AuthSession) {
    session.clear();
}
