//! Prints one page of a dashboard list as JSON.
//!
//! Usage: `backoffice-dashboard <morale|physique|alerts|history> [offset]`.
//! Credentials come from `APP_EMAIL`/`APP_PASSWORD`, or a ready token from `APP_TOKEN`.

use std::env;
use std::process::ExitCode;

use dotenvy::dotenv;
use serde::Serialize;
use serde_json::json;

use backoffice_dashboard::domain::types::PageLimit;
use backoffice_dashboard::fetch::{AuthenticatedFetchClient, ReqwestTransport};
use backoffice_dashboard::forms::auth::LoginForm;
use backoffice_dashboard::models::config::DashboardConfig;
use backoffice_dashboard::query::QueryUpdate;
use backoffice_dashboard::services::resources::{
    Alerts, CorporateClients, History, IndividualClients,
};
use backoffice_dashboard::services::{ServiceError, ServiceResult, auth};
use backoffice_dashboard::session::AuthSession;
use backoffice_dashboard::sync::{ControllerState, ListResource, ListSync, ListSyncController};

type Client = AuthenticatedFetchClient<ReqwestTransport, AuthSession>;

async fn print_page<R>(client: Client, limit: PageLimit, offset: usize) -> Result<(), String>
where
    R: ListResource,
    R::Entity: Serialize,
{
    let list = ListSync::new(ListSyncController::<R>::new(limit), client);
    if offset > 0 {
        list.set_query(QueryUpdate::new().offset(offset)).await;
    } else {
        list.refetch().await;
    }

    let output = match &list.state() {
        ControllerState::Ready { query, page, .. } => json!({
            "resource": R::NAME,
            "offset": query.offset,
            "limit": query.limit,
            "has_more": page.has_more,
            "items": page.items,
        }),
        ControllerState::Errored { message, .. } => return Err(message.clone()),
        _ => return Err(format!("{} did not finish loading", R::NAME)),
    };

    let rendered = serde_json::to_string_pretty(&output).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}

async fn authenticate(client: &Client, session: &AuthSession) -> ServiceResult<()> {
    if let Ok(token) = env::var("APP_TOKEN")
        && !token.trim().is_empty()
    {
        session.start(token);
        return Ok(());
    }

    match (env::var("APP_EMAIL"), env::var("APP_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            auth::login(client, session, LoginForm { email, password }).await
        }
        _ => {
            log::info!("No credentials configured, requesting anonymously");
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let resource = args.next().unwrap_or_else(|| "morale".to_string());
    let offset = match args.next().map(|raw| raw.parse::<usize>()) {
        None => 0,
        Some(Ok(offset)) => offset,
        Some(Err(err)) => {
            log::error!("Invalid offset: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let config = match DashboardConfig::load(&app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading dashboard config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let limit = match config.page_limit() {
        Ok(limit) => limit,
        Err(err) => {
            log::error!("Invalid page limit: {}", ServiceError::from(err));
            return ExitCode::FAILURE;
        }
    };

    let transport = match ReqwestTransport::new(&config.backend_url, config.request_timeout()) {
        Ok(transport) => transport,
        Err(err) => {
            log::error!("Error creating HTTP transport: {err}");
            return ExitCode::FAILURE;
        }
    };

    let session = AuthSession::global().clone();
    let client = AuthenticatedFetchClient::new(transport, session.clone());

    if let Err(err) = authenticate(&client, &session).await {
        log::error!("Failed to log in: {}", err.user_message());
        return ExitCode::FAILURE;
    }

    let result = match resource.as_str() {
        "morale" => print_page::<CorporateClients>(client, limit, offset).await,
        "physique" => print_page::<IndividualClients>(client, limit, offset).await,
        "alerts" => print_page::<Alerts>(client, limit, offset).await,
        "history" => print_page::<History>(client, limit, offset).await,
        other => Err(format!(
            "unknown resource `{other}`, expected morale, physique, alerts or history"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("Failed to load page: {message}");
            ExitCode::FAILURE
        }
    }
}
