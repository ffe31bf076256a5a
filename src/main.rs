pub mod api;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::auth;
pub use modules::email;
pub use modules::user;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::Argon2Hasher;
use crate::auth::application::access_policy::AccessPolicy;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::use_cases::{LoginUserService, LoginUserUseCase};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::services::UserEmailService;
use crate::shared::api::{custom_json_config, custom_query_config};
use crate::shared::config::AppConfig;
use crate::user::adapter::outgoing::{UserQueryPostgres, UserRepositoryPostgres};
use crate::user::application::user_use_cases::UserUseCases;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub user: UserUseCases,
    pub login_user_use_case: Arc<dyn LoginUserUseCase + Send + Sync>,
}

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let config = AppConfig::from_env().map_err(startup_error)?;
    let jwt_config = JwtConfig::from_env().map_err(startup_error)?;
    let access_policy = AccessPolicy::from_env().map_err(startup_error)?;
    let password_hasher = Argon2Hasher::from_env().map_err(startup_error)?;
    let smtp_sender = SmtpEmailSender::from_env().map_err(startup_error)?;

    if !config.is_production() {
        warn!(env = %config.rust_env, "Running outside production");
    }

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.max_db_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(Database::connect(opt).await.map_err(startup_error)?);

    let token_provider: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(jwt_config));
    let password_hasher: Arc<dyn PasswordHasher + Send + Sync> = Arc::new(password_hasher);

    let email_notifier = Arc::new(UserEmailService::new(
        Arc::clone(&token_provider),
        Arc::new(smtp_sender),
        config.app_url.clone(),
    ));

    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));

    let login_user_use_case = LoginUserService::new(
        user_query.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&token_provider),
    );

    let state = AppState {
        user: UserUseCases::new(
            user_query,
            user_repo,
            password_hasher,
            email_notifier,
            Arc::clone(&token_provider),
        ),
        login_user_use_case: Arc::new(login_user_use_case),
    };

    let server_url = config.server_url();
    info!(
        address = %server_url,
        open_registration = access_policy.open_registration(),
        "Server listening"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(access_policy))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::user::adapter::incoming::web::routes as users;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(users::verify_email_handler);
    // Users
    cfg.service(users::list_users_handler);
    cfg.service(users::create_user_handler);
    cfg.service(users::restore_user_handler);
    cfg.service(users::get_user_handler);
    cfg.service(users::put_user_handler);
    cfg.service(users::patch_user_handler);
    cfg.service(users::delete_user_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        error!(error = %e, "Error starting app");
        eprintln!("Error starting app: {e}");
    }
}
