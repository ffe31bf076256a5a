pub mod app_state_builder;
pub mod auth_helper;
pub mod doubles;
pub mod fixtures;
pub mod in_memory_users;
pub mod log_capture;
pub mod stubs;

/// Builds a test service with the app data every user route relies on:
/// state, token provider, open-registration access policy and the JSON
/// and query error handlers.
macro_rules! init_app {
    ($state:expr, $($service:expr),+ $(,)?) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .app_data(actix_web::web::Data::new(
                    $crate::tests::support::auth_helper::test_token_provider(),
                ))
                .app_data(actix_web::web::Data::new(
                    $crate::auth::application::access_policy::AccessPolicy::default(),
                ))
                .app_data($crate::shared::api::custom_json_config())
                .app_data($crate::shared::api::custom_query_config())
                $(.service($service))+
        )
        .await
    };
}

pub(crate) use init_app;
