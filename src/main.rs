use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use sensei_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    graphql::{self, create_schema},
    handlers,
    repositories::RefreshTokenRepository,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");
    let schema = create_schema(state.clone());
    let jwt_service = (*state.jwt_service).clone();

    // Hourly sweep of expired refresh tokens
    let refresh_tokens = state.refresh_token_repository.clone();
    tokio::spawn(async move {
        loop {
            match refresh_tokens.delete_expired().await {
                Ok(0) => {}
                Ok(deleted) => log::info!("Deleted {} expired refresh tokens", deleted),
                Err(e) => log::warn!("Failed to delete expired refresh tokens: {}", e),
            }
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
    });

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
            .service(handlers::register)
            .service(handlers::login)
            .service(handlers::refresh_token)
            .route("/graphql", web::post().to(graphql::graphql_entry))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .service(handlers::logout)
                    .service(handlers::get_me)
                    .service(handlers::send_message)
                    .service(handlers::get_chat_history)
                    .service(handlers::generate_quiz)
                    .service(handlers::get_quiz)
                    .service(handlers::submit_quiz_attempt)
                    .service(handlers::list_quiz_attempts),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
