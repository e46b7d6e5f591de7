use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizpass_server::{app_state::AppState, auth::JwtService, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let state = AppState::new(config.clone())
        .await
        .expect("failed to initialise application state");
    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::generate_access_code)
            .service(handlers::revoke_access_code)
            .service(handlers::extend_access_code)
            .service(handlers::regenerate_access_code)
            .service(handlers::list_code_accesses)
            .service(handlers::list_quiz_access_codes)
            .service(handlers::redeem_access_code)
    })
    .bind((host, port))?
    .run()
    .await
}
