mod config;
mod model;
mod web;

use actix_web::{middleware::Logger, App, HttpServer, web::Data};
use dotenv::dotenv;
use log::{info, error};

use config::Settings;
use model::ModelManager;
use web::{cors, routes};

// App state structure
struct AppState {
    model: ModelManager,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Character Decomposition API");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Allowing cross-origin requests from {}", settings.allowed_origin);

    let app_state = Data::new(AppState {
        model: ModelManager::new(),
    });

    let allowed_origin = settings.allowed_origin.clone();
    let json_limit = settings.json_limit;

    info!("Listening on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors::build(&allowed_origin))
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .app_data(routes::json_config(json_limit))
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
