use actix_web::middleware::{self, TrailingSlash};
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use blog_api::config::ServerConfig;
use blog_api::db::{establish_connection_pool, run_migrations};
use blog_api::repository::DieselRepository;
use blog_api::routes::configure;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to prepare the database: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    log::info!(
        "Starting {} on {}:{}",
        blog_api::SERVICE_NAME,
        config.address,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::new(TrailingSlash::Always))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .configure(configure)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
