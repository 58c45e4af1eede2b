//! src/startup.rs
use crate::configuration::Settings;
use crate::email::Mailer;
use crate::routes::{book, course_bookings, health_check, json_error_handler, list_courses};
use crate::store;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sqlx::SqlitePool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Public address of the service, as seen from outgoing emails.
#[derive(Debug, Clone)]
pub struct ApplicationBaseUrl(pub String);

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// Connect and seed the database, then bind the listener.
pub async fn build(config: Settings) -> Result<Application, anyhow::Error> {
    let pool = store::connect(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    store::migrate(&pool)
        .await
        .context("Failed to migrate the database")?;
    store::seed_courses(&pool, &config.courses, config.database.reset_on_startup)
        .await
        .context("Failed to seed courses")?;

    let mailer = Mailer::from_settings(&config.email)?;

    let address = format!("{}:{}", config.application.host, config.application.port);
    let tcp_listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    let port = tcp_listener.local_addr()?.port();
    tracing::info!("Listening on {}:{}", config.application.host, port);

    let server = run(tcp_listener, pool, mailer, config.application.base_url)?;

    Ok(Application { port, server })
}

pub fn run(
    listener: TcpListener,
    pool: SqlitePool,
    mailer: Mailer,
    base_url: String,
) -> Result<Server, std::io::Error> {
    let pool = web::Data::new(pool);
    let mailer = web::Data::new(mailer);
    let base_url = web::Data::new(ApplicationBaseUrl(base_url));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health_check", web::get().to(health_check))
            .route("/book", web::post().to(book))
            .route("/courses", web::get().to(list_courses))
            .route("/courses/{course_id}/bookings", web::get().to(course_bookings))
            .app_data(pool.clone())
            .app_data(mailer.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
