//! HTTP handlers and route configuration.

mod articles;
mod auth;
mod categories;
mod dashboard;
mod health;
mod settings;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Content routes - reads are public, mutations need a session
            .service(
                web::scope("/articles")
                    .route("", web::get().to(articles::list))
                    .route("", web::post().to(articles::create))
                    .route("/{id}", web::get().to(articles::get))
                    .route("/{id}", web::put().to(articles::update))
                    .route("/{id}", web::delete().to(articles::delete)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::get().to(categories::get))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            )
            .route("/dashboard/stats", web::get().to(dashboard::stats))
            // Admin-only back office
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("", web::post().to(users::create)),
            )
            .service(
                web::scope("/settings")
                    .route("", web::get().to(settings::get))
                    .route("", web::put().to(settings::update)),
            ),
    );
}
