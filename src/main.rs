use std::path::Path;

use astra::Server;

use crate::app::App;
use crate::router::respond;

mod app;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod handlers;
mod listing;
mod logging;
mod responses;
mod router;
mod spreadsheets;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    if let Err(e) = logging::init(Path::new("logs")) {
        eprintln!("Could not set up logging: {e}");
    }

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };
    let max_workers = config.server.max_workers;

    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, max_workers, "starting server");

    let result = Server::bind(&addr)
        .max_workers(max_workers)
        .serve(move |req, _info| respond(req, &app));

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
