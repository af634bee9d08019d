use std::sync::Arc;

use wardcast_model::ModelStore;
use wardcast_server::config::ServerConfig;
use wardcast_server::routes::{app, AppState};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = ServerConfig::from_env();
    let store = match ModelStore::load(&config.models_dir) {
        Ok(store) => store,
        Err(err) => {
            log::error!("cannot start without model artifacts: {err}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        store,
        defaults: config.defaults,
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await.unwrap();
    println!("wardcast_server listening on http://{}", config.addr);
    axum::serve(listener, app(state)).await.unwrap();
}
