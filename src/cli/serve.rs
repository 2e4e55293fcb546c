use crate::{api::ApiState, config, error, info, server, warning};

pub async fn serve(addr: Option<String>) {
    let addr = addr.unwrap_or_else(config::server_addr);
    let state = ApiState::from_env();

    if !state.client.credentials_configured() {
        warning!("Spotify credentials are not configured, playlist requests will fail.");
    }

    info!("Serving moodlist API on http://{}", addr);
    if let Err(e) = server::start_api_server(&addr, state).await {
        error!("Server stopped. Err: {}", e);
    }
}
