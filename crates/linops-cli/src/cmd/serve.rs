use linops_server::AppState;

use crate::config::FileConfig;

pub async fn run(
    config: &FileConfig,
    port: u16,
    secret_env: Option<String>,
    forward_url: Option<String>,
) -> anyhow::Result<()> {
    let secret_env = secret_env
        .or_else(|| config.webhook.secret_env.clone())
        .unwrap_or_else(|| "LINOPS_WEBHOOK_SECRET".to_string());
    let secret = std::env::var(&secret_env).ok().filter(|s| !s.is_empty());
    if secret.is_none() {
        tracing::warn!(
            env = %secret_env,
            "no webhook secret set; running without signature verification"
        );
    }

    let forward_url = forward_url.or_else(|| config.webhook.forward_url.clone());
    linops_server::serve(AppState::new(secret, forward_url), port).await
}
