/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Webhook signing secret. `None` disables verification (local dev).
    pub secret: Option<String>,
    /// Downstream URL deliveries are relayed to. `None` means log-only.
    pub forward_url: Option<String>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(secret: Option<String>, forward_url: Option<String>) -> Self {
        Self {
            secret,
            forward_url,
            http: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_settings() {
        let state = AppState::new(Some("whsec".into()), None);
        assert_eq!(state.secret.as_deref(), Some("whsec"));
        assert!(state.forward_url.is_none());
    }
}
