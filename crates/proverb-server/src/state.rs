use std::sync::Arc;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub http: reqwest::Client,
}

impl State {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        Arc::new(Self {
            config,
            http: reqwest::Client::new(),
        })
    }
}
