use std::sync::Arc;

use axum::{Json, extract::State as AxumState};
use serde::Serialize;
use tracing::warn;

use super::{content, gemini::generate_quote, state::State};

#[derive(Serialize)]
pub struct QuoteBody {
    pub quote: String,
}

/// Always answers 200 with a quote. If generation fails for any reason,
/// a canned fallback goes out instead and the failure is only logged.
pub async fn quote_handler(AxumState(state): AxumState<Arc<State>>) -> Json<QuoteBody> {
    let prompt = content::build_prompt(&mut rand::rng());

    let quote = match generate_quote(&state.http, &state.config.gemini_api_key, &prompt).await {
        Ok(quote) => quote,
        Err(e) => {
            warn!("Quote generation failed, serving fallback: {e}");
            content::pick_fallback(&mut rand::rng()).to_string()
        }
    };

    Json(QuoteBody { quote })
}
