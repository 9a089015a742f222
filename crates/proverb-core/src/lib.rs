pub mod controller;
pub mod easing;
pub mod effects;
pub mod input;
pub mod quote;
pub mod reveal;
pub mod session;
pub mod time;

// Re-export key types at crate root for convenience
pub use controller::{CardConfig, CardController, RevealMode, UiEvent, ERROR_MESSAGE};
pub use easing::{ease, lerp, Easing};
pub use effects::{BackgroundField, BackgroundParticle, ConfettiBurst, ConfettiParticle, Rng};
pub use input::{InputEvent, InputQueue};
pub use quote::{extract_shared, share_url, Quote, QuoteResponse, SharedQuote, QUOTE_PARAM};
pub use reveal::Teardown;
pub use session::{Phase, ScratchSession, SessionEvent, StrokeMark};
pub use time::FixedTimestep;
