use glam::Vec2;

use crate::effects::{BackgroundField, ConfettiBurst, Rng};
use crate::input::{InputEvent, InputQueue};
use crate::quote::{self, Quote, QuoteResponse};
use crate::session::{Phase, ScratchSession, SessionEvent, StrokeMark};

/// Fixed user-facing message for a failed quote fetch.
pub const ERROR_MESSAGE: &str =
    "Có lỗi xảy ra. Ngay cả thất bại của chúng tôi cũng đang thất bại.";

/// How long the "copied" acknowledgment stays up.
const COPIED_TTL: f32 = 2.0;
/// How long the share-link toast stays up.
const TOAST_TTL: f32 = 3.0;

/// How an arriving quote is exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealMode {
    /// The quote hides behind an opaque overlay the user scratches off.
    #[default]
    Scratch,
    /// Legacy behavior: a successful fetch shows the quote immediately.
    Direct,
}

/// Controller configuration, provided by the host at init.
#[derive(Debug, Clone)]
pub struct CardConfig {
    pub reveal_mode: RevealMode,
    /// Seed for decorative randomness. Must come from the host after the
    /// page is interactive so initial markup never bakes in random values.
    pub seed: u64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            reveal_mode: RevealMode::Scratch,
            seed: 42,
        }
    }
}

/// Requests the controller makes of its host. The controller owns all
/// state; the host performs the side effects (fetch, clipboard, share
/// sheet, history) and reports back where a report is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// POST the quote endpoint, then call `quote_response` or `fetch_failed`.
    FetchQuote,
    /// Write the quote text to the clipboard.
    CopyText(String),
    /// Open the native share sheet. On failure call `share_failed`.
    NativeShare {
        title: String,
        text: String,
        url: String,
    },
    /// Write the share link to the clipboard (toast is tracked here).
    CopyShareLink(String),
    /// Replace the visible address without reloading.
    ReplaceUrl(String),
}

/// Owns the scratch session and the displayed quote; mediates between the
/// quote endpoint and the rendering host.
pub struct CardController {
    config: CardConfig,
    session: ScratchSession,
    quote: Option<Quote>,
    error: Option<&'static str>,
    rng: Rng,
    background: BackgroundField,
    confetti: ConfettiBurst,
    /// Page address captured at load, used to build share links.
    href: String,
    last_share_url: Option<String>,
    copied_left: f32,
    toast_left: f32,
    events: Vec<UiEvent>,
}

impl CardController {
    pub fn new(config: CardConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let background = BackgroundField::generate(&mut rng);
        Self {
            config,
            session: ScratchSession::new(),
            quote: None,
            error: None,
            rng,
            background,
            confetti: ConfettiBurst::default(),
            href: String::new(),
            last_share_url: None,
            copied_left: 0.0,
            toast_left: 0.0,
            events: Vec::new(),
        }
    }

    /// Record the page address and honor a shared-quote parameter if one is
    /// present: the quote shows already revealed, no scratch overlay, and
    /// the parameter is stripped from the visible address.
    pub fn load_href(&mut self, href: &str) {
        self.href = href.to_string();
        if let Some(shared) = quote::extract_shared(href) {
            self.quote = Some(Quote::new(shared.text));
            self.session.set_revealed();
            self.events.push(UiEvent::ReplaceUrl(shared.stripped));
        }
    }

    /// Ask the host to fetch a new quote. No-op while a fetch is in flight
    /// or the reveal teardown is still playing.
    pub fn request_quote(&mut self) {
        if matches!(self.session.phase(), Phase::Loading | Phase::Revealing) {
            return;
        }
        self.error = None;
        self.session.set_loading();
        self.events.push(UiEvent::FetchQuote);
    }

    /// The host's fetch completed with this response body. The new quote
    /// and the session reset land in one call, so no frame can pair a new
    /// quote with stale progress.
    pub fn quote_response(&mut self, body: &str) {
        if self.session.phase() != Phase::Loading {
            log::warn!("quote response outside Loading ignored");
            return;
        }
        match QuoteResponse::parse(body) {
            Ok(resp) => {
                self.quote = Some(Quote::new(resp.quote));
                match self.config.reveal_mode {
                    RevealMode::Scratch => self.session.arm(),
                    RevealMode::Direct => self.session.set_revealed(),
                }
            }
            Err(e) => {
                log::warn!("malformed quote response: {e}");
                self.fail();
            }
        }
    }

    /// The host's fetch failed (network error or non-2xx status).
    pub fn fetch_failed(&mut self) {
        if self.session.phase() != Phase::Loading {
            return;
        }
        self.fail();
    }

    fn fail(&mut self) {
        // The previous quote is kept; only the phase and message change.
        self.session.set_error();
        self.error = Some(ERROR_MESSAGE);
    }

    pub fn pointer_down(&mut self, point: Vec2) {
        self.session.begin_erase(point);
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        self.session.continue_erase(point);
    }

    pub fn pointer_up(&mut self) {
        self.session.end_erase();
    }

    /// Copy the quote text. Valid whenever a quote exists and no fetch is
    /// in flight; never touches the session.
    pub fn copy_quote(&mut self) {
        let Some(text) = self.shareable_text() else {
            return;
        };
        self.events.push(UiEvent::CopyText(text));
        self.copied_left = COPIED_TTL;
    }

    /// Share the quote: native share sheet when available, otherwise the
    /// share link goes to the clipboard with a transient toast.
    pub fn share_quote(&mut self, native_available: bool) {
        let Some(text) = self.shareable_text() else {
            return;
        };
        let url = match quote::share_url(&self.href, &text) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("cannot build share link from {:?}: {e}", self.href);
                return;
            }
        };
        self.last_share_url = Some(url.clone());
        if native_available {
            self.events.push(UiEvent::NativeShare {
                title: quote::SHARE_TITLE.to_string(),
                text,
                url,
            });
        } else {
            self.copy_share_link(url);
        }
    }

    /// The native share sheet failed or was dismissed; fall back to the
    /// clipboard. Failures are never surfaced to the user.
    pub fn share_failed(&mut self) {
        log::info!("native share unavailable, falling back to clipboard");
        if let Some(url) = self.last_share_url.clone() {
            self.copy_share_link(url);
        }
    }

    fn copy_share_link(&mut self, url: String) {
        self.events.push(UiEvent::CopyShareLink(url));
        self.toast_left = TOAST_TTL;
    }

    fn shareable_text(&self) -> Option<String> {
        if self.session.phase() == Phase::Loading {
            return None;
        }
        self.quote.as_ref().map(|q| q.text().to_string())
    }

    /// Consume queued host input, then advance all timers by one step.
    pub fn update(&mut self, input: &InputQueue, dt: f32) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
                InputEvent::PointerUp => self.pointer_up(),
                InputEvent::RequestQuote => self.request_quote(),
                InputEvent::CopyQuote => self.copy_quote(),
                InputEvent::ShareQuote { native } => self.share_quote(native),
            }
        }
        self.tick(dt);
    }

    /// Advance timers without consuming input.
    pub fn tick(&mut self, dt: f32) {
        if self.session.tick(dt) == SessionEvent::TeardownStarted {
            self.confetti = ConfettiBurst::spawn(&mut self.rng);
        }
        self.confetti.tick(dt);
        self.copied_left = (self.copied_left - dt).max(0.0);
        self.toast_left = (self.toast_left - dt).max(0.0);
    }

    // ---- Read accessors for the rendering host ----

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn progress(&self) -> f32 {
        self.session.progress()
    }

    pub fn quote_text(&self) -> Option<&str> {
        self.quote.as_ref().map(|q| q.text())
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    pub fn marks(&self) -> &[StrokeMark] {
        self.session.marks()
    }

    pub fn teardown(&self) -> Option<&crate::reveal::Teardown> {
        self.session.teardown()
    }

    pub fn confetti(&self) -> &ConfettiBurst {
        &self.confetti
    }

    pub fn background(&self) -> &BackgroundField {
        &self.background
    }

    pub fn copied_visible(&self) -> bool {
        self.copied_left > 0.0
    }

    pub fn toast_visible(&self) -> bool {
        self.toast_left > 0.0
    }

    /// Drain pending host requests.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }
}
