use proverb_core::{
    CardConfig, CardController, FixedTimestep, InputEvent, InputQueue, Phase, RevealMode, UiEvent,
};

/// Floats per stroke mark in the flat buffer: x, y, age.
pub const MARK_FLOATS: usize = 3;
/// Floats per confetti particle: x, y, scale, opacity, rotation, color index.
pub const CONFETTI_FLOATS: usize = 6;
/// Floats per background dot: left, top, delay, duration.
pub const BACKGROUND_FLOATS: usize = 4;

/// Host-request kinds mirrored to JS (payload via `event_payload`).
pub const EVENT_FETCH_QUOTE: u32 = 1;
pub const EVENT_COPY_TEXT: u32 = 2;
pub const EVENT_NATIVE_SHARE: u32 = 3;
pub const EVENT_COPY_SHARE_LINK: u32 = 4;
pub const EVENT_REPLACE_URL: u32 = 5;

/// Wires the controller to the browser loop.
///
/// JS calls `tick(dt)` once per animation frame; input events queue up
/// between frames and are applied on the first fixed step of the next
/// tick. Decorative state is rebuilt into flat `f32` buffers that JS reads
/// by pointer, so no per-frame rendering data crosses the boundary as JSON.
pub struct CardRunner {
    controller: CardController,
    input: InputQueue,
    timestep: FixedTimestep,
    marks_buf: Vec<f32>,
    confetti_buf: Vec<f32>,
    background_buf: Vec<f32>,
    event_kinds: Vec<u32>,
    event_payloads: Vec<String>,
}

impl CardRunner {
    pub fn new(seed: u64, direct_reveal: bool) -> Self {
        let config = CardConfig {
            reveal_mode: if direct_reveal {
                RevealMode::Direct
            } else {
                RevealMode::Scratch
            },
            seed,
        };
        let controller = CardController::new(config);
        let mut runner = Self {
            controller,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(1.0 / 60.0),
            marks_buf: Vec::new(),
            confetti_buf: Vec::new(),
            background_buf: Vec::new(),
            event_kinds: Vec::new(),
            event_payloads: Vec::new(),
        };
        runner.rebuild_background_buffer();
        runner
    }

    /// Record the page address; a `?quote=` parameter shows up already
    /// revealed and queues a replace-URL request.
    pub fn load_href(&mut self, href: &str) {
        self.controller.load_href(href);
        self.collect_events();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-step the controller, then refresh the buffers.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            if step == 0 {
                // Input is applied exactly once per frame; extra catch-up
                // steps only advance timers.
                self.controller.update(&self.input, self.timestep.dt());
            } else {
                self.controller.tick(self.timestep.dt());
            }
        }
        if steps > 0 {
            self.input.drain();
        }
        self.collect_events();
        self.rebuild_mark_buffer();
        self.rebuild_confetti_buffer();
    }

    // ---- Fetch completion, reported by the JS fetch wrapper ----

    pub fn quote_response(&mut self, body: &str) {
        self.controller.quote_response(body);
    }

    pub fn fetch_failed(&mut self) {
        self.controller.fetch_failed();
    }

    pub fn share_failed(&mut self) {
        self.controller.share_failed();
        self.collect_events();
    }

    // ---- Host-request queue ----

    fn collect_events(&mut self) {
        for event in self.controller.take_events() {
            let (kind, payload) = match event {
                UiEvent::FetchQuote => (EVENT_FETCH_QUOTE, String::new()),
                UiEvent::CopyText(text) => (EVENT_COPY_TEXT, text),
                UiEvent::NativeShare { url, .. } => (EVENT_NATIVE_SHARE, url),
                UiEvent::CopyShareLink(url) => (EVENT_COPY_SHARE_LINK, url),
                UiEvent::ReplaceUrl(url) => (EVENT_REPLACE_URL, url),
            };
            self.event_kinds.push(kind);
            self.event_payloads.push(payload);
        }
    }

    pub fn event_count(&self) -> u32 {
        self.event_kinds.len() as u32
    }

    pub fn event_kind(&self, index: u32) -> u32 {
        self.event_kinds.get(index as usize).copied().unwrap_or(0)
    }

    pub fn event_payload(&self, index: u32) -> String {
        self.event_payloads
            .get(index as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// JS calls this after it has acted on every pending request.
    pub fn clear_events(&mut self) {
        self.event_kinds.clear();
        self.event_payloads.clear();
    }

    // ---- Flat buffers ----

    fn rebuild_mark_buffer(&mut self) {
        self.marks_buf.clear();
        for mark in self.controller.marks() {
            self.marks_buf
                .extend_from_slice(&[mark.pos.x, mark.pos.y, mark.age]);
        }
    }

    fn rebuild_confetti_buffer(&mut self) {
        self.confetti_buf.clear();
        for p in self.controller.confetti().particles() {
            let pos = p.position();
            self.confetti_buf.extend_from_slice(&[
                pos.x,
                pos.y,
                p.scale(),
                p.opacity(),
                p.rotation(),
                p.color as f32,
            ]);
        }
    }

    fn rebuild_background_buffer(&mut self) {
        self.background_buf.clear();
        for p in self.controller.background().particles() {
            self.background_buf
                .extend_from_slice(&[p.left, p.top, p.delay, p.duration]);
        }
    }

    pub fn marks_ptr(&self) -> *const f32 {
        self.marks_buf.as_ptr()
    }

    pub fn mark_count(&self) -> u32 {
        (self.marks_buf.len() / MARK_FLOATS) as u32
    }

    pub fn confetti_ptr(&self) -> *const f32 {
        self.confetti_buf.as_ptr()
    }

    pub fn confetti_count(&self) -> u32 {
        (self.confetti_buf.len() / CONFETTI_FLOATS) as u32
    }

    pub fn background_ptr(&self) -> *const f32 {
        self.background_buf.as_ptr()
    }

    pub fn background_count(&self) -> u32 {
        (self.background_buf.len() / BACKGROUND_FLOATS) as u32
    }

    // ---- Display state ----

    pub fn phase(&self) -> u32 {
        self.controller.phase() as u32
    }

    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    pub fn quote(&self) -> String {
        self.controller.quote_text().unwrap_or_default().to_string()
    }

    pub fn error(&self) -> String {
        self.controller
            .error_message()
            .unwrap_or_default()
            .to_string()
    }

    pub fn copied_visible(&self) -> bool {
        self.controller.copied_visible()
    }

    pub fn toast_visible(&self) -> bool {
        self.controller.toast_visible()
    }

    pub fn panel_scale_x(&self) -> f32 {
        match self.controller.teardown() {
            Some(td) => td.panel_scale_x(),
            None => {
                if self.controller.phase() == Phase::Revealed {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    pub fn tear_offset(&self) -> f32 {
        self.controller.teardown().map_or(0.0, |td| td.tear_offset())
    }

    pub fn tear_opacity(&self) -> f32 {
        self.controller
            .teardown()
            .map_or(0.0, |td| td.tear_opacity())
    }

    pub fn text_opacity(&self) -> f32 {
        match self.controller.teardown() {
            Some(td) => td.text_opacity(),
            None => {
                if self.controller.phase() == Phase::Revealed {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn armed_runner() -> CardRunner {
        let mut r = CardRunner::new(42, false);
        r.load_href("https://example.com/");
        r.push_input(InputEvent::RequestQuote);
        r.tick(FRAME);
        r.quote_response(r#"{"quote":"X"}"#);
        r.clear_events();
        r
    }

    #[test]
    fn request_emits_one_fetch_event() {
        let mut r = CardRunner::new(42, false);
        r.load_href("https://example.com/");
        r.push_input(InputEvent::RequestQuote);
        r.push_input(InputEvent::RequestQuote);
        r.tick(FRAME);

        let fetches = (0..r.event_count())
            .filter(|&i| r.event_kind(i) == EVENT_FETCH_QUOTE)
            .count();
        assert_eq!(fetches, 1);
        assert_eq!(r.phase(), Phase::Loading as u32);
    }

    #[test]
    fn input_applies_once_despite_catchup_steps() {
        let mut r = armed_runner();
        r.push_input(InputEvent::PointerDown { x: 5.0, y: 5.0 });
        // A long frame runs several fixed steps; the stroke must count once.
        r.tick(FRAME * 4.0);
        assert_eq!(r.progress(), 0.8);
    }

    #[test]
    fn mark_buffer_layout() {
        let mut r = armed_runner();
        r.push_input(InputEvent::PointerDown { x: 5.0, y: 7.0 });
        r.tick(FRAME);
        assert_eq!(r.mark_count(), 1);
        assert_eq!(r.marks_buf[0], 5.0);
        assert_eq!(r.marks_buf[1], 7.0);
        assert!(r.marks_buf[2] >= FRAME);
    }

    #[test]
    fn background_buffer_built_at_construction() {
        let r = CardRunner::new(42, false);
        assert_eq!(r.background_count(), 20);
        assert_eq!(r.background_buf.len(), 20 * BACKGROUND_FLOATS);
    }

    #[test]
    fn shared_link_queues_replace_url() {
        let mut r = CardRunner::new(42, false);
        r.load_href("https://example.com/?quote=X");
        assert_eq!(r.phase(), Phase::Revealed as u32);
        assert_eq!(r.quote(), "X");
        assert_eq!(r.event_kind(0), EVENT_REPLACE_URL);
        assert_eq!(r.event_payload(0), "https://example.com/");
    }

    #[test]
    fn overlay_values_before_and_after_reveal() {
        let mut r = armed_runner();
        assert_eq!(r.panel_scale_x(), 1.0);
        assert_eq!(r.text_opacity(), 0.0);

        r.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        r.tick(FRAME);
        for _ in 0..124 {
            r.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
            r.tick(FRAME);
        }
        assert_eq!(r.progress(), 100.0);

        // 0.3 s delay + 1.2 s teardown ≈ 90 frames.
        for _ in 0..95 {
            r.tick(FRAME);
        }
        assert_eq!(r.phase(), Phase::Revealed as u32);
        assert_eq!(r.panel_scale_x(), 0.0);
        assert_eq!(r.text_opacity(), 1.0);
    }

    #[test]
    fn events_clear_on_demand() {
        let mut r = CardRunner::new(42, false);
        r.load_href("https://example.com/?quote=X");
        assert!(r.event_count() > 0);
        r.clear_events();
        assert_eq!(r.event_count(), 0);
    }
}
