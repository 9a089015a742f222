pub mod runner;

pub use runner::CardRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use proverb_core::{quote, InputEvent};

thread_local! {
    static RUNNER: RefCell<Option<CardRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut CardRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Card not initialized. Call card_init() first.");
        f(runner)
    })
}

/// Initialize the card. `seed` feeds the decorative RNG and must be drawn
/// by JS after mount; `href` is the current page address, checked for a
/// shared-quote parameter.
#[wasm_bindgen]
pub fn card_init(seed: u32, direct_reveal: bool, href: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = CardRunner::new(seed as u64, direct_reveal);
    runner.load_href(href);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("reverse-proverbs card: initialized");
}

#[wasm_bindgen]
pub fn card_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Pointer input ----

#[wasm_bindgen]
pub fn card_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn card_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn card_pointer_up() {
    with_runner(|r| r.push_input(InputEvent::PointerUp));
}

// ---- UI buttons ----

#[wasm_bindgen]
pub fn card_request_quote() {
    with_runner(|r| r.push_input(InputEvent::RequestQuote));
}

#[wasm_bindgen]
pub fn card_copy_quote() {
    with_runner(|r| r.push_input(InputEvent::CopyQuote));
}

#[wasm_bindgen]
pub fn card_share_quote(native_available: bool) {
    with_runner(|r| {
        r.push_input(InputEvent::ShareQuote {
            native: native_available,
        })
    });
}

// ---- Fetch completion (JS performs the actual network call) ----

#[wasm_bindgen]
pub fn card_quote_response(body: &str) {
    with_runner(|r| r.quote_response(body));
}

#[wasm_bindgen]
pub fn card_fetch_failed() {
    with_runner(|r| r.fetch_failed());
}

#[wasm_bindgen]
pub fn card_share_failed() {
    with_runner(|r| r.share_failed());
}

// ---- Host-request queue ----

#[wasm_bindgen]
pub fn card_event_count() -> u32 {
    with_runner(|r| r.event_count())
}

#[wasm_bindgen]
pub fn card_event_kind(index: u32) -> u32 {
    with_runner(|r| r.event_kind(index))
}

#[wasm_bindgen]
pub fn card_event_payload(index: u32) -> String {
    with_runner(|r| r.event_payload(index))
}

#[wasm_bindgen]
pub fn card_clear_events() {
    with_runner(|r| r.clear_events());
}

// ---- Display state ----

#[wasm_bindgen]
pub fn card_phase() -> u32 {
    with_runner(|r| r.phase())
}

#[wasm_bindgen]
pub fn card_progress() -> f32 {
    with_runner(|r| r.progress())
}

#[wasm_bindgen]
pub fn card_quote() -> String {
    with_runner(|r| r.quote())
}

#[wasm_bindgen]
pub fn card_error() -> String {
    with_runner(|r| r.error())
}

#[wasm_bindgen]
pub fn card_share_title() -> String {
    quote::SHARE_TITLE.to_string()
}

#[wasm_bindgen]
pub fn card_copied_visible() -> bool {
    with_runner(|r| r.copied_visible())
}

#[wasm_bindgen]
pub fn card_toast_visible() -> bool {
    with_runner(|r| r.toast_visible())
}

// ---- Teardown animation values ----

#[wasm_bindgen]
pub fn card_panel_scale_x() -> f32 {
    with_runner(|r| r.panel_scale_x())
}

#[wasm_bindgen]
pub fn card_tear_offset() -> f32 {
    with_runner(|r| r.tear_offset())
}

#[wasm_bindgen]
pub fn card_tear_opacity() -> f32 {
    with_runner(|r| r.tear_opacity())
}

#[wasm_bindgen]
pub fn card_text_opacity() -> f32 {
    with_runner(|r| r.text_opacity())
}

// ---- Flat buffer accessors for decorative state ----

#[wasm_bindgen]
pub fn get_marks_ptr() -> *const f32 {
    with_runner(|r| r.marks_ptr())
}

#[wasm_bindgen]
pub fn get_mark_count() -> u32 {
    with_runner(|r| r.mark_count())
}

#[wasm_bindgen]
pub fn get_confetti_ptr() -> *const f32 {
    with_runner(|r| r.confetti_ptr())
}

#[wasm_bindgen]
pub fn get_confetti_count() -> u32 {
    with_runner(|r| r.confetti_count())
}

#[wasm_bindgen]
pub fn get_background_ptr() -> *const f32 {
    with_runner(|r| r.background_ptr())
}

#[wasm_bindgen]
pub fn get_background_count() -> u32 {
    with_runner(|r| r.background_count())
}
