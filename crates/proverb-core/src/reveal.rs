use crate::easing::Easing;

/// Total duration of the teardown animation in seconds.
pub const TEARDOWN_DURATION: f32 = 1.2;
/// How long the two tear edges take to slide off.
const TEAR_SLIDE_DURATION: f32 = 1.0;
/// How far each tear edge travels, in world units (left edge goes negative).
const TEAR_SLIDE_DISTANCE: f32 = 200.0;
/// Quote text starts fading in this long after the teardown begins.
const TEXT_FADE_DELAY: f32 = 0.8;
const TEXT_FADE_DURATION: f32 = 0.8;

/// Fixed-duration reveal teardown: a shrinking opaque panel, two diverging
/// tear edges, and a fading-in quote underneath. Purely presentational:
/// the host reads the per-frame values and draws them; nothing here gates
/// the session logic.
#[derive(Debug, Clone)]
pub struct Teardown {
    elapsed: f32,
}

impl Teardown {
    pub fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    /// Advance the animation. Returns false once the full duration has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed < TEARDOWN_DURATION
    }

    /// Normalized progress through the teardown, in [0, 1].
    pub fn fraction(&self) -> f32 {
        (self.elapsed / TEARDOWN_DURATION).clamp(0.0, 1.0)
    }

    /// Horizontal scale of the opaque panel: 1 at start, 0 when fully torn.
    pub fn panel_scale_x(&self) -> f32 {
        1.0 - Easing::CubicInOut.apply(self.fraction())
    }

    /// Outward offset of each tear edge (apply as +x right, -x left).
    pub fn tear_offset(&self) -> f32 {
        let t = (self.elapsed / TEAR_SLIDE_DURATION).clamp(0.0, 1.0);
        TEAR_SLIDE_DISTANCE * Easing::QuadOut.apply(t)
    }

    /// Opacity of the tear edges, fading out as they slide.
    pub fn tear_opacity(&self) -> f32 {
        let t = (self.elapsed / TEAR_SLIDE_DURATION).clamp(0.0, 1.0);
        1.0 - Easing::QuadOut.apply(t)
    }

    /// Opacity of the quote text, fading in near the end of the teardown.
    pub fn text_opacity(&self) -> f32 {
        let t = ((self.elapsed - TEXT_FADE_DELAY) / TEXT_FADE_DURATION).clamp(0.0, 1.0);
        Easing::QuadOut.apply(t)
    }
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}
