/// Input event types the card understands.
/// Pointer events come from the canvas; UI events from the page buttons.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at card coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp,
    /// A touch/cursor moved to card coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The "new quote" button was pressed.
    RequestQuote,
    /// The copy button was pressed.
    CopyQuote,
    /// The share button was pressed. `native` is whether the runtime
    /// exposes a native share capability.
    ShareQuote { native: bool },
}

/// A queue of input events.
/// The host writes events into the queue; the controller drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host via the wasm bridge).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::RequestQuote);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn share_event_carries_capability() {
        let mut q = InputQueue::new();
        q.push(InputEvent::ShareQuote { native: true });
        match q.drain()[0] {
            InputEvent::ShareQuote { native } => assert!(native),
            _ => panic!("expected ShareQuote event"),
        }
    }
}
