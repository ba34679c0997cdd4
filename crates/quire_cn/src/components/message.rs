//! Message provider
//!
//! A queue of transient messages (toasts). Messages are created through the
//! typed shortcuts ([`MessageProvider::info`], [`MessageProvider::error`], …),
//! count down while visible, then play a leave transition. The host reports
//! the end of that transition with [`MessageProvider::after_leave`], which
//! removes the message and fires its close handler.
//!
//! Time is driven by the host through [`MessageProvider::advance`] so the
//! provider never owns a timer.
//!
//! # Example
//!
//! ```
//! use quire_cn::prelude::*;
//! use std::time::Duration;
//!
//! let mut messages = MessageProvider::new(MessageProviderProps::default());
//! let saved = messages.success("Saved", MessageOptions::new());
//!
//! let leaving = messages.advance(Duration::from_millis(3000));
//! assert_eq!(leaving, vec![saved]);
//!
//! messages.after_leave(saved);
//! assert!(messages.is_empty());
//! ```

use serde::Deserialize;
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use quire_core::{Machine, StateTransitions};

use crate::error::ConfigError;

new_key_type! {
    /// Identifies one message for as long as it is listed
    pub struct MessageHandle;
}

/// Message severity and icon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
    Loading,
}

/// Per-message options
#[derive(Clone, Default)]
pub struct MessageOptions {
    /// Time the message stays visible. Zero keeps it until destroyed;
    /// `None` uses the provider default.
    pub duration: Option<Duration>,
    /// Show a close button
    pub closable: bool,
    /// Called once the message has left and been removed
    pub on_close: Option<Rc<dyn Fn()>>,
}

impl MessageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn on_close(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }
}

impl fmt::Debug for MessageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageOptions")
            .field("duration", &self.duration)
            .field("closable", &self.closable)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Provider-wide configuration
///
/// ```toml
/// duration_ms = 5000
/// max = 3
/// keep_alive_on_hover = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageProviderProps {
    /// Default visible time for messages created without one
    pub duration_ms: u64,
    /// Most messages shown at once; the oldest visible one leaves first
    pub max: Option<usize>,
    /// Pause the countdown while the pointer is over a message
    pub keep_alive_on_hover: bool,
}

impl Default for MessageProviderProps {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            max: None,
            keep_alive_on_hover: false,
        }
    }
}

impl MessageProviderProps {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }
}

/// Where a message is in its lifetime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessagePhase {
    #[default]
    Visible,
    /// Leave transition running; removed on `after_leave`
    Leaving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageEvent {
    Hide,
}

impl StateTransitions<MessageEvent> for MessagePhase {
    fn on_event(&self, event: MessageEvent) -> Option<Self> {
        match (self, event) {
            (MessagePhase::Visible, MessageEvent::Hide) => Some(MessagePhase::Leaving),
            (MessagePhase::Leaving, MessageEvent::Hide) => None,
        }
    }
}

/// One listed message
pub struct Message {
    kind: MessageType,
    content: String,
    duration: Duration,
    remaining: Duration,
    closable: bool,
    hovered: bool,
    phase: Machine<MessagePhase>,
    on_close: Option<Rc<dyn Fn()>>,
}

impl Message {
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Visible time left; meaningless when the duration is zero
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn closable(&self) -> bool {
        self.closable
    }

    pub fn phase(&self) -> MessagePhase {
        self.phase.current()
    }

    pub fn is_visible(&self) -> bool {
        self.phase.is_in(MessagePhase::Visible)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("kind", &self.kind)
            .field("content", &self.content)
            .field("remaining", &self.remaining)
            .field("phase", &self.phase())
            .finish()
    }
}

/// Message queue state
pub struct MessageProvider {
    props: MessageProviderProps,
    messages: SlotMap<MessageHandle, Message>,
    /// Creation order
    order: Vec<MessageHandle>,
}

impl MessageProvider {
    pub fn new(props: MessageProviderProps) -> Self {
        Self {
            props,
            messages: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn info(&mut self, content: impl Into<String>, options: MessageOptions) -> MessageHandle {
        self.create(MessageType::Info, content.into(), options)
    }

    pub fn success(
        &mut self,
        content: impl Into<String>,
        options: MessageOptions,
    ) -> MessageHandle {
        self.create(MessageType::Success, content.into(), options)
    }

    pub fn warning(
        &mut self,
        content: impl Into<String>,
        options: MessageOptions,
    ) -> MessageHandle {
        self.create(MessageType::Warning, content.into(), options)
    }

    pub fn error(&mut self, content: impl Into<String>, options: MessageOptions) -> MessageHandle {
        self.create(MessageType::Error, content.into(), options)
    }

    pub fn loading(
        &mut self,
        content: impl Into<String>,
        options: MessageOptions,
    ) -> MessageHandle {
        self.create(MessageType::Loading, content.into(), options)
    }

    pub fn create(
        &mut self,
        kind: MessageType,
        content: String,
        options: MessageOptions,
    ) -> MessageHandle {
        let duration = options
            .duration
            .unwrap_or(Duration::from_millis(self.props.duration_ms));
        let handle = self.messages.insert(Message {
            kind,
            content,
            duration,
            remaining: duration,
            closable: options.closable,
            hovered: false,
            phase: Machine::new(MessagePhase::Visible),
            on_close: options.on_close,
        });
        self.order.push(handle);
        tracing::debug!(?handle, ?kind, ?duration, "message created");
        self.enforce_max();
        handle
    }

    fn enforce_max(&mut self) {
        let Some(max) = self.props.max else {
            return;
        };
        let visible: Vec<MessageHandle> = self
            .order
            .iter()
            .copied()
            .filter(|h| self.messages.get(*h).is_some_and(Message::is_visible))
            .collect();
        for handle in visible.iter().take(visible.len().saturating_sub(max)) {
            self.destroy(*handle);
        }
    }

    /// Start the leave transition. Returns false for stale handles and
    /// messages already leaving.
    pub fn destroy(&mut self, handle: MessageHandle) -> bool {
        match self.messages.get_mut(handle) {
            Some(message) => {
                let hid = message.phase.send(MessageEvent::Hide).is_some();
                if hid {
                    tracing::debug!(?handle, "message leaving");
                }
                hid
            }
            None => false,
        }
    }

    /// The leave transition finished: remove the message and fire `on_close`
    pub fn after_leave(&mut self, handle: MessageHandle) -> bool {
        let Some(message) = self.messages.remove(handle) else {
            return false;
        };
        self.order.retain(|h| *h != handle);
        tracing::debug!(?handle, "message removed");
        if let Some(on_close) = &message.on_close {
            on_close();
        }
        true
    }

    /// Count visible messages down by `elapsed`
    ///
    /// Returns the messages whose time ran out, in creation order. They are
    /// now leaving.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MessageHandle> {
        let keep_alive = self.props.keep_alive_on_hover;
        let mut expired = Vec::new();
        for handle in &self.order {
            let Some(message) = self.messages.get_mut(*handle) else {
                continue;
            };
            if !message.is_visible()
                || message.duration.is_zero()
                || (keep_alive && message.hovered)
            {
                continue;
            }
            message.remaining = message.remaining.saturating_sub(elapsed);
            if message.remaining.is_zero() {
                expired.push(*handle);
            }
        }
        for handle in &expired {
            self.destroy(*handle);
        }
        expired
    }

    pub fn pointer_enter(&mut self, handle: MessageHandle) {
        if let Some(message) = self.messages.get_mut(handle) {
            message.hovered = true;
        }
    }

    /// Leaving a hovered message restarts its countdown
    pub fn pointer_leave(&mut self, handle: MessageHandle) {
        let keep_alive = self.props.keep_alive_on_hover;
        if let Some(message) = self.messages.get_mut(handle) {
            if keep_alive && message.hovered {
                message.remaining = message.duration;
            }
            message.hovered = false;
        }
    }

    /// Replace the text of a listed message
    pub fn set_content(&mut self, handle: MessageHandle, content: impl Into<String>) -> bool {
        match self.messages.get_mut(handle) {
            Some(message) => {
                message.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Change the type, e.g. a `Loading` message turning into `Success`
    pub fn set_type(&mut self, handle: MessageHandle, kind: MessageType) -> bool {
        match self.messages.get_mut(handle) {
            Some(message) => {
                message.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: MessageHandle) -> Option<&Message> {
        self.messages.get(handle)
    }

    /// Listed messages in creation order, including ones leaving
    pub fn messages(&self) -> impl Iterator<Item = (MessageHandle, &Message)> + '_ {
        self.order
            .iter()
            .filter_map(|h| self.messages.get(*h).map(|m| (*h, m)))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageProvider {
    fn default() -> Self {
        Self::new(MessageProviderProps::default())
    }
}

impl fmt::Debug for MessageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageProvider")
            .field("props", &self.props)
            .field("messages", &self.messages().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_default_duration() {
        let mut p = MessageProvider::default();
        let h = p.info("hi", MessageOptions::new());
        assert_eq!(p.get(h).map(Message::duration), Some(ms(3000)));
        assert!(p.advance(ms(2999)).is_empty());
        assert_eq!(p.advance(ms(1)), vec![h]);
        assert_eq!(p.get(h).map(Message::phase), Some(MessagePhase::Leaving));
    }

    #[test]
    fn test_zero_duration_persists() {
        let mut p = MessageProvider::default();
        let h = p.loading("working", MessageOptions::new().duration(Duration::ZERO));
        assert!(p.advance(ms(60_000)).is_empty());
        assert!(p.get(h).is_some_and(Message::is_visible));
        assert!(p.destroy(h));
        assert!(!p.destroy(h));
    }

    #[test]
    fn test_on_close_fires_after_leave() {
        let closed = Rc::new(Cell::new(0));
        let c = closed.clone();
        let mut p = MessageProvider::default();
        let h = p.error("boom", MessageOptions::new().on_close(move || c.set(c.get() + 1)));
        p.destroy(h);
        assert_eq!(closed.get(), 0);
        assert!(p.after_leave(h));
        assert_eq!(closed.get(), 1);
        assert!(!p.after_leave(h));
        assert_eq!(closed.get(), 1);
        assert!(p.is_empty());
    }

    #[test]
    fn test_order_and_kinds() {
        let mut p = MessageProvider::default();
        p.info("a", MessageOptions::new());
        let b = p.success("b", MessageOptions::new());
        p.warning("c", MessageOptions::new());
        p.after_leave(b);
        let listed: Vec<_> = p
            .messages()
            .map(|(_, m)| (m.kind(), m.content().to_string()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (MessageType::Info, "a".to_string()),
                (MessageType::Warning, "c".to_string())
            ]
        );
    }

    #[test]
    fn test_max_hides_oldest() {
        let mut p = MessageProvider::new(MessageProviderProps {
            max: Some(2),
            ..Default::default()
        });
        let a = p.info("a", MessageOptions::new());
        p.info("b", MessageOptions::new());
        p.info("c", MessageOptions::new());
        assert_eq!(p.get(a).map(Message::phase), Some(MessagePhase::Leaving));
        assert_eq!(p.messages().filter(|(_, m)| m.is_visible()).count(), 2);
    }

    #[test]
    fn test_hover_keeps_alive() {
        let mut p = MessageProvider::new(MessageProviderProps {
            keep_alive_on_hover: true,
            ..Default::default()
        });
        let h = p.info("a", MessageOptions::new().duration(ms(100)));
        p.advance(ms(60));
        p.pointer_enter(h);
        assert!(p.advance(ms(500)).is_empty());
        p.pointer_leave(h);
        assert_eq!(p.get(h).map(Message::remaining), Some(ms(100)));
        assert_eq!(p.advance(ms(100)), vec![h]);
    }

    #[test]
    fn test_update_loading_message() {
        let mut p = MessageProvider::default();
        let h = p.loading("Uploading", MessageOptions::new());
        assert!(p.set_content(h, "Uploaded"));
        assert!(p.set_type(h, MessageType::Success));
        let m = p.get(h).unwrap();
        assert_eq!(m.content(), "Uploaded");
        assert_eq!(m.kind(), MessageType::Success);
    }

    #[test]
    fn test_props_from_toml() {
        let props = MessageProviderProps::from_toml_str("duration_ms = 5000\nmax = 3").unwrap();
        assert_eq!(props.duration_ms, 5000);
        assert_eq!(props.max, Some(3));
        assert!(!props.keep_alive_on_hover);
        assert!(MessageProviderProps::from_toml_str("duration_ms = -1").is_err());
    }
}
