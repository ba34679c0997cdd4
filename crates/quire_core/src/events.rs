//! Host input events
//!
//! Platform-agnostic key, focus and pointer events as the host framework
//! delivers them to a widget. Targets are opaque ids assigned by the host; the
//! widget only compares them against the ids it was told about.

/// Opaque identifier of a host element (input wrapper, panel, button, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Keys a form widget reacts to
///
/// Hosts map their own key representation onto this; anything a widget has
/// no binding for arrives as [`KeyCode::Other`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Enter,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    #[default]
    Other,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Option on macOS
    pub alt: bool,
    /// Command on macOS, Windows key on Windows
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Check if the key is part of a host shortcut (Ctrl, Alt or Meta held)
    ///
    /// Shift alone does not count.
    pub fn is_shortcut(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// A key press delivered to a widget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    /// Element that had focus when the key was pressed
    pub target: Option<TargetId>,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Focus or blur notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusEvent {
    /// Element that received or lost focus
    pub target: Option<TargetId>,
    /// The other side of the focus move (the element gaining focus on blur)
    pub related_target: Option<TargetId>,
}

impl FocusEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_related(mut self, related: TargetId) -> Self {
        self.related_target = Some(related);
        self
    }
}

/// Pointer press; `target` is the element the host hit-tested, if any
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    pub target: Option<TargetId>,
}

impl PointerEvent {
    pub fn at(target: TargetId) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Check if the press landed on `target`
    pub fn hits(&self, target: Option<TargetId>) -> bool {
        self.target.is_some() && self.target == target
    }
}
