//! Navigation bar state machine.
//!
//! The navbar owns a single open/closed menu state. Toggling is the only
//! mutator; the close callback (fired by selecting a menu item) is the only
//! way for anything else to reset it. The mobile overlay follows the state
//! through a [`Presence`], so closing plays the exit animation before the
//! overlay leaves the tree.

use std::fmt;

use serde::Serialize;

use crate::menu::{self, MenuItem, MENU_ITEMS};
use crate::presence::{Phase, Presence};

/// Viewport width (px) from which the desktop inline menu replaces the overlay.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    fn flipped(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }
}

/// Which menu the viewport shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Inline desktop menu, overlay never rendered
    Desktop,
    /// Toggle button plus overlay
    Mobile,
    /// Width unknown; render both and let the stylesheet pick
    Responsive,
}

impl Layout {
    /// Layout for a known viewport width.
    pub fn for_width(width: u32) -> Self {
        if width >= MOBILE_BREAKPOINT {
            Layout::Desktop
        } else {
            Layout::Mobile
        }
    }

    /// Layout for an optional viewport hint.
    pub fn from_hint(width: Option<u32>) -> Self {
        width.map(Self::for_width).unwrap_or(Layout::Responsive)
    }
}

/// Transition notifications emitted by a [`Navbar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Menu opened
    Opened,
    /// Menu closed (toggle or close callback)
    Closed,
    /// Overlay exit animation finished and the overlay left the tree
    Unmounted,
}

type Listener = Box<dyn FnMut(NavEvent) + Send>;

/// Navigation bar state.
#[derive(Default)]
pub struct Navbar {
    state: MenuState,
    overlay: Presence,
    listener: Option<Listener>,
}

impl fmt::Debug for Navbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navbar")
            .field("state", &self.state)
            .field("overlay", &self.overlay)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Navbar {
    /// Create a closed navbar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a transition listener.
    pub fn with_listener(mut self, listener: impl FnMut(NavEvent) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Menu entries.
    pub fn items(&self) -> &'static [MenuItem] {
        MENU_ITEMS
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Current phase of the mobile overlay.
    pub fn overlay_phase(&self) -> Phase {
        self.overlay.phase()
    }

    /// Toggle button click.
    pub fn toggle(&mut self) -> MenuState {
        self.state = self.state.flipped();
        match self.state {
            MenuState::Open => {
                self.overlay.enter();
                self.emit(NavEvent::Opened);
            }
            MenuState::Closed => {
                self.overlay.exit();
                self.emit(NavEvent::Closed);
            }
        }
        self.state
    }

    /// Close callback handed to the overlay's menu entries.
    ///
    /// Returns `true` if the menu was open.
    pub fn close(&mut self) -> bool {
        if self.state == MenuState::Closed {
            return false;
        }
        self.state = MenuState::Closed;
        self.overlay.exit();
        self.emit(NavEvent::Closed);
        true
    }

    /// A menu entry was selected.
    ///
    /// Closes the menu through the close callback and returns the entry to
    /// navigate to, if `to` names one.
    pub fn select(&mut self, to: &str) -> Option<&'static MenuItem> {
        let item = menu::find(to)?;
        self.close();
        Some(item)
    }

    /// Completion signal for the overlay animation.
    pub fn animation_complete(&mut self) {
        if self.overlay.animation_complete() {
            tracing::debug!("Mobile menu overlay unmounted");
            self.emit(NavEvent::Unmounted);
        }
    }

    /// Whether the mobile overlay is in the render tree for `layout`.
    pub fn renders_overlay(&self, layout: Layout) -> bool {
        match layout {
            Layout::Desktop => false,
            Layout::Mobile | Layout::Responsive => self.overlay.is_mounted(),
        }
    }

    fn emit(&mut self, event: NavEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }
}
