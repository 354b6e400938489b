//! Two-phase presence for views that animate out before removal.
//!
//! A view is logically removed as soon as its owner says so, but it stays in
//! the render tree until the animation subsystem reports that the exit
//! animation finished.

use serde::Serialize;

/// Mount phase of an animated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not in the render tree
    #[default]
    Unmounted,
    /// Mounted, entrance animation running
    Entering,
    /// Mounted, at rest
    Present,
    /// Still mounted, exit animation running
    Exiting,
}

impl Phase {
    /// Name used for `data-phase` attributes and CSS hooks.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Unmounted => "unmounted",
            Phase::Entering => "entering",
            Phase::Present => "present",
            Phase::Exiting => "exiting",
        }
    }
}

/// Presence tracker for one animated view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    phase: Phase,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the view is in the render tree.
    pub fn is_mounted(&self) -> bool {
        self.phase != Phase::Unmounted
    }

    /// Whether the owner still wants the view (not leaving).
    pub fn is_present(&self) -> bool {
        matches!(self.phase, Phase::Entering | Phase::Present)
    }

    /// Mount the view, or reverse a running exit.
    pub fn enter(&mut self) {
        match self.phase {
            Phase::Unmounted | Phase::Exiting => self.phase = Phase::Entering,
            Phase::Entering | Phase::Present => {}
        }
    }

    /// Start the exit animation, or reverse a running entrance.
    ///
    /// The view stays mounted until [`Presence::animation_complete`].
    pub fn exit(&mut self) {
        match self.phase {
            Phase::Entering | Phase::Present => self.phase = Phase::Exiting,
            Phase::Unmounted | Phase::Exiting => {}
        }
    }

    /// Completion signal from the animation subsystem.
    ///
    /// Returns `true` when the signal made the view safe to remove.
    pub fn animation_complete(&mut self) -> bool {
        match self.phase {
            Phase::Entering => {
                self.phase = Phase::Present;
                false
            }
            Phase::Exiting => {
                self.phase = Phase::Unmounted;
                true
            }
            Phase::Present | Phase::Unmounted => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unmounted() {
        let presence = Presence::new();
        assert_eq!(presence.phase(), Phase::Unmounted);
        assert!(!presence.is_mounted());
    }

    #[test]
    fn enter_then_complete_is_present() {
        let mut presence = Presence::new();
        presence.enter();
        assert_eq!(presence.phase(), Phase::Entering);
        assert!(presence.is_mounted());

        assert!(!presence.animation_complete());
        assert_eq!(presence.phase(), Phase::Present);
    }

    #[test]
    fn exit_defers_unmount_until_complete() {
        let mut presence = Presence::new();
        presence.enter();
        presence.animation_complete();

        presence.exit();
        assert_eq!(presence.phase(), Phase::Exiting);
        assert!(presence.is_mounted());
        assert!(!presence.is_present());

        assert!(presence.animation_complete());
        assert!(!presence.is_mounted());
    }

    #[test]
    fn enter_during_exit_reverses() {
        let mut presence = Presence::new();
        presence.enter();
        presence.exit();
        presence.enter();
        assert_eq!(presence.phase(), Phase::Entering);
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut presence = Presence::new();
        assert!(!presence.animation_complete());
        assert_eq!(presence.phase(), Phase::Unmounted);

        presence.enter();
        presence.animation_complete();
        assert!(!presence.animation_complete());
        assert_eq!(presence.phase(), Phase::Present);
    }
}
