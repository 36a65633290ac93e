//! User interaction with a built menu.
//!
//! One [`InteractionController`] owns the [`Menu`] for a page session and is
//! the single delegated handler for everything that happens inside it. The
//! host resolves each browser event to a [`MenuEvent`] (which element was hit,
//! and which key if any) and hands it to [`InteractionController::dispatch`].
//!
//! - Clicking a node's own label toggles that node only. Links are followed,
//!   never toggled, and leaf entries have nothing to toggle.
//! - `ArrowRight` opens and `ArrowLeft` closes the entry owning the focused
//!   label or link.
//! - The mobile toggle shows or hides the whole menu; any click outside the
//!   menu while it is shown hides it.
//!
//! Only `open_state` and the mobile flag ever change after the build.

use log::trace;

use crate::menu::{Menu, NodeId, OpenState};

/// Key codes the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// From a legacy `KeyboardEvent.which` code.
    pub fn from_code(code: u32) -> Self {
        match code {
            37 => Key::ArrowLeft,
            39 => Key::ArrowRight,
            _ => Key::Other,
        }
    }

    /// From a `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// The element an event was dispatched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// The entry element itself (its label area, not a descendant entry).
    Label(NodeId),
    /// The link inside an entry.
    Link(NodeId),
    /// Anywhere else inside the menu container.
    MenuChrome,
    /// The control that shows the menu on small screens.
    MobileToggle,
    /// Page content outside the menu.
    Page,
}

impl EventTarget {
    /// Hit test against the menu root.
    pub fn is_inside_menu(self) -> bool {
        matches!(
            self,
            EventTarget::Label(_) | EventTarget::Link(_) | EventTarget::MenuChrome
        )
    }

    fn node(self) -> Option<NodeId> {
        match self {
            EventTarget::Label(id) | EventTarget::Link(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Click(EventTarget),
    KeyDown(EventTarget, Key),
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A click flipped the entry to the given state.
    Toggled(NodeId, OpenState),
    /// A key forced the entry into the given state.
    Set(NodeId, OpenState),
    /// The browser should follow this link; nothing changed in the menu.
    FollowLink(String),
    /// The mobile menu is now shown (`true`) or hidden.
    MobileMenu(bool),
    Ignored,
}

#[derive(Debug)]
pub struct InteractionController {
    menu: Menu,
    mobile_visible: bool,
}

impl InteractionController {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            mobile_visible: false,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn into_menu(self) -> Menu {
        self.menu
    }

    pub fn mobile_visible(&self) -> bool {
        self.mobile_visible
    }

    /// Current state of an entry; `None` for unknown ids.
    pub fn open_state(&self, id: NodeId) -> Option<OpenState> {
        self.menu.get(id).map(|n| n.open_state)
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.open_state(id) == Some(OpenState::Open)
    }

    /// Single entry point for every event inside or around the menu.
    pub fn dispatch(&mut self, event: MenuEvent) -> Outcome {
        trace!("dispatch {event:?}");
        match event {
            MenuEvent::Click(target) => self.click(target),
            MenuEvent::KeyDown(target, key) => match (target.node(), key) {
                (Some(id), Key::ArrowRight) => self.set_open(id, OpenState::Open),
                (Some(id), Key::ArrowLeft) => self.set_open(id, OpenState::Closed),
                _ => Outcome::Ignored,
            },
        }
    }

    fn click(&mut self, target: EventTarget) -> Outcome {
        if target == EventTarget::MobileToggle {
            self.mobile_visible = !self.mobile_visible;
            return Outcome::MobileMenu(self.mobile_visible);
        }
        if self.mobile_visible && !target.is_inside_menu() {
            self.mobile_visible = false;
            return Outcome::MobileMenu(false);
        }
        match target {
            EventTarget::Label(id) => match self.toggle(id) {
                Outcome::Ignored => self.follow(id),
                toggled => toggled,
            },
            EventTarget::Link(id) => self.follow(id),
            _ => Outcome::Ignored,
        }
    }

    fn follow(&self, id: NodeId) -> Outcome {
        match self.menu.get(id).and_then(|n| n.url.clone()) {
            Some(url) => Outcome::FollowLink(url),
            None => Outcome::Ignored,
        }
    }

    /// Flip a collapsible entry. Leaf entries and unknown ids are ignored.
    pub fn toggle(&mut self, id: NodeId) -> Outcome {
        match self.menu.get_mut(id) {
            Some(node) if node.is_collapsible() => {
                node.open_state = node.open_state.toggle();
                Outcome::Toggled(id, node.open_state)
            }
            _ => Outcome::Ignored,
        }
    }

    /// Force a collapsible entry into `state`.
    pub fn set_open(&mut self, id: NodeId, state: OpenState) -> Outcome {
        match self.menu.get_mut(id) {
            Some(node) if node.is_collapsible() => {
                node.open_state = state;
                Outcome::Set(id, state)
            }
            _ => Outcome::Ignored,
        }
    }
}
