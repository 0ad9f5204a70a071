//! Menu visibility state
//!
//! Two menus hang off the account header: the account selector and the
//! per-account options menu. At most one is open at a time. Pointer input
//! comes from the host as a [`PointerTarget`] so the transitions can run
//! without a real DOM.
//!
//! ```text
//! MenuState × MenuEvent → MenuState
//! ```

// ============================================================================
// Menus
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    AccountSelector,
    Options,
}

impl Menu {
    pub const fn sibling(self) -> Self {
        match self {
            Self::AccountSelector => Self::Options,
            Self::Options => Self::AccountSelector,
        }
    }
}

/// Where a pointer press landed, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the region owned by a menu (its trigger included)
    Inside(Menu),
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu's trigger was activated
    Toggle(Menu),
    /// Close whatever is open (after an action ran, for instance)
    CloseAll,
    Pointer(PointerTarget),
}

// ============================================================================
// State
// ============================================================================

/// Both menus start closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    selector_open: bool,
    options_open: bool,
}

impl MenuState {
    pub fn is_open(&self, menu: Menu) -> bool {
        match menu {
            Menu::AccountSelector => self.selector_open,
            Menu::Options => self.options_open,
        }
    }

    pub fn open_menu(&self) -> Option<Menu> {
        if self.selector_open {
            Some(Menu::AccountSelector)
        } else if self.options_open {
            Some(Menu::Options)
        } else {
            None
        }
    }

    fn opened(menu: Menu) -> Self {
        match menu {
            Menu::AccountSelector => Self {
                selector_open: true,
                options_open: false,
            },
            Menu::Options => Self {
                selector_open: false,
                options_open: true,
            },
        }
    }

    /// Apply one event.
    ///
    /// Opening a menu closes its sibling, and any open→closed transition
    /// closes both.
    #[must_use]
    pub fn apply(self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::Toggle(menu) if self.is_open(menu) => Self::default(),
            MenuEvent::Toggle(menu) => Self::opened(menu),
            MenuEvent::CloseAll => Self::default(),
            MenuEvent::Pointer(PointerTarget::Inside(menu)) => match self.open_menu() {
                Some(open) if open != menu => Self::default(),
                _ => self,
            },
            MenuEvent::Pointer(PointerTarget::Outside) => Self::default(),
        }
    }
}
