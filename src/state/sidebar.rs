//! Sidebar navigation state

use super::app_state::View;
use super::forms::FormKind;

/// Order of the entries under "Registration"
const REGISTRATION_ENTRIES: [FormKind; 3] =
    [FormKind::Employee, FormKind::Company, FormKind::Address];

/// An entry of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Dashboard,
    /// Collapsible group holding the registration forms
    Registration,
    Register(FormKind),
    Logout,
}

impl SidebarItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Registration => "Registration",
            Self::Register(kind) => kind.entity(),
            Self::Logout => "Log out",
        }
    }

    /// Whether this entry is the one for `view`
    pub fn is_active(&self, view: &View) -> bool {
        match self {
            Self::Dashboard => matches!(view, View::Dashboard),
            Self::Registration => view.is_form_view(),
            Self::Register(kind) => view.form_kind() == Some(*kind),
            Self::Logout => false,
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Self::Register(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub selected: usize,
    pub registration_expanded: bool,
}

impl SidebarState {
    /// Entries currently visible, top to bottom
    pub fn items(&self) -> Vec<SidebarItem> {
        let mut items = vec![SidebarItem::Dashboard, SidebarItem::Registration];
        if self.registration_expanded {
            items.extend(REGISTRATION_ENTRIES.iter().map(|k| SidebarItem::Register(*k)));
        }
        items.push(SidebarItem::Logout);
        items
    }

    pub fn selected_item(&self) -> Option<SidebarItem> {
        self.items().get(self.selected).copied()
    }

    pub fn move_down(&mut self) {
        let count = self.items().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Expand or collapse the registration group, keeping the selection on it
    pub fn toggle_registration(&mut self) {
        self.registration_expanded = !self.registration_expanded;
        self.select(SidebarItem::Registration);
    }

    /// Move the selection to `item`, expanding its group if needed
    pub fn select(&mut self, item: SidebarItem) {
        if item.is_child() {
            self.registration_expanded = true;
        }
        if let Some(index) = self.items().iter().position(|i| *i == item) {
            self.selected = index;
        }
    }

    /// Follow navigation to `view`
    pub fn sync_with(&mut self, view: &View) {
        match view.form_kind() {
            Some(kind) => self.select(SidebarItem::Register(kind)),
            None if matches!(view, View::Dashboard) => self.select(SidebarItem::Dashboard),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapsed_items() {
        let sidebar = SidebarState::default();
        assert_eq!(
            sidebar.items(),
            vec![
                SidebarItem::Dashboard,
                SidebarItem::Registration,
                SidebarItem::Logout
            ]
        );
    }

    #[test]
    fn test_toggle_expands_submenu() {
        let mut sidebar = SidebarState::default();
        sidebar.move_down();
        sidebar.toggle_registration();
        assert_eq!(sidebar.items().len(), 6);
        assert_eq!(sidebar.selected_item(), Some(SidebarItem::Registration));
        sidebar.move_down();
        assert_eq!(
            sidebar.selected_item(),
            Some(SidebarItem::Register(FormKind::Employee))
        );
    }

    #[test]
    fn test_collapse_keeps_selection_in_range() {
        let mut sidebar = SidebarState::default();
        sidebar.select(SidebarItem::Register(FormKind::Address));
        assert!(sidebar.registration_expanded);
        sidebar.toggle_registration();
        assert_eq!(sidebar.selected_item(), Some(SidebarItem::Registration));
    }

    #[test]
    fn test_move_bounds() {
        let mut sidebar = SidebarState::default();
        sidebar.move_up();
        assert_eq!(sidebar.selected, 0);
        for _ in 0..10 {
            sidebar.move_down();
        }
        assert_eq!(sidebar.selected_item(), Some(SidebarItem::Logout));
    }

    #[test]
    fn test_sync_with_form_view() {
        let mut sidebar = SidebarState::default();
        sidebar.sync_with(&View::CompanyRegistration);
        assert_eq!(
            sidebar.selected_item(),
            Some(SidebarItem::Register(FormKind::Company))
        );
        assert!(SidebarItem::Registration.is_active(&View::CompanyRegistration));
    }
}
