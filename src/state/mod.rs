//! Application state module

mod app_state;
pub mod forms;
mod notification;
mod sidebar;

pub use app_state::*;
pub use notification::{Notification, NotificationLevel};
pub use sidebar::SidebarItem;
