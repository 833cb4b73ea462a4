//! Sidebar module for navigation

mod draw;

pub use draw::draw_sidebar;
