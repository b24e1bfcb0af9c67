//! UI modules for the route planner window.

pub mod app_shell;
pub mod details;
pub mod map_view;
pub mod sidebar;
pub mod utils;
