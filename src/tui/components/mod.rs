// Components module - UI building blocks for the viewer
//
// Panels (own state, implement the trait system):
// - Sidebar: filtered, highlighted section list with the search box
// - Document: the rendered reference page
//
// Shell components (plain render functions):
// - Title bar, status bar, logs strip, load-phase placeholder

pub mod document;
pub mod loading;
pub mod logs_strip;
pub mod scrollbar;
pub mod search_bar;
pub mod sidebar;
pub mod status_bar;
pub mod title_bar;

pub use document::DocumentPanel;
pub use sidebar::SidebarPanel;
