//! Component trait system for the viewer TUI
//!
//! Panels declare their capabilities through traits instead of `App`
//! knowing how to scroll, select or copy for each one.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                    App                       │
//! │   (routes keys, owns the Viewer and panels)  │
//! └──────────────────────────────────────────────┘
//!                 │                  │
//!                 ▼                  ▼
//!          ┌────────────┐     ┌────────────┐
//!          │  Sidebar   │     │  Document  │
//!          └────────────┘     └────────────┘
//!        Component, Selectable  Component, Scrollable,
//!        Interactive            Copyable, Interactive
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] - owns a `ScrollState`
//! - [`Selectable`] - cursor over a list of items
//! - [`Copyable`] - names the code block `y` copies
//! - [`Interactive`] - handles keys, bubbling the rest back to `App`

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::Copyable;
pub use interactive::{Handled, Interactive};
pub use scrollable::{Scrollable, Selectable};
