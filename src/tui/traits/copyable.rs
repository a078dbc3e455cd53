//! Copyable trait for components that expose a copy target
//!
//! Copy text always comes from the loaded content, never from what is on
//! screen, so a component only names which code block `y` refers to.

use super::Component;

pub trait Copyable: Component {
    /// Id of the code block a copy keypress should copy, if any
    fn copy_target(&self) -> Option<&str>;
}
