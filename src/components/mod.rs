//! UI components.

pub mod flow_canvas;
pub(crate) mod shell_bar;
