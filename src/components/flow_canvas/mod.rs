//! Interactive flowchart canvas.
//!
//! The engine half (`model`, `viewport`, `selection`, `editor`, `gesture`,
//! `session`) is plain Rust and knows the page only through [`Surface`].
//! `canvas_surface`, `render` and `component` are the browser half.

mod canvas_surface;
mod component;
mod editor;
mod error;
mod gesture;
mod model;
mod render;
mod selection;
mod session;
mod shapes;
mod surface;
mod types;
mod viewport;

pub use canvas_surface::CanvasSurface;
pub use component::{CanvasHandle, FlowCanvas};
pub use error::MountError;
pub use gesture::{GestureState, ViewState};
pub use model::DiagramModel;
pub use selection::Selection;
pub use session::{CanvasCommands, CanvasSession};
pub use shapes::{
	Edge, EdgeStyle, EditMode, Node, NodeOverrides, NodeStyle, Shape, create_edge, create_node,
};
pub use surface::Surface;
pub use types::{Cursor, InputEvent, MouseButton, Point, Rect, ShapeId, Target, ZoomDirection};
pub use viewport::Viewport;
