mod component;
mod frame;
mod render;
mod state;
mod types;

pub use component::DiagramCanvas;
pub use types::{GraphData, RenderError};
