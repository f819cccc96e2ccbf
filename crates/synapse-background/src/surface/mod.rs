//! Drawing surfaces the animators render onto.

mod canvas;
mod recording;
mod transform;

pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use transform::Transform;
