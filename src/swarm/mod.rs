mod canvas;
mod field;
mod renderer;
mod surface;

pub use canvas::{Canvas, DrawCommand};
pub use renderer::{RenderMode, SwarmRenderer};
pub use surface::{FrameScheduler, Glow};
