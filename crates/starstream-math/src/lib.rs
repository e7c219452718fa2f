//! Parallax math and viewpoint-relative rectangles for the Starstream engine.

mod parallax;
mod rect;

pub use parallax::{parallax, parallax_delta, visual_scale};
pub use rect::Rect;
