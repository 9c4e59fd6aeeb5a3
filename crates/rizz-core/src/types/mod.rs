//! Domain types shared by the annotation, completion and reply modules.

mod image;
mod vibe;

pub use image::{ImageError, ImageSource};
pub use vibe::Vibe;
