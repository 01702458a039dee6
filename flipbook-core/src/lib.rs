/// Flipbook Core Library - page turn transforms
///
/// This library provides the CSS-style 4x4 transform engine that drives the
/// flipbook page turn, its `matrix3d(...)` text codec, point projection, the
/// page turn geometry built on top of it, and the interface to the document
/// renderer that supplies page images.

pub mod css;
pub mod document;
pub mod error;
pub mod flip;
pub mod matrix;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use document::{DocumentSource, PageImage, PageRenderer, RenderError};
pub use error::{Error, Result};
pub use flip::{Face, FlipConfig, FlipDirection, FlipFrame, PageFlip, Polygon};
pub use matrix::Matrix;
pub use transform::Matrix3D;
