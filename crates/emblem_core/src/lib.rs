//! Emblem core primitives
//!
//! This crate provides the foundational types for the Emblem rendering engine:
//!
//! - **Color**: 8-bit RGB colors parsed from 6-hex-digit strings
//! - **Paint**: solid or two-stop linear gradient fill specifications
//! - **Raster buffers**: RGBA pixmaps and single-channel alpha masks
//! - **Gradient fill**: axis-aligned linear gradient generation
//!
//! # Example
//!
//! ```rust
//! use emblem_core::{gradient, Axis, Color, Paint};
//!
//! let paint = Paint::gradient(Color::parse("#FF0000")?, Color::parse("0000FF")?);
//! let pixmap = gradient::fill(256, 64, &paint, Axis::Horizontal);
//! assert_eq!(pixmap.pixel(0, 0), [255, 0, 0, 255]);
//! # Ok::<(), emblem_core::ColorError>(())
//! ```

pub mod color;
pub mod gradient;
pub mod paint;
pub mod raster;

pub use color::{Color, ColorError};
pub use paint::{Axis, Paint};
pub use raster::{AlphaMask, Pixmap};
