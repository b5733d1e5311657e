//! Hardware abstraction traits
//!
//! These traits define the interface between the console logic
//! and display-specific implementations.

pub mod pixel;

pub use pixel::PixelDriver;
