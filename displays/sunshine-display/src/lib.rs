//! Rendering for the Sunshine watch face
//!
//! This crate provides:
//! - `FaceView`: everything one frame shows, captured at draw time
//! - `Scene`: the ordered draw operations for a view, laid out from config
//! - `render`: draws a scene onto any RGB565 `DrawTarget`
//!
//! # Architecture
//!
//! Composition is kept separate from drawing so the ambient and interactive
//! variants can be checked without a panel. The firmware hands the ST7789
//! driver to `render`; tests use an in-memory framebuffer.

#![no_std]
#![deny(unsafe_code)]

pub mod icon;
pub mod render;
pub mod scene;

#[cfg(test)]
mod testing;

pub use icon::ScaledIcon;
pub use render::{font_for, render};
pub use scene::{DrawOp, FaceView, Scene, MAX_DRAW_OPS};
