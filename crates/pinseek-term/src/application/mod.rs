//! Application layer orchestrating the terminal interface.
//!
//! This module owns the main UI loop and the draw functions, coordinating
//! between the domain services and the terminal backend.

pub mod ui;
