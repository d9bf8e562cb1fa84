//! Instalearn - microlearning reels and a quiz companion
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod playback;
pub mod quiz;
