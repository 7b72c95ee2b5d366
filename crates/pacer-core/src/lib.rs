//! Pacing and focus-point engine for RSVP reading.
//!
//! The crate is platform agnostic: it owns the token sequence, the playback
//! state machine and the delay policy, and is driven by a monotonic
//! millisecond clock supplied by the caller.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod content;
pub mod input;
pub mod pacing;
pub mod render;
pub mod settings;
pub mod text_policy;
