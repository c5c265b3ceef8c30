//! Wave shooter: a terminal arcade shoot-em-up.
//!
//! The library holds the simulation: pure data in [`entities`], the state
//! machine in [`compute`], and the small services it runs on ([`physics`],
//! [`timers`], [`input`]). [`boot`] and [`config`] prepare a run; rendering
//! and the frame loop live in the binary.

pub mod boot;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod physics;
pub mod timers;
