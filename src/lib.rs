//! Two on-screen trackers steered by keyboard, mouse and gamepad, streamed
//! to a lighting console as comma-separated UDP datagrams.

pub mod config;
pub mod frame_loop;
pub mod input;
pub mod network;
pub mod setup;
pub mod tracking;
pub mod ui;
