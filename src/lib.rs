//! gs-provision: Grandstream provisioning file generator
//!
//! A library for merging a base phone configuration with per-device
//! SIP credentials and rendering one provisioning document per device.

pub mod config;
pub mod device;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod roster;
pub mod settings;
