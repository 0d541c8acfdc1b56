//! Adapter families implementing the port traits.

pub mod live;
pub mod recording;
pub mod replaying;
