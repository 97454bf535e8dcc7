//! # apt-solar — Solar revenue projection.
//!
//! The funding raise buys solar capacity at a fixed cost per MW. Capacity
//! comes online linearly over the deployment window and then holds at
//! nameplate for the rest of the horizon. Every month's revenue is
//! `capacity × generation hours × price per kWh`, with a running total.

pub mod projector;

pub use projector::{project_default_revenue, project_revenue, RevenueProjector};
