//! Talent network intake, admin dashboard filtering, and the hosted-backend
//! client used by the MissionAble Systems site.

pub mod backend;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
