//! Structural role classification for weighted relationship graphs

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod roles;
pub mod storage;

pub use config::Config;
pub use error::{ConvergenceError, LoadError, Result, RoleError};
pub use graph::GraphViews;
pub use metrics::{MetricProvider, StandardMetrics};
pub use roles::{classify, classify_roles, Classification, Role, RoleAssignment};
