//! Graph representation and structural algorithms module

pub mod algorithms;
pub mod builder;
pub mod views;

pub use builder::GraphBuilder;
pub use views::{DirectedView, GraphViews, UndirectedView};
