//! Domain layer: grid parsing, rectangle validation and split planning
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod graph;
pub mod grid;
pub mod planner;
pub mod region;
pub mod validator;

pub use entities::*;
pub use error::{DomainError, DomainResult, GridDefect};
pub use graph::{NodeId, PaneGraph, PreOrder, SplitDirection, SplitNode, Visit};
pub use grid::Matrix;
pub use planner::{plan, plan_grid, plan_tiling};
pub use region::Region;
pub use validator::{validate_rectangles, Tiling};
