//! gridmux: declarative tmux layouts from ASCII grids.
//!
//! A grid such as
//!
//! ```text
//! AAB
//! AAB
//! CCC
//! ```
//!
//! is validated (every label must form one rectangle) and turned into a
//! binary split tree by guillotine cuts. The tree is then rendered as tmux
//! `split-window` / `send-keys` operations.
//!
//! Layers follow the usual direction of dependency:
//! `cli` -> `infrastructure` -> `application` -> `domain`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
