//! vlist
//!
//! Virtualized list engine: renders an arbitrarily long list through a small,
//! recycled set of surface nodes, with multi-selection, range selection and
//! drag-and-drop layered on top.
//!
//! Follows a Pure Core / Impure Shell split:
//! - `model`, `view_state`, `state` and `surface` never touch a terminal
//! - `view` drives a ratatui terminal for the demo binary

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod surface;
pub mod view;
pub mod view_state;
