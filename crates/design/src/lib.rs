//! Design-data REST client and document analysis.
//!
//! - [`api`] -- thin [`reqwest`] wrapper over the Figma REST endpoints the
//!   read tools need (files, comments, image exports).
//! - [`extract`] -- pure functions that summarise a document tree: node
//!   structure and the design system (colours, typography, components,
//!   spacing) in use.

pub mod api;
pub mod extract;

pub use api::{FigmaApi, FigmaApiError};
