//! Engine-facing contracts.
//!
//! This module defines the narrow interface between the frame driver and the
//! compiled engine it drives: a loadable module that constructs clients, and a
//! client that is updated and rendered once per executed frame.

mod client;
mod module;

pub use client::EngineClient;
pub use module::{EngineModule, FactoryModule, ModuleLoader, StaticLoader};
