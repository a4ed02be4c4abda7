//!
//! # Def21 Design Exchange Format (DEF) Writer
//!
//! DEF describes the physical design of an integrated circuit:
//! its die area, rows and tracks, vias, components, pins, routed nets,
//! and a long tail of related constructs.
//!
//! Def21 writes DEF as a stream. A [DefWriter] owns one output destination and one session,
//! and exposes one method per DEF construct. Each method checks that its construct is legal
//! at the writer's current position in the DEF grammar, and under the declared DEF version,
//! before writing anything. Rejected calls return a [DefError] carrying a [DefStatus],
//! and write nothing.
//!
//! Two ways to drive a [DefWriter]:
//!
//! * Directly: [DefWriter::init] with a [DefHeader], a sequence of section calls, then [DefWriter::end].
//!   [to_string] and [save] wrap this pattern around a closure.
//! * Via callbacks: implement [DefCallbacks] and pass it to [write_with].
//!

// Internal modules
pub mod data;
pub use data::*;
pub mod error;
pub use error::*;
pub mod fmt;
pub mod state;
pub use state::*;
pub mod write;
pub use write::*;
pub mod callbacks;
pub use callbacks::*;

// Emitter modules, each adding methods to [DefWriter]
mod blockages;
mod components;
mod fills;
mod floorplan;
mod nets;
mod pins;
mod scan;
mod snets;
mod vias;

// Re-exports
pub use def21utils as utils;

#[cfg(test)]
mod tests;
