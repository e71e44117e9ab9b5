//! Fern compiler driver.
//!
//! Wires the pipeline stages together (lex → parse → {format, canonicalize
//! → infer}), renders the multi-section golden record used by snapshot
//! testing, and implements the command-line interface.

pub mod cli;
pub mod commands;
pub mod pipeline;
pub mod snapshot;
