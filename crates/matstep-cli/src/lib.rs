//! Front end for `matstep-engine`: a letter-coded matrix store, a JSON
//! request protocol executed by `Session`, and the readers and renderers
//! used by the `matstep` binary.
pub mod config;
pub mod input;
pub mod report;
pub mod session;
pub mod store;
