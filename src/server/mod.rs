//! Network front end: binds the listening socket and hands each accepted
//! connection to its own task.

pub mod listener;

pub use listener::{run, serve};
