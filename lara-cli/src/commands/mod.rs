//! Command implementations for the LaRA CLI

pub mod edges;
