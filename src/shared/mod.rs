//! Geteilte Bausteine ohne Domänenlogik.

pub mod options;

pub use options::EditorOptions;
