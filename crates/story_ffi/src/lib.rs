//! Flutter bridge crate for the story editor.

pub mod api;
