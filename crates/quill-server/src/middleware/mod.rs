//! Tower middleware layers.

pub(crate) mod security;
