//! AI

pub(crate) mod summarize;
