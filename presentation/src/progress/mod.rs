//! Progress reporters for the close operation

pub mod reporter;
