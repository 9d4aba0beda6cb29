//! Progress reporting while tools run

pub mod reporter;
