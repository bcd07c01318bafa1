//! Command handlers -- one module per command

pub mod scan;
