//! Command-line front end for colsense column classification.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
