//! Library side of the growth calculator CLI.

pub mod input;
pub mod logging;
pub mod output;
pub mod summary;
