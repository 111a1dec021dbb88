#![forbid(unsafe_code)]

pub mod api;
pub mod cli;
pub mod crawl;
pub mod dataset;
pub mod extract;
pub mod formats;
pub mod logging;
