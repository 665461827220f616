pub mod config;
pub mod logging;

pub mod batch;
pub mod discovery;
pub mod error;
pub mod http;
pub mod issue;
pub mod resolver;
pub mod scrape;
pub mod site;
pub mod storage;
