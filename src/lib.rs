// Library for tests to access modules

pub mod config;
pub mod dashboard;
pub mod logger;
pub mod models;
pub mod probes;
pub mod report;
pub mod settings;
pub mod trigger;
pub mod worker;
