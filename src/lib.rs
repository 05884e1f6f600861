pub mod config;
pub mod fares;
pub mod fetch;
pub mod output;
pub mod run;
