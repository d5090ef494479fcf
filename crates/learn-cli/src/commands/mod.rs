pub mod check;
pub mod config;
pub mod dataset;
pub mod dispatch;
pub mod learn;
pub mod lessons;
pub mod show;
