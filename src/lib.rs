pub mod agent;
pub mod assignments;
pub mod config;
pub mod error;
pub mod google;
pub mod shutdown;
pub mod startup;
pub mod web;
