pub mod analysis;
pub mod dto;
pub mod entity;
pub mod handler;
pub mod metrics;
pub mod prompt;
pub mod service;
