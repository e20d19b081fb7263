pub mod dto;
pub mod handler;
pub mod markdown;
pub mod selection;
pub mod service;
pub mod suite;
