pub mod ai;
pub mod export;
pub mod extraction;
pub mod health;
pub mod output;
pub mod project;
pub mod rating;
pub mod scenario;
