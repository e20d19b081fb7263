pub mod extraction;
pub mod metric;
