pub mod correspondence;
pub mod data;
pub mod timing;
pub mod validation;
