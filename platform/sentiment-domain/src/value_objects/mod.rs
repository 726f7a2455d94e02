pub mod contract;
pub mod detail;
pub mod label;
pub mod sentiment_result;
pub mod text_input;
