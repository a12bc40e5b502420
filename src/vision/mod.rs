//! Reading receipts from photos through a vision-capable chat model

pub mod json;
pub mod openai;

pub use json::{clean_json_array, decode_receipt};
pub use openai::{OpenAiVision, VisionClient};
