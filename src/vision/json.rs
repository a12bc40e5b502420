//! Decoding the model's receipt reply

use serde::Deserialize;

use crate::error::{SplitterError, SplitterResult};
use crate::models::{LineItem, Money, Receipt};

/// One receipt line as the model reports it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisionLine {
    pub name: String,
    pub euro_cents: i64,
}

/// Strip anything before the first `[` and after the last `]`
///
/// Models like to wrap JSON in a fenced code block or add a greeting. Text
/// without brackets is returned unchanged.
pub fn clean_json_array(content: &str) -> &str {
    let start = content.find('[').unwrap_or(0);
    let content = &content[start..];
    match content.rfind(']') {
        Some(end) => &content[..=end],
        None => content,
    }
}

/// Decode a reply into a receipt with unassigned items
pub fn decode_receipt(reply: &str) -> SplitterResult<Receipt> {
    let lines: Vec<VisionLine> = serde_json::from_str(clean_json_array(reply))
        .map_err(|e| SplitterError::Vision(format!("invalid JSON reply: {}", e)))?;

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let price = Money::from_cents(line.euro_cents);
        if !price.fits_line_limit() {
            return Err(SplitterError::Vision(format!(
                "price of {:?} is out of range: {} cents",
                line.name, line.euro_cents
            )));
        }
        items.push(LineItem::new(line.name.trim(), price));
    }
    Ok(Receipt::new(items))
}
