//! Heuristic field extractors over normalized receipt lines.
//!
//! Each extractor is a pure function of the line sequence and the extraction
//! configuration: deterministic, total over its input, and free of side
//! effects. Malformed text degrades confidence scores, never errors.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod lines;
pub mod merchant;
pub mod patterns;
pub mod tax;
pub mod total;

pub use amounts::{detect_currency, extract_amounts, parse_amount, scan_amount_tokens, AmountToken};
pub use dates::{extract_date, extract_time};
pub use items::extract_items;
pub use lines::{is_amount_line, is_date_line, normalize_lines};
pub use merchant::extract_merchant;
pub use tax::extract_tax;
pub use total::resolve_total;
