//! Common regex shapes for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Merchant name shapes, tested against whole lines
    pub static ref MERCHANT_CAPS: Regex = Regex::new(
        r"^[A-Z][A-Z\s&]{2,30}$"
    ).unwrap();

    pub static ref MERCHANT_MIXED: Regex = Regex::new(
        r"^[A-Za-z][A-Za-z\s&.]{3,25}$"
    ).unwrap();

    // Date shapes, in match priority order
    pub static ref DATE_DMY: Regex = Regex::new(
        r"(\d{1,2})[/\-](\d{1,2})[/\-](\d{2,4})"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"(\d{2,4})[/\-](\d{1,2})[/\-](\d{1,2})"
    ).unwrap();

    pub static ref DATE_MONTH_ABBR: Regex = Regex::new(
        r"(?i)(\d{1,2})\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+(\d{2,4})"
    ).unwrap();

    pub static ref DATE_MONTH_FULL: Regex = Regex::new(
        r"(?i)(\d{1,2})\s+(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{2,4})"
    ).unwrap();

    // Time of purchase, optional seconds and meridiem
    pub static ref TIME: Regex = Regex::new(
        r"(?i)\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?:AM|PM))?"
    ).unwrap();

    // Amount token shapes
    pub static ref AMOUNT_RP: Regex = Regex::new(
        r"(Rp\.?\s*)?(\d{1,3}(?:[,.]\d{3})*(?:[,.]\d{2})?)"
    ).unwrap();

    pub static ref AMOUNT_DOLLAR: Regex = Regex::new(
        r"\$\s*(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)"
    ).unwrap();

    pub static ref AMOUNT_CODE: Regex = Regex::new(
        r"(?i)(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)\s*(USD|SGD|MYR)"
    ).unwrap();

    // Whole-line `<name> <amount>` item shape
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^(.+?)\s+(Rp\.?\s*)?(\d{1,3}(?:[,.]\d{3})*(?:[,.]\d{2})?)$"
    ).unwrap();

    // D/M/Y-like token, used only to classify lines
    pub static ref DATE_LIKE: Regex = Regex::new(
        r"\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}"
    ).unwrap();
}
