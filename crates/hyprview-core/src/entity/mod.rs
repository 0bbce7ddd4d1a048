//! Entity layer: records bound to the snapshot they came from
//!
//! An entity is a `Copy` handle holding a validated record and a borrowed
//! back-reference to its [`Snapshot`](crate::registry::Snapshot). It never
//! stores its relatives. Relationship accessors look the relative up by key
//! in that snapshot every time they are called, so they can only ever see
//! the snapshot the handle was borrowed from.

mod monitor;
mod window;
mod workspace;

use std::borrow::Cow;

pub use monitor::Monitor;
pub use window::Window;
pub use workspace::Workspace;

use crate::error::ModelError;
use crate::schema::HexAddress;

/// Titles longer than this are shortened in display output
pub const MAX_TITLE_CHARS: usize = 24;

const ELLIPSIS: &str = "...";

/// Shorten `title` to `MAX_TITLE_CHARS` characters, ellipsis included
pub fn truncate_title(title: &str) -> Cow<'_, str> {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return Cow::Borrowed(title);
    }

    let keep = MAX_TITLE_CHARS - ELLIPSIS.len();
    let mut short: String = title.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    Cow::Owned(short)
}

pub(crate) fn address_to_int(field: &'static str, address: &HexAddress) -> Result<u64, ModelError> {
    address.to_u64().map_err(|source| ModelError::InvalidHex {
        field,
        value: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_title_is_truncated() {
        let title = "abcdefghijklmnopqrstuvwxyz0123"; // 30 chars
        let short = truncate_title(title);

        assert_eq!(short, "abcdefghijklmnopqrstu...");
        assert_eq!(short.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_title_at_limit_is_untouched() {
        let title = "abcdefghijklmnopqrstuvwx"; // 24 chars
        assert!(matches!(truncate_title(title), Cow::Borrowed(t) if t == title));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let title = "ünïcödé ".repeat(4); // 32 chars, more bytes
        let short = truncate_title(&title);

        assert_eq!(short.chars().count(), MAX_TITLE_CHARS);
        assert!(short.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_address_to_int_reports_field() {
        let huge = HexAddress::parse("0x1ffffffffffffffff").unwrap();
        match address_to_int("address", &huge) {
            Err(ModelError::InvalidHex { field, value, .. }) => {
                assert_eq!(field, "address");
                assert_eq!(value, "0x1ffffffffffffffff");
            }
            other => panic!("Expected InvalidHex, got {:?}", other),
        }
    }
}
