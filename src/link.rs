//! Deep links: `#gif-<N>` fragments naming a catalog item (1-based).
//!
//! The modal controller writes the fragment when an item opens and clears it
//! on close; at startup a fragment naming an in-range item reopens it.

use std::time::Duration;

/// Prefix of the fragment, without the leading `#`.
pub const FRAGMENT_PREFIX: &str = "gif-";

/// Delay before a startup deep link opens, letting the first layout settle.
pub const DEEP_LINK_DELAY: Duration = Duration::from_millis(100);

/// Fragment for the item at `catalog_index` (0-based).
pub fn fragment_for(catalog_index: usize) -> String {
    format!("{}{}", FRAGMENT_PREFIX, catalog_index + 1)
}

/// Parse a fragment (with or without `#`) into its 1-based catalog number.
pub fn parse_fragment(fragment: &str) -> Option<usize> {
    let body = fragment.strip_prefix('#').unwrap_or(fragment);
    let digits = body.strip_prefix(FRAGMENT_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|&n| n > 0)
}

/// Catalog index a startup fragment should open, if it names an in-range item.
pub fn startup_target(fragment: &str, catalog_len: usize) -> Option<usize> {
    parse_fragment(fragment)
        .filter(|&n| n <= catalog_len)
        .map(|n| n - 1)
}

/// Absolute link to an item: the page URL with its fragment replaced.
pub fn absolute_link(page_url: &str, catalog_index: usize) -> String {
    let base = page_url
        .split_once('#')
        .map(|(base, _)| base)
        .unwrap_or(page_url);
    format!("{}#{}", base, fragment_for(catalog_index))
}
