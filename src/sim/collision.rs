//! Hook-tip vs item hit testing
//!
//! Items are scanned in list order and the first uncaught box containing the
//! tip wins. Overlapping items behind it are left alone until the next cast.

use glam::Vec2;

use super::items::Item;

/// Index of the first uncaught item containing `tip`
pub fn find_catch(tip: Vec2, items: &[Item]) -> Option<usize> {
    items.iter().position(|item| !item.caught && item.contains(tip))
}

/// Number of items currently flagged as caught (0 or 1 in a valid state)
pub fn caught_count(items: &[Item]) -> usize {
    items.iter().filter(|item| item.caught).count()
}
