//! Namespaced identifiers (`namespace:path`).
//!
//! Users write `diamond_ore`; the host reports `minecraft:diamond_ore`. Both
//! sides are normalized to the namespaced form before comparison.

use std::borrow::Cow;

use crate::constants::DEFAULT_NAMESPACE;

/// Returns `id` in `namespace:path` form.
///
/// Already-namespaced ids are borrowed unchanged, so the common host-side
/// query does not allocate. Surrounding whitespace is trimmed.
#[must_use]
pub fn normalize_identifier(id: &str) -> Cow<'_, str> {
    let id = id.trim();
    if id.contains(':') {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!("{DEFAULT_NAMESPACE}:{id}"))
    }
}
