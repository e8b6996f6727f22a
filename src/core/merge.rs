use crate::core::{OptionMap, OptionValue};

impl OptionValue {
    /// Structural merge of `overlay` onto `self`, returning a new value.
    ///
    /// Objects merge key by key, recursively. Keys already present in the base
    /// keep their position; new keys are appended in overlay order. Any other
    /// pairing takes the overlay as-is, so arrays are replaced, not spliced.
    #[must_use]
    pub fn merged(&self, overlay: &OptionValue) -> OptionValue {
        match (self, overlay) {
            (Self::Object(base), Self::Object(patch)) => Self::Object(merge_maps(base, patch)),
            _ => overlay.clone(),
        }
    }
}

fn merge_maps(base: &OptionMap, patch: &OptionMap) -> OptionMap {
    let mut out = base.clone();
    for (key, value) in patch {
        let merged = match out.get(key) {
            Some(existing) => existing.merged(value),
            None => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}
