use fnv::FnvHashSet;
use orbit_core::OrbKey;

/// How the orb elements must change to match a new layout.
///
/// Elements whose key survives are kept as they are, so a node under the
/// pointer is never detached by a refresh.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ElementDiff {
    pub stale: Vec<OrbKey>,
    pub missing: Vec<OrbKey>,
}

impl ElementDiff {
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }
}

pub fn diff_elements<'a>(
    existing: impl IntoIterator<Item = &'a OrbKey>,
    wanted: &[OrbKey],
) -> ElementDiff {
    let wanted_set: FnvHashSet<&OrbKey> = wanted.iter().collect();
    let existing_set: FnvHashSet<&OrbKey> = existing.into_iter().collect();

    let mut stale: Vec<OrbKey> = existing_set
        .iter()
        .filter(|k| !wanted_set.contains(*k))
        .map(|k| (*k).clone())
        .collect();
    stale.sort();
    let missing = wanted
        .iter()
        .filter(|k| !existing_set.contains(k))
        .cloned()
        .collect();
    ElementDiff { stale, missing }
}
