use std::collections::BTreeMap;

/// Source position to aligned target positions, built from raw `i-j` pairs.
///
/// Positions missing from the alignment have no entry; that is the usual
/// case for a sparse alignment, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentIndex {
    targets: BTreeMap<usize, Vec<usize>>,
}

impl AlignmentIndex {
    /// Groups `(source, target)` pairs by source position.
    ///
    /// Targets come out ascending and deduplicated.
    pub fn new(pairs: &[(usize, usize)]) -> Self {
        let mut sorted = pairs.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let targets = sorted
            .chunk_by(|a, b| a.0 == b.0)
            .map(|group| (group[0].0, group.iter().map(|&(_, target)| target).collect()))
            .collect();

        Self { targets }
    }

    /// Aligns position `i` to position `i` for every `i < len`.
    pub fn identity(len: usize) -> Self {
        Self {
            targets: (0..len).map(|position| (position, vec![position])).collect(),
        }
    }

    pub fn targets_for(&self, source: usize) -> Option<&[usize]> {
        self.targets.get(&source).map(Vec::as_slice)
    }

    /// Number of aligned source positions.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.targets
            .iter()
            .map(|(source, targets)| (*source, targets.as_slice()))
    }

    /// The pairs this index was built from, sorted.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, *target)))
            .collect()
    }

    /// The same alignment read from the target side.
    pub fn inverted(&self) -> Self {
        let swapped: Vec<(usize, usize)> = self
            .pairs()
            .into_iter()
            .map(|(source, target)| (target, source))
            .collect();
        Self::new(&swapped)
    }
}

impl FromIterator<(usize, usize)> for AlignmentIndex {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let pairs: Vec<(usize, usize)> = iter.into_iter().collect();
        Self::new(&pairs)
    }
}
