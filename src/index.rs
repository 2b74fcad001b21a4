//! Row labels shared by series and frames.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{GeoFrameError, Result};
use crate::scalar::Label;

/// An ordered sequence of row labels with an optional name.
///
/// Labels are not required to be unique; lookups resolve to the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    labels: Vec<Label>,
    name: Option<String>,
}

impl Index {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels, name: None }
    }

    /// The default `0..len` integer index.
    pub fn range(len: usize) -> Self {
        Self::new((0..len as i64).map(Label::Int).collect())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// The label at position `i`.
    pub fn get(&self, i: usize) -> Option<&Label> {
        self.labels.get(i)
    }

    pub fn is_unique(&self) -> bool {
        let mut seen = HashMap::with_capacity(self.len());
        self.labels.iter().all(|l| seen.insert(l, ()).is_none())
    }

    /// Position of the first occurrence of `label`.
    pub fn get_loc(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Position of the first occurrence of `label`, failing with [`GeoFrameError::KeyError`].
    pub fn try_get_loc(&self, label: &Label) -> Result<usize> {
        self.get_loc(label)
            .ok_or_else(|| GeoFrameError::KeyError(label.to_string()))
    }

    /// Positions of every requested label. Fails on the first label that is absent.
    pub fn get_locs(&self, labels: &[Label]) -> Result<Vec<usize>> {
        let indexer = self.get_indexer(labels);
        indexer
            .into_iter()
            .zip(labels)
            .map(|(pos, label)| pos.ok_or_else(|| GeoFrameError::KeyError(label.to_string())))
            .collect()
    }

    /// Positions of every requested label, `None` where a label is absent.
    pub fn get_indexer(&self, labels: &[Label]) -> Vec<Option<usize>> {
        let mut first_positions: HashMap<&Label, usize> = HashMap::with_capacity(self.len());
        for (i, label) in self.labels.iter().enumerate() {
            first_positions.entry(label).or_insert(i);
        }
        labels
            .iter()
            .map(|label| first_positions.get(label).copied())
            .collect()
    }

    /// Positional range covered by the inclusive label bounds `start..=end`.
    ///
    /// A missing bound extends to the start or end of the index.
    pub fn slice_locs(&self, start: Option<&Label>, end: Option<&Label>) -> Result<Range<usize>> {
        let lo = match start {
            Some(label) => self.try_get_loc(label)?,
            None => 0,
        };
        let hi = match end {
            Some(label) => {
                let last = self
                    .labels
                    .iter()
                    .rposition(|l| l == label)
                    .ok_or_else(|| GeoFrameError::KeyError(label.to_string()))?;
                last + 1
            }
            None => self.len(),
        };
        Ok(lo..hi.max(lo))
    }

    pub fn take(&self, positions: &[usize]) -> Self {
        Self {
            labels: positions.iter().map(|&i| self.labels[i].clone()).collect(),
            name: self.name.clone(),
        }
    }

    pub fn filter(&self, mask: &[bool]) -> Self {
        Self {
            labels: self
                .labels
                .iter()
                .zip(mask)
                .filter_map(|(label, keep)| keep.then(|| label.clone()))
                .collect(),
            name: self.name.clone(),
        }
    }

    /// Labels at positions `range`. A reversed or out of bounds range fails.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        let labels = self
            .labels
            .get(range.clone())
            .ok_or(GeoFrameError::IndexOutOfBounds {
                index: range.end,
                len: self.len(),
            })?;
        Ok(Self {
            labels: labels.to_vec(),
            name: self.name.clone(),
        })
    }
}

impl<L: Into<Label>> FromIterator<L> for Index {
    fn from_iter<T: IntoIterator<Item = L>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Label>> for Index {
    fn from(value: Vec<Label>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookups() {
        let index: Index = [2, 4, 5].into_iter().collect();
        assert_eq!(index.get_loc(&Label::from(4)), Some(1));
        assert_eq!(index.get_loc(&Label::from(3)), None);
        assert_eq!(
            index.get_indexer(&[Label::from(5), Label::from(9)]),
            vec![Some(2), None]
        );
        assert!(matches!(
            index.get_locs(&[Label::from(9)]),
            Err(GeoFrameError::KeyError(_))
        ));
    }

    #[test]
    fn duplicate_labels_resolve_to_first() {
        let index: Index = [1, 1, 2].into_iter().collect();
        assert!(!index.is_unique());
        assert_eq!(index.get_loc(&Label::from(1)), Some(0));
        assert_eq!(index.get_indexer(&[Label::from(1)]), vec![Some(0)]);
    }

    #[test]
    fn label_slices_are_inclusive() {
        let index: Index = [1, 2, 3].into_iter().collect();
        assert_eq!(index.slice_locs(Some(&Label::from(2)), None).unwrap(), 1..3);
        assert_eq!(
            index
                .slice_locs(Some(&Label::from(1)), Some(&Label::from(2)))
                .unwrap(),
            0..2
        );
        assert_eq!(
            index
                .slice_locs(Some(&Label::from(3)), Some(&Label::from(1)))
                .unwrap(),
            2..2
        );
    }

    #[test]
    fn take_filter_slice_keep_name() {
        let index = Index::range(3).with_name("id");
        assert_eq!(index.take(&[2, 0]).labels(), &[Label::from(2), Label::from(0)]);
        assert_eq!(index.filter(&[true, false, true]).name(), Some("id"));
        assert_eq!(
            index.slice(1..3).unwrap().labels(),
            &[Label::from(1), Label::from(2)]
        );
    }

    #[test]
    fn slice_out_of_bounds() {
        let index = Index::range(3);
        assert!(index.slice(3..3).unwrap().is_empty());
        let (start, end) = (2, 1);
        assert!(matches!(
            index.slice(start..end),
            Err(GeoFrameError::IndexOutOfBounds { index: 1, len: 3 })
        ));
        assert!(matches!(
            index.slice(1..4),
            Err(GeoFrameError::IndexOutOfBounds { index: 4, len: 3 })
        ));
    }
}
