use serde::{Deserialize, Serialize};

/// Target number of x-axis labels per chart.
pub const TARGET_LABELS: usize = 8;

/// Number of labels skipped between two shown labels.
///
/// `0` means every label is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickInterval(pub usize);

impl TickInterval {
    /// `floor(len / 8)`: roughly eight evenly spaced labels whatever the
    /// series length.
    pub const fn for_len(len: usize) -> Self {
        Self(len / TARGET_LABELS)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether the label at `index` is drawn: index 0 and then every
    /// `interval + 1`-th label.
    pub const fn is_labeled(self, index: usize) -> bool {
        index % (self.0 + 1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_floor_of_len_over_eight() {
        assert_eq!(TickInterval::for_len(0).get(), 0);
        assert_eq!(TickInterval::for_len(7).get(), 0);
        assert_eq!(TickInterval::for_len(8).get(), 1);
        assert_eq!(TickInterval::for_len(10).get(), 1);
        assert_eq!(TickInterval::for_len(100).get(), 12);
        for len in 0..500 {
            assert_eq!(TickInterval::for_len(len).get(), len / 8);
        }
    }

    #[test]
    fn zero_interval_labels_everything() {
        let interval = TickInterval::for_len(5);
        assert!((0..5).all(|index| interval.is_labeled(index)));
    }

    #[test]
    fn labels_are_spaced_by_interval_plus_one() {
        let interval = TickInterval::for_len(100);
        let labeled = (0..100).filter(|index| interval.is_labeled(*index)).collect::<Vec<_>>();
        assert_eq!(labeled, vec![0, 13, 26, 39, 52, 65, 78, 91]);
    }
}
