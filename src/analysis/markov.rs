use std::collections::HashMap;

use super::merge::MAX_BUILD_LEN;

/// Ordered pair of the two purchases preceding a transition; `None` pads
/// the start of a sequence.
type PairKey = (Option<u32>, Option<u32>);

/// Second-order transition counts over normalized purchase sequences.
#[derive(Debug, Default)]
pub struct TransitionTable {
    counts: HashMap<PairKey, HashMap<u32, u32>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Folds one purchase sequence into the table. Two leading sentinels
    /// make the opening purchases count as transitions too.
    pub fn record(&mut self, sequence: &[u32]) {
        let mut padded: Vec<Option<u32>> = vec![None, None];
        padded.extend(sequence.iter().copied().map(Some));

        for window in padded.windows(3) {
            if let [two_back, one_back, Some(next)] = window {
                *self
                    .counts
                    .entry((*two_back, *one_back))
                    .or_default()
                    .entry(*next)
                    .or_insert(0) += 1;
            }
        }
    }

    /// Greedily decodes the most common build.
    ///
    /// Each step looks the trailing pair up in both orders — purchase-pair
    /// order is itself noisy — and, once the working sequence (sentinels
    /// included) is four long, also the pair one step back in both orders
    /// as a fallback signal. Counts are summed per candidate over every
    /// matched key, and the heaviest candidate not already in the build is
    /// appended; ties resolve to the lowest item id. Decoding stops at six
    /// items or when every candidate is already used.
    pub fn decode(&self) -> Vec<u32> {
        let mut seq: Vec<Option<u32>> = vec![None, None];

        loop {
            let len = seq.len();
            let mut keys: Vec<PairKey> = vec![
                (seq[len - 2], seq[len - 1]),
                (seq[len - 1], seq[len - 2]),
            ];
            if len >= 4 {
                keys.push((seq[len - 3], seq[len - 2]));
                keys.push((seq[len - 2], seq[len - 3]));
            }

            let mut choices: HashMap<u32, u32> = HashMap::new();
            for key in &keys {
                if let Some(successors) = self.counts.get(key) {
                    for (&item_id, &count) in successors {
                        *choices.entry(item_id).or_insert(0) += count;
                    }
                }
            }

            let next = choices
                .into_iter()
                .filter(|(item_id, _)| !seq.contains(&Some(*item_id)))
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)));

            match next {
                Some((item_id, _)) if seq.len() - 2 < MAX_BUILD_LEN => seq.push(Some(item_id)),
                _ => break,
            }
        }

        seq.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_single_sequence_decodes_to_itself() {
        let mut table = TransitionTable::new();
        table.record(&[3031, 3072, 3142, 3812, 3065, 3026]);

        assert_eq!(table.decode(), vec![3031, 3072, 3142, 3812, 3065, 3026]);
    }

    #[test]
    fn the_majority_path_wins() {
        let mut table = TransitionTable::new();
        table.record(&[3031, 3072, 3142]);
        table.record(&[3031, 3072, 3142]);
        table.record(&[3031, 3142, 3072]);

        assert_eq!(table.decode(), vec![3031, 3072, 3142]);
    }

    #[test]
    fn decode_never_repeats_an_item() {
        let mut table = TransitionTable::new();
        // A loop that would repeat 3031 forever if repeats were allowed.
        table.record(&[3031, 3072, 3031, 3072, 3031]);

        let decoded = table.decode();
        let mut sorted = decoded.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), decoded.len());
    }

    #[test]
    fn decode_is_capped_at_six_items() {
        let mut table = TransitionTable::new();
        let long: Vec<u32> = (1000..1010).collect();
        table.record(&long);

        let decoded = table.decode();
        assert_eq!(decoded.len(), MAX_BUILD_LEN);
    }

    #[test]
    fn an_empty_table_decodes_to_nothing() {
        let table = TransitionTable::new();
        assert!(table.is_empty());
        assert!(table.decode().is_empty());
    }

    #[test]
    fn count_ties_resolve_to_the_lowest_item_id() {
        let mut table = TransitionTable::new();
        table.record(&[3072]);
        table.record(&[3031]);

        assert_eq!(table.decode()[0], 3031);
    }
}
