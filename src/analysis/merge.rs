use std::collections::{HashMap, HashSet};

/// Builds never grow past the six inventory slots.
pub const MAX_BUILD_LEN: usize = 6;

/// Synthesizes one representative build from many per-match purchase
/// sequences.
///
/// The merge grows a prefix one item at a time. Each round keeps only the
/// sequences whose item set contains everything chosen so far, then scores
/// every unchosen item in those survivors: an item sitting `k` positions
/// past the rightmost already-chosen item weighs `1/2^k` (weight 1 when it
/// is the immediate next purchase), and an item interleaved before
/// already-chosen purchases is halved once per chosen item it precedes.
/// The heaviest candidate is appended and the survivors carry into the
/// next round. Ties resolve to the earliest discovered candidate (first
/// appearance across survivors in sequence order).
pub fn merge_sequences(sequences: &[Vec<u32>]) -> Vec<u32> {
    let mut current: Vec<u32> = Vec::new();
    let mut remaining: Vec<&Vec<u32>> = sequences.iter().collect();

    while current.len() < MAX_BUILD_LEN && !remaining.is_empty() {
        let chosen: HashSet<u32> = current.iter().copied().collect();

        let mut survivors: Vec<&Vec<u32>> = Vec::new();
        let mut discovery_order: Vec<u32> = Vec::new();
        let mut weights: HashMap<u32, f64> = HashMap::new();

        for &seq in &remaining {
            // A duplicated id keeps its last position, like the chosen-set
            // lookup below.
            let positions: HashMap<u32, usize> =
                seq.iter().enumerate().map(|(i, &id)| (id, i)).collect();

            if !chosen.iter().all(|id| positions.contains_key(id)) {
                continue;
            }
            survivors.push(seq);

            // Rightmost position, within this sequence, of anything
            // already chosen; -1 for an empty prefix.
            let last_index = chosen
                .iter()
                .filter_map(|id| positions.get(id))
                .map(|&i| i as i64)
                .max()
                .unwrap_or(-1);

            let mut counted: HashSet<u32> = HashSet::new();
            for &item_id in seq {
                if chosen.contains(&item_id) || !counted.insert(item_id) {
                    continue;
                }
                let pos = positions[&item_id] as i64;

                let weight = if pos > last_index {
                    1.0 / f64::powi(2.0, (pos - last_index - 1) as i32)
                } else {
                    let inversions = chosen
                        .iter()
                        .filter(|&&id| positions.get(&id).map_or(false, |&p| (p as i64) > pos))
                        .count();
                    1.0 / f64::powi(2.0, inversions as i32)
                };

                if !weights.contains_key(&item_id) {
                    discovery_order.push(item_id);
                }
                *weights.entry(item_id).or_insert(0.0) += weight;
            }
        }

        let mut best: Option<(u32, f64)> = None;
        for &candidate in &discovery_order {
            let weight = weights[&candidate];
            if best.map_or(true, |(_, w)| weight > w) {
                best = Some((candidate, weight));
            }
        }

        match best {
            Some((item_id, _)) => {
                current.push(item_id);
                remaining = survivors;
            }
            None => break,
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u32 = 3031;
    const B: u32 = 3072;
    const C: u32 = 3142;
    const D: u32 = 3812;

    #[test]
    fn majority_successor_wins_the_second_slot() {
        let sequences = vec![vec![A, B, C], vec![A, C, B], vec![A, B, D]];

        let merged = merge_sequences(&sequences);
        assert_eq!(&merged[..2], &[A, B]);
    }

    #[test]
    fn a_single_sequence_is_reproduced() {
        let sequences = vec![vec![A, B, C, D]];
        assert_eq!(merge_sequences(&sequences), vec![A, B, C, D]);
    }

    #[test]
    fn identical_sequences_are_reproduced() {
        let sequences = vec![vec![A, B, C]; 5];
        assert_eq!(merge_sequences(&sequences), vec![A, B, C]);
    }

    #[test]
    fn output_is_capped_at_six_items() {
        let long: Vec<u32> = (1000..1010).collect();
        let merged = merge_sequences(&[long.clone(), long]);
        assert_eq!(merged.len(), MAX_BUILD_LEN);
        assert_eq!(merged, (1000..1006).collect::<Vec<u32>>());
    }

    #[test]
    fn inconsistent_sequences_stop_surviving() {
        // The two sequences share nothing, so after the first pick only
        // one of them can extend the build.
        let sequences = vec![vec![A, B], vec![C, D]];

        let merged = merge_sequences(&sequences);
        assert_eq!(merged, vec![A, B]);
    }

    #[test]
    fn empty_input_yields_an_empty_build() {
        assert!(merge_sequences(&[]).is_empty());
        assert!(merge_sequences(&[Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn branching_tails_prefer_the_consistent_item() {
        // Every sequence contains E; only half contain F past the prefix.
        const E: u32 = 3089;
        const F: u32 = 3135;
        let sequences = vec![
            vec![A, B, E],
            vec![A, B, E],
            vec![A, B, F, E],
            vec![A, B, E, F],
        ];

        let merged = merge_sequences(&sequences);
        assert_eq!(&merged[..3], &[A, B, E]);
    }
}
