use std::collections::HashMap;

use crate::store::models::{
    TimelineDto, EVENT_ITEM_PURCHASED, EVENT_ITEM_SOLD, EVENT_ITEM_UNDO,
};

use super::normalizer::ItemNormalizer;

/// Net purchase counts per participant, on raw item ids. Undo events
/// subtract the undone item, sell events subtract the sold item. A frame
/// whose timestamp exceeds the cutoff ends the scan.
pub fn net_purchases(
    timeline: &TimelineDto,
    cutoff_ms: Option<i64>,
) -> HashMap<i32, HashMap<u32, i32>> {
    let mut counts: HashMap<i32, HashMap<u32, i32>> = HashMap::new();

    for frame in &timeline.frames {
        if let Some(cutoff) = cutoff_ms {
            if frame.timestamp > cutoff {
                break;
            }
        }
        for event in &frame.events {
            let (item_id, delta) = match event.event_type.as_str() {
                EVENT_ITEM_PURCHASED => (event.item_id, 1),
                EVENT_ITEM_UNDO => (event.item_before, -1),
                EVENT_ITEM_SOLD => (event.item_id, -1),
                _ => continue,
            };
            *counts
                .entry(event.participant_id)
                .or_default()
                .entry(item_id)
                .or_insert(0) += delta;
        }
    }

    counts
}

/// Chronological purchase sequences per participant, normalized at append
/// time; purchases that normalize to nothing are dropped. Undo and sell
/// events adjust net counts only and never touch these sequences.
pub fn purchase_sequences(
    timeline: &TimelineDto,
    normalizer: &ItemNormalizer,
) -> HashMap<i32, Vec<u32>> {
    let mut sequences: HashMap<i32, Vec<u32>> = HashMap::new();

    for frame in &timeline.frames {
        for event in &frame.events {
            if event.event_type != EVENT_ITEM_PURCHASED {
                continue;
            }
            if let Some(item_id) = normalizer.normalize(event.item_id) {
                sequences
                    .entry(event.participant_id)
                    .or_default()
                    .push(item_id);
            }
        }
    }

    sequences
}
