use crate::denormalize::SizeRecord;
use crate::reference_size::ReferenceSize;

use super::page::model_last;

pub type Grouping<K> = (K, Vec<SizeRecord>);

/// Split records that are already sorted by `key` into runs of equal keys.
fn group_sorted<K: PartialEq>(
    sorted: Vec<SizeRecord>,
    key: impl Fn(&SizeRecord) -> K,
) -> Vec<Grouping<K>> {
    let mut groups: Vec<Grouping<K>> = Vec::new();
    for record in sorted {
        let k = key(&record);
        if let Some((last, members)) = groups.last_mut() {
            if *last == k {
                members.push(record);
                continue;
            }
        }
        groups.push((k, vec![record]));
    }
    groups
}

/// Groups ordered by Brannock size then width; records by label within each.
pub fn group_reference_sizes(records: &[SizeRecord]) -> Vec<Grouping<ReferenceSize>> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        a.reference_size
            .cmp(&b.reference_size)
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });
    group_sorted(sorted, |r| r.reference_size.clone())
}

/// Groups keyed by case-normalised label, ordered by key; records by Brannock
/// size within each.
pub fn group_labels(records: &[SizeRecord]) -> Vec<Grouping<String>> {
    let mut sorted = records.to_vec();
    sorted.sort_by_cached_key(|r| (model_last(&r.label), r.reference_size.clone()));
    group_sorted(sorted, |r| model_last(&r.label))
}
