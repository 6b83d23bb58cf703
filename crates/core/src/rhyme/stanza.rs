//! Place rhyme-linked lines into the slots of a rhyme scheme.
//!
//! Greedy: the largest rhyme group takes the most frequent scheme label,
//! and so on down. Whatever is left over fills the remaining slots in pop
//! order, with no rhyme guarantee.

use std::collections::HashSet;

use crate::error::MeterMapError;

/// Merge committed `(initiator, linked)` pairs into groups.
///
/// A pair joins the first group already holding either index, otherwise it
/// opens a new group. Chains touching two existing groups are not merged.
pub fn rhyme_groups(pairs: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &(a, b) in pairs {
        match groups.iter_mut().find(|g| g.contains(&a) || g.contains(&b)) {
            Some(group) => {
                for ix in [a, b] {
                    if !group.contains(&ix) {
                        group.push(ix);
                    }
                }
            }
            None => groups.push(vec![a, b]),
        }
    }
    groups
}

/// Cycle `scheme` (whitespace ignored) out to exactly `len` labels.
pub fn expand_scheme(scheme: &str, len: usize) -> Result<Vec<char>, MeterMapError> {
    let labels: Vec<char> = scheme.chars().filter(|c| !c.is_whitespace()).collect();
    if labels.is_empty() {
        return Err(MeterMapError::EmptyScheme);
    }
    Ok(labels.iter().copied().cycle().take(len).collect())
}

/// Reorder `lines` so rhyme groups land on matching scheme labels.
///
/// Slots that neither a group nor an orphan line can fill are left out of
/// the result.
pub fn rearrange(lines: &[String], pairs: &[(usize, usize)], scheme: &[char]) -> Vec<String> {
    let mut groups = rhyme_groups(pairs);
    let grouped: HashSet<usize> = groups.iter().flatten().copied().collect();
    groups.sort_by_key(|g| g.len());

    let mut labels: Vec<char> = Vec::new();
    for &c in scheme {
        if !labels.contains(&c) {
            labels.push(c);
        }
    }
    labels.sort_by_key(|l| scheme.iter().filter(|&&c| c == *l).count());

    // popped last-first, so ungrouped lines come out in reading order
    let mut orphans: Vec<usize> = (0..lines.len()).rev().filter(|i| !grouped.contains(i)).collect();
    let mut slots: Vec<Option<usize>> = vec![None; scheme.len()];

    while !groups.is_empty() && !labels.is_empty() {
        let (Some(mut group), Some(label)) = (groups.pop(), labels.pop()) else {
            break;
        };
        for (slot, _) in scheme.iter().enumerate().filter(|&(_, &c)| c == label) {
            match group.pop() {
                Some(ix) => slots[slot] = Some(ix),
                None => break,
            }
        }
        orphans.extend(group);
    }
    for group in groups {
        orphans.extend(group);
    }

    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        *slot = orphans.pop();
    }

    let placed: Vec<String> = slots
        .into_iter()
        .flatten()
        .filter_map(|ix| lines.get(ix).cloned())
        .collect();
    log::debug!("Stanza layout placed {} of {} scheme slots", placed.len(), scheme.len());
    placed
}
