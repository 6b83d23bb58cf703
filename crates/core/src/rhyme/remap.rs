//! Rewrite line endings so that as many lines as possible rhyme.
//!
//! For each line the two words before its last word index the bigram table,
//! proposing replacement endings that keep the meter. Each replacement's
//! rhymes are matched against other lines' replacements; every line then
//! commits the replacement that pulls in the most other lines, with the
//! first committed line winning any conflict.

use std::collections::HashSet;

use serde::Serialize;

use crate::corpus::BigramTable;
use crate::language::{meter_compatible, PhoneticDict, RhymeResolver};

/// Replacement endings proposed for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineProposals {
    pub end_word: String,
    /// Replacement word and its meter-safe rhymes, in bigram order.
    pub replacements: Vec<(String, HashSet<String>)>,
}

impl LineProposals {
    fn words(&self) -> impl Iterator<Item = &str> {
        self.replacements.iter().map(|(w, _)| w.as_str())
    }
}

/// One ending a line could take, and the other-line swaps it makes rhyme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionCandidate {
    pub word: String,
    /// `(other line index, that line's new ending)`.
    pub links: Vec<(usize, String)>,
}

impl SubstitutionCandidate {
    /// Number of distinct other lines this candidate links to.
    pub fn reach(&self) -> usize {
        let lines: HashSet<usize> = self.links.iter().map(|(j, _)| *j).collect();
        lines.len()
    }
}

/// Outcome of one remapping pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemapResult {
    /// Line texts with committed endings applied.
    pub lines: Vec<String>,
    /// New ending per line, `None` where the line was left alone.
    pub endings: Vec<Option<String>>,
    /// Committed `(initiator, linked)` line pairs.
    pub pairs: Vec<(usize, usize)>,
    /// Line indices in the order they were locked.
    pub locked: Vec<usize>,
}

/// Read-only inputs for remapping.
pub struct Remapper<'a> {
    meter_dict: &'a PhoneticDict,
    bigrams: &'a BigramTable,
    rhymes: RhymeResolver<'a>,
}

impl<'a> Remapper<'a> {
    pub fn new(
        meter_dict: &'a PhoneticDict,
        bigrams: &'a BigramTable,
        rhymes: RhymeResolver<'a>,
    ) -> Self {
        Self {
            meter_dict,
            bigrams,
            rhymes,
        }
    }

    /// Replacement endings for a tokenized line; `None` below three tokens.
    pub fn propose<S: AsRef<str>>(&self, tokens: &[S]) -> Option<LineProposals> {
        let [.., first, second, end] = tokens else {
            return None;
        };
        let end = end.as_ref();
        let replacements = self
            .bigrams
            .distinct_successors(first.as_ref(), second.as_ref())
            .into_iter()
            .filter(|w| meter_compatible(self.meter_dict, end, w))
            .map(|w| {
                let rhymes = self
                    .rhymes
                    .meter_safe_rhymes(self.meter_dict, w, end)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (w.to_string(), rhymes)
            })
            .collect();
        Some(LineProposals {
            end_word: end.to_string(),
            replacements,
        })
    }

    /// Per line, the candidates that link to at least one other line.
    pub fn cross_match(&self, proposals: &[Option<LineProposals>]) -> Vec<Vec<SubstitutionCandidate>> {
        proposals
            .iter()
            .enumerate()
            .map(|(i, own)| {
                let Some(own) = own else {
                    return Vec::new();
                };
                own.replacements
                    .iter()
                    .filter_map(|(word, rhymes)| {
                        let links: Vec<(usize, String)> = proposals
                            .iter()
                            .enumerate()
                            .filter(|(j, _)| *j != i)
                            .filter_map(|(j, other)| other.as_ref().map(|o| (j, o)))
                            .flat_map(|(j, other)| {
                                other
                                    .words()
                                    .filter(move |w| rhymes.contains(*w))
                                    .map(move |w| (j, w.to_string()))
                            })
                            .collect();
                        (!links.is_empty()).then(|| SubstitutionCandidate {
                            word: word.clone(),
                            links,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Rewrite endings across `lines` (text plus tokens) in a single pass.
    pub fn remap<S: AsRef<str>>(&self, lines: &[(String, Vec<S>)]) -> RemapResult {
        let proposals: Vec<Option<LineProposals>> =
            lines.iter().map(|(_, tokens)| self.propose(tokens)).collect();
        let candidates = self.cross_match(&proposals);
        let chosen: Vec<Option<&SubstitutionCandidate>> =
            candidates.iter().map(|c| best_candidate(c)).collect();

        let n = lines.len();
        let mut endings: Vec<Option<String>> = vec![None; n];
        let mut is_locked = vec![false; n];
        let mut locked = Vec::new();
        let mut pairs = Vec::new();

        for (i, choice) in chosen.iter().enumerate() {
            if is_locked[i] {
                continue;
            }
            let Some(candidate) = choice else {
                continue;
            };
            endings[i] = Some(candidate.word.clone());
            is_locked[i] = true;
            locked.push(i);

            for (j, word) in &candidate.links {
                if is_locked[*j] {
                    continue;
                }
                endings[*j] = Some(word.clone());
                is_locked[*j] = true;
                locked.push(*j);
                pairs.push((i, *j));
            }
        }
        log::info!("Rhyme remap: {} swaps committed across {} lines", pairs.len(), n);

        let rewritten = lines
            .iter()
            .zip(&proposals)
            .zip(&endings)
            .map(|(((text, _), proposal), ending)| match (proposal, ending) {
                (Some(p), Some(new)) => replace_last_word(text, &p.end_word, new),
                _ => text.clone(),
            })
            .collect();

        RemapResult {
            lines: rewritten,
            endings,
            pairs,
            locked,
        }
    }
}

/// Candidate reaching the most distinct lines; earliest wins ties.
fn best_candidate(candidates: &[SubstitutionCandidate]) -> Option<&SubstitutionCandidate> {
    let mut best: Option<(&SubstitutionCandidate, usize)> = None;
    for cand in candidates {
        let reach = cand.reach();
        if best.map_or(true, |(_, r)| reach > r) {
            best = Some((cand, reach));
        }
    }
    best.map(|(c, _)| c)
}

/// Replace the last case-insensitive occurrence of `old` in `text` with
/// `new`, keeping a leading capital.
fn replace_last_word(text: &str, old: &str, new: &str) -> String {
    if old.is_empty() {
        return text.to_string();
    }
    let lower = text.to_ascii_lowercase();
    let Some(start) = lower.rfind(&old.to_ascii_lowercase()) else {
        return text.to_string();
    };
    let end = start + old.len();
    let capitalized = text[start..].chars().next().map_or(false, |c| c.is_uppercase());
    let replacement = if capitalized {
        let mut chars = new.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        new.to_string()
    };
    format!("{}{}{}", &text[..start], replacement, &text[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::RhymeIndex;
    use crate::testutil::fixture_dict;
    use crate::text::tokenize;

    const STREAM: &str = "i saw a cat i saw a bat on the dog on the mat on the morning";

    fn table() -> BigramTable {
        let stream: Vec<String> = STREAM.split_whitespace().map(|w| w.to_string()).collect();
        BigramTable::from_stream(&stream)
    }

    fn lines(texts: &[&str]) -> Vec<(String, Vec<String>)> {
        texts.iter().map(|t| (t.to_string(), tokenize(t))).collect()
    }

    #[test]
    fn test_propose_filters_meter() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));

        let proposals = remapper.propose(&tokenize("She sat on the dog")).unwrap();
        assert_eq!(proposals.end_word, "dog");
        let words: Vec<&str> = proposals.words().collect();
        // "morning" would add a syllable
        assert_eq!(words, vec!["dog", "mat"]);
        let mat_rhymes = &proposals.replacements[1].1;
        assert!(mat_rhymes.contains("cat"));
        assert!(!mat_rhymes.contains("mat"));
    }

    #[test]
    fn test_propose_short_line() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));
        assert!(remapper.propose(&["the", "cat"]).is_none());
        let unknown = remapper.propose(&["zz", "yy", "xx"]).unwrap();
        assert!(unknown.replacements.is_empty());
    }

    #[test]
    fn test_cross_match_links() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));
        let proposals: Vec<_> = ["I saw a cat", "She sat on the dog"]
            .iter()
            .map(|t| remapper.propose(&tokenize(t)))
            .collect();
        let candidates = remapper.cross_match(&proposals);

        let first: Vec<&str> = candidates[0].iter().map(|c| c.word.as_str()).collect();
        assert_eq!(first, vec!["cat", "bat"]);
        assert_eq!(candidates[0][0].links, vec![(1, "mat".to_string())]);

        // only "mat" on line 1 rhymes with line 0's options
        assert_eq!(candidates[1].len(), 1);
        assert_eq!(candidates[1][0].word, "mat");
        assert_eq!(candidates[1][0].reach(), 1);
    }

    #[test]
    fn test_remap_two_lines() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));
        let result = remapper.remap(&lines(&["I saw a cat.", "She sat on the dog."]));

        assert_eq!(result.lines, vec!["I saw a cat.", "She sat on the mat."]);
        assert_eq!(result.pairs, vec![(0, 1)]);
        assert_eq!(result.endings, vec![Some("cat".to_string()), Some("mat".to_string())]);
    }

    #[test]
    fn test_remap_first_committed_wins() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));
        let result = remapper.remap(&lines(&["I saw a cat", "She sat on the dog", "He saw a cat"]));

        assert_eq!(result.pairs, vec![(0, 1), (0, 2)]);
        assert_eq!(result.lines, vec!["I saw a cat", "She sat on the mat", "He saw a bat"]);
    }

    #[test]
    fn test_locked_lines_unique() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));
        let result = remapper.remap(&lines(&[
            "I saw a cat",
            "She sat on the dog",
            "He saw a cat",
            "We sat on the mat",
            "You saw a bat",
        ]));
        let unique: HashSet<usize> = result.locked.iter().copied().collect();
        assert_eq!(unique.len(), result.locked.len());
        for (i, j) in &result.pairs {
            assert_ne!(i, j);
        }
    }

    #[test]
    fn test_unmatched_lines_unchanged() {
        let dict = fixture_dict();
        let index = RhymeIndex::build(&dict);
        let bigrams = table();
        let remapper = Remapper::new(&dict, &bigrams, RhymeResolver::new(&index, &dict));
        let result = remapper.remap(&lines(&["The morning", "Yellow sky and sun"]));
        assert_eq!(result.lines, vec!["The morning", "Yellow sky and sun"]);
        assert!(result.pairs.is_empty());
        assert_eq!(result.endings, vec![None, None]);
    }

    #[test]
    fn test_best_candidate_prefers_reach() {
        let narrow = SubstitutionCandidate {
            word: "a".into(),
            links: vec![(1, "x".into()), (1, "y".into())],
        };
        let wide = SubstitutionCandidate {
            word: "b".into(),
            links: vec![(1, "x".into()), (2, "y".into())],
        };
        let cands = vec![narrow.clone(), wide.clone()];
        assert_eq!(best_candidate(&cands), Some(&wide));
        let tied = vec![wide.clone(), SubstitutionCandidate { word: "c".into(), ..wide.clone() }];
        assert_eq!(best_candidate(&tied).unwrap().word, "b");
        assert!(best_candidate(&[]).is_none());
    }

    #[test]
    fn test_replace_last_word() {
        assert_eq!(replace_last_word("The cat sat on the mat.", "mat", "hat"), "The cat sat on the hat.");
        assert_eq!(replace_last_word("Cat", "cat", "bat"), "Bat");
        assert_eq!(replace_last_word("a cat, a cat", "cat", "bat"), "a cat, a bat");
        assert_eq!(replace_last_word("no match", "zz", "bat"), "no match");
    }
}
