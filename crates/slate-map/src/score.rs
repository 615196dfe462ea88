//! Similarity scoring between a normalized header and a normalized field variant.
//!
//! Rules are tried in order: exact equality, containment in either direction,
//! then word overlap with a floor that discards weak partial matches.

use serde::Serialize;

const EXACT_SCORE: f64 = 1.0;
const CONTAINMENT_BASE: f64 = 0.7;
const CONTAINMENT_SPAN: f64 = 0.2;
/// Credit for a header word that is a prefix of a variant word, or the reverse.
const PREFIX_CREDIT: f64 = 0.7;
const WORD_OVERLAP_FLOOR: f64 = 0.5;
const WORD_OVERLAP_SCALE: f64 = 0.8;

/// Which scoring rule produced a similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    Exact,
    Containment,
    WordOverlap,
    None,
}

/// Score for a single header/variant pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
    pub score: f64,
    pub kind: MatchKind,
}

impl Similarity {
    const NONE: Similarity = Similarity {
        score: 0.0,
        kind: MatchKind::None,
    };
}

/// Scores two already-normalized strings. Empty input never matches.
pub fn score_pair(header: &str, variant: &str) -> Similarity {
    if header.is_empty() || variant.is_empty() {
        return Similarity::NONE;
    }
    if header == variant {
        return Similarity {
            score: EXACT_SCORE,
            kind: MatchKind::Exact,
        };
    }
    if header.contains(variant) || variant.contains(header) {
        let header_len = header.chars().count();
        let variant_len = variant.chars().count();
        let (shorter, longer) = if header_len < variant_len {
            (header_len, variant_len)
        } else {
            (variant_len, header_len)
        };
        return Similarity {
            score: CONTAINMENT_BASE + CONTAINMENT_SPAN * (shorter as f64 / longer as f64),
            kind: MatchKind::Containment,
        };
    }
    let overlap = word_overlap(header, variant);
    if overlap > 0.0 {
        Similarity {
            score: overlap,
            kind: MatchKind::WordOverlap,
        }
    } else {
        Similarity::NONE
    }
}

/// Score-only form of [`score_pair`].
pub fn similarity(header: &str, variant: &str) -> f64 {
    score_pair(header, variant).score
}

/// Best score of `header` over a field's variants, with the winning variant.
///
/// On ties the earlier variant wins.
pub fn best_variant<'a>(header: &str, variants: &'a [String]) -> Option<(&'a str, Similarity)> {
    let mut best: Option<(&str, Similarity)> = None;
    for variant in variants {
        let similarity = score_pair(header, variant);
        if best.is_none_or(|(_, current)| similarity.score > current.score) {
            best = Some((variant.as_str(), similarity));
        }
    }
    best
}

fn word_overlap(header: &str, variant: &str) -> f64 {
    let header_words: Vec<&str> = header.split(' ').filter(|w| !w.is_empty()).collect();
    let variant_words: Vec<&str> = variant.split(' ').filter(|w| !w.is_empty()).collect();
    if header_words.is_empty() || variant_words.is_empty() {
        return 0.0;
    }

    let mut credit = 0.0;
    for word in &header_words {
        if variant_words.contains(word) {
            credit += 1.0;
        } else if variant_words
            .iter()
            .any(|candidate| candidate.starts_with(word) || word.starts_with(candidate))
        {
            credit += PREFIX_CREDIT;
        }
    }

    let ratio = credit / header_words.len().max(variant_words.len()) as f64;
    if ratio >= WORD_OVERLAP_FLOOR {
        ratio * WORD_OVERLAP_SCALE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn exact_scores_one() {
        assert_eq!(score_pair("actor name", "actor name").kind, MatchKind::Exact);
        assert_eq!(similarity("actor name", "actor name"), 1.0);
    }

    #[test]
    fn containment_favours_larger_share() {
        let desc = similarity("desc", "description");
        let d = similarity("d", "description");
        assert!(approx(desc, 0.7 + 0.2 * 4.0 / 11.0));
        assert!(approx(d, 0.7 + 0.2 / 11.0));
        assert!(desc > d);
        // either direction
        assert!(approx(similarity("description", "desc"), desc));
    }

    #[test]
    fn word_overlap_partial_prefix_credit() {
        // "scene" exact, "s" prefix of "scene": (1.0 + 0.7) / 2 * 0.8
        let score = score_pair("scene s", "scene numbers");
        assert_eq!(score.kind, MatchKind::WordOverlap);
        assert!(approx(score.score, 0.68));
    }

    #[test]
    fn weak_overlap_is_floored() {
        // one shared word out of three on the longer side
        assert_eq!(similarity("call sheet notes", "call time"), 0.0);
        assert_eq!(score_pair("budget", "status").kind, MatchKind::None);
    }

    #[test]
    fn empty_header_never_matches() {
        assert_eq!(similarity("", "notes"), 0.0);
        assert_eq!(similarity("notes", ""), 0.0);
    }

    #[test]
    fn best_variant_prefers_first_on_tie() {
        let variants = vec!["email".to_string(), "email address".to_string()];
        let (variant, similarity) = best_variant("email", &variants).unwrap();
        assert_eq!(variant, "email");
        assert_eq!(similarity.kind, MatchKind::Exact);
        assert!(best_variant("email", &[]).is_none());
    }
}
