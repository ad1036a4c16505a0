//! Authorship heuristic: character entropy and line structure.
//!
//! Predictable text (low entropy), heavy commenting and uniform line lengths
//! push the score toward 1.0; chaotic text pulls it toward 0.0.

use std::collections::HashMap;

use serde::Serialize;
use strum::Display;

use super::record::ProofRecord;

/// Score above which a record reads as machine-written.
pub const LIKELY_AI_ABOVE: f64 = 0.6;
/// Score below which a record reads as high-logic human work.
pub const HIGH_LOGIC_BELOW: f64 = 0.3;

/// Label derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Score above 0.6.
    #[strum(serialize = "🤖 Likely AI")]
    LikelyAi,
    /// Score between 0.3 and 0.6.
    #[strum(serialize = "👤 Likely Human")]
    LikelyHuman,
    /// Score below 0.3.
    #[strum(serialize = "🧠 High Logic (Human)")]
    HighLogic,
}

impl Verdict {
    /// Label a score.
    pub fn from_score(score: f64) -> Self {
        if score < HIGH_LOGIC_BELOW {
            Verdict::HighLogic
        } else if score > LIKELY_AI_ABOVE {
            Verdict::LikelyAi
        } else {
            Verdict::LikelyHuman
        }
    }
}

/// Full breakdown for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forensics {
    /// Record author.
    pub author: String,
    /// Clamped score in `[0, 1]`.
    pub score: f64,
    /// Shannon entropy in bits per character.
    pub entropy: f64,
    /// Share of non-blank lines that are comments.
    pub comment_ratio: f64,
    /// Population standard deviation of non-blank line lengths.
    pub line_std_dev: f64,
    /// Label for the score.
    pub verdict: Verdict,
}

/// Shannon entropy of the lowercased text, in bits per character.
pub fn shannon_entropy(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in lowered.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Comment ratio and line-length standard deviation over non-blank lines.
pub fn line_structure(text: &str) -> (f64, f64) {
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return (0.0, 0.0);
    }

    let comments = lines
        .iter()
        .filter(|l| {
            let l = l.trim();
            ["#", "//", "*", "/*"].iter().any(|prefix| l.starts_with(prefix))
        })
        .count();
    let comment_ratio = comments as f64 / lines.len() as f64;

    let lengths: Vec<f64> = lines.iter().map(|l| l.chars().count() as f64).collect();
    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let variance = lengths.iter().map(|len| (len - mean).powi(2)).sum::<f64>() / lengths.len() as f64;

    (comment_ratio, variance.sqrt())
}

/// Combine entropy and structure into a clamped score.
pub fn score(entropy: f64, comment_ratio: f64, line_std_dev: f64) -> f64 {
    let mut score = 0.0;

    if entropy < 4.2 {
        score += 0.4;
    } else if entropy > 4.8 {
        score -= 0.2;
    }

    if comment_ratio > 0.25 {
        score += 0.3;
    }

    if line_std_dev < 10.0 {
        score += 0.2;
    } else if line_std_dev > 30.0 {
        score -= 0.2;
    }

    f64::clamp(score, 0.0, 1.0)
}

/// Score one record.
pub fn analyze(record: &ProofRecord) -> Forensics {
    let text = record.forensic_text();
    let entropy = shannon_entropy(&text);
    let (comment_ratio, line_std_dev) = line_structure(&text);
    let score = score(entropy, comment_ratio, line_std_dev);

    Forensics {
        author: record.author.clone(),
        score,
        entropy,
        comment_ratio,
        line_std_dev,
        verdict: Verdict::from_score(score),
    }
}
