//! Score → recommendation label step function.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const STRONG_RECOMMEND_MIN: u8 = 80;
pub const CONSIDER_MIN: u8 = 60;
pub const WEAK_FIT_MIN: u8 = 40;

/// Recommendation label. Serialized with its display string; the variant name is
/// accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Strong Recommend", alias = "StrongRecommend")]
    StrongRecommend,
    #[serde(rename = "Consider")]
    Consider,
    #[serde(rename = "Weak Fit", alias = "WeakFit")]
    WeakFit,
    #[serde(rename = "Not Recommended", alias = "NotRecommended")]
    NotRecommended,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::StrongRecommend => "Strong Recommend",
            Label::Consider => "Consider",
            Label::WeakFit => "Weak Fit",
            Label::NotRecommended => "Not Recommended",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a score to its label. Lower bounds are inclusive.
pub fn classify(score: u8) -> Label {
    if score >= STRONG_RECOMMEND_MIN {
        Label::StrongRecommend
    } else if score >= CONSIDER_MIN {
        Label::Consider
    } else if score >= WEAK_FIT_MIN {
        Label::WeakFit
    } else {
        Label::NotRecommended
    }
}
