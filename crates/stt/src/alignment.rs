use highlight_config::AlternativeSelection;
use serde::Serialize;

use crate::{
    error::{Result, SttError},
    types::Chunk,
};

/// A spoken word with its offsets in whole milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordTiming {
    pub word: String,
    pub start_time: i64,
    pub end_time: i64,
}

/// Flatten `chunks[].alternatives[].words[]` into a word timeline
///
/// Words keep the order in which they appear in the response. With
/// [`AlternativeSelection::All`] every alternative of a chunk contributes,
/// so competing hypotheses may yield overlapping spans.
pub fn align_words(chunks: &[Chunk], selection: AlternativeSelection) -> Result<Vec<WordTiming>> {
    let take = match selection {
        AlternativeSelection::All => usize::MAX,
        AlternativeSelection::Best => 1,
    };

    chunks
        .iter()
        .flat_map(|chunk| chunk.alternatives.iter().take(take))
        .flat_map(|alternative| alternative.words.iter())
        .map(|word| {
            Ok(WordTiming {
                word: word.word.clone(),
                start_time: offset_to_millis(&word.start_time)?,
                end_time: offset_to_millis(&word.end_time)?,
            })
        })
        .collect()
}

/// Convert a duration string like `"1.200s"` to milliseconds
///
/// The unit suffix is stripped and the remainder scaled by 1000, truncating
/// toward zero: `"0.0015s"` is `1`, not `2`.
#[allow(clippy::cast_possible_truncation)]
pub fn offset_to_millis(raw: &str) -> Result<i64> {
    let seconds: f64 = raw
        .trim()
        .trim_end_matches('s')
        .parse()
        .map_err(|e| SttError::MalformedResult(format!("invalid time offset '{raw}': {e}")))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(SttError::MalformedResult(format!("invalid time offset '{raw}'")));
    }

    Ok((seconds * 1000.0) as i64)
}
