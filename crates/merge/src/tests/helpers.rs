use crate::*;

/// `(segment_id, "key:value")` pairs, the shape the scenarios are written in.
pub fn rendered(out: &[MergedRecord]) -> Vec<(usize, String)> {
    out.iter()
        .map(|r| (r.segment_id, r.record.to_string()))
        .collect()
}

pub fn expected(pairs: &[(usize, &str)]) -> Vec<(usize, String)> {
    pairs.iter().map(|&(id, s)| (id, s.to_string())).collect()
}

/// Runs both strategies, asserts they agree, and returns the shared output.
pub fn merge_both<S: Segment>(segments: &[S]) -> MergeResult<Vec<(usize, String)>> {
    let naive = NaiveMerge::new(segments)?.collect_all()?;
    let dedup = DedupMerge::new(segments)?.collect_all()?;
    assert_eq!(naive, dedup, "strategies disagree");
    Ok(rendered(&naive))
}

/// Builds a segment of `key{:04}:{value}` entries for `range`.
pub fn numbered_segment(range: std::ops::Range<usize>, value: &str) -> Vec<String> {
    range.map(|i| format!("key{:04}:{}", i, value)).collect()
}
