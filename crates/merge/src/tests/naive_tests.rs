use crate::*;
use anyhow::Result;

#[test]
fn naive_inserts_every_record() -> Result<()> {
    let segments = vec![
        vec!["aaa:15", "aab:15", "aac:30", "aad:20"],
        vec!["aab:15", "abb:15", "abc:30"],
        vec!["abc:15"],
        vec!["aab:15", "aac:15", "aad:30", "ada:20"],
    ];
    let mut merge = NaiveMerge::new(&segments)?;
    assert_eq!(merge.queued(), 4, "one head record per segment");

    let out = merge.collect_all()?;
    assert_eq!(out.len(), 7);

    let stats = merge.stats();
    assert_eq!(stats.records_scanned, 12);
    assert_eq!(stats.queue_insertions, 12);
    assert_eq!(stats.records_emitted, 7);
    assert_eq!(stats.records_shadowed, 5);
    assert!(stats.max_queue_len <= segments.len());
    Ok(())
}

#[test]
fn naive_queue_never_exceeds_segment_count() -> Result<()> {
    let segments: Vec<Vec<String>> = (0..8)
        .map(|s| (0..50).map(|k| format!("k{:03}:{}", k * 8 + s, s)).collect())
        .collect();
    let mut merge = NaiveMerge::new(&segments)?;
    let out = merge.collect_all()?;
    assert_eq!(out.len(), 400);
    assert_eq!(merge.stats().max_queue_len, 8);
    Ok(())
}

#[test]
fn naive_streams_one_record_at_a_time() -> Result<()> {
    let segments = vec![vec!["a:0", "c:0"], vec!["b:1"]];
    let mut merge = NaiveMerge::new(&segments)?;

    assert_eq!(merge.next_record()?.unwrap().to_string(), "segment=0 a:0");
    assert_eq!(merge.next_record()?.unwrap().to_string(), "segment=1 b:1");
    assert_eq!(merge.next_record()?.unwrap().to_string(), "segment=0 c:0");
    assert!(merge.next_record()?.is_none());
    assert!(merge.next_record()?.is_none());
    Ok(())
}

// -------------------- Errors --------------------

#[test]
fn naive_rejects_malformed_first_entry() {
    let segments = vec![vec!["a:15"], vec!["a--15"]];
    let err = NaiveMerge::new(&segments).err().expect("should fail");
    match err {
        MergeError::MalformedRecord {
            segment_id,
            index,
            raw,
        } => {
            assert_eq!(segment_id, 1);
            assert_eq!(index, 0);
            assert_eq!(raw, "a--15");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn naive_rejects_malformed_entry_mid_drain() -> Result<()> {
    let segments = vec![vec!["a:1", "b"]];
    let mut merge = NaiveMerge::new(&segments)?;
    // The winner goes out before its segment is read again.
    assert_eq!(merge.next_record()?.unwrap().to_string(), "segment=0 a:1");
    let err = merge.next_record().unwrap_err();
    assert!(matches!(
        err,
        MergeError::MalformedRecord { segment_id: 0, index: 1, .. }
    ));
    assert!(err.to_string().contains("segment 0"));
    Ok(())
}

#[test]
fn naive_collect_all_is_all_or_nothing() -> Result<()> {
    let segments = vec![vec!["a:1", "b:1", "c:1", "oops"]];
    let mut merge = NaiveMerge::new(&segments)?;
    assert!(merge.collect_all().is_err());
    Ok(())
}

#[test]
fn naive_validation_rejects_unsorted_segment() -> Result<()> {
    let segments = vec![vec!["b:1", "a:1"]];

    // Trusted by default.
    assert_eq!(NaiveMerge::new(&segments)?.collect_all()?.len(), 2);

    let mut merge = NaiveMerge::with_validation(&segments, true)?;
    match merge.collect_all().unwrap_err() {
        MergeError::InvalidSegmentOrder {
            segment_id,
            index,
            previous,
            key,
        } => {
            assert_eq!(segment_id, 0);
            assert_eq!(index, 1);
            assert_eq!(previous, "b");
            assert_eq!(key, "a");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn naive_validation_rejects_duplicate_key_in_segment() -> Result<()> {
    let segments = vec![vec!["a:1", "a:2"]];
    let mut merge = NaiveMerge::with_validation(&segments, true)?;
    assert!(matches!(
        merge.collect_all(),
        Err(MergeError::InvalidSegmentOrder { index: 1, .. })
    ));
    Ok(())
}
