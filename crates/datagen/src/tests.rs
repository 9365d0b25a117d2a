use super::*;
use merge::{Record, Segment};

fn seeded(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::default()
    }
}

#[test]
fn default_shape() {
    let segments = generate_segments(seeded(1));
    assert_eq!(segments.len(), 15);
    for segment in &segments {
        assert!(!segment.is_empty());
        assert!(segment.len() <= 15);
    }
}

#[test]
fn segments_are_strictly_ascending() {
    for seed in 0..20 {
        for segment in generate_segments(seeded(seed)) {
            let keys: Vec<String> = segment
                .iter()
                .map(|raw| Record::decode(raw).unwrap().key().to_string())
                .collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]), "seed {seed}: {keys:?}");
        }
    }
}

#[test]
fn values_carry_segment_index() {
    let segments = generate_segments(seeded(3));
    for (segment_id, segment) in segments.iter().enumerate() {
        for raw in segment {
            let r = Record::decode(raw).unwrap();
            assert_eq!(r.value(), segment_id.to_string());
            assert_eq!(r.key().len(), 5);
            assert!(r.key().bytes().all(|b| b.is_ascii_lowercase()));
        }
    }
}

#[test]
fn same_seed_same_segments() {
    assert_eq!(generate_segments(seeded(99)), generate_segments(seeded(99)));
}

#[test]
fn window_respects_max_window() {
    let cfg = GeneratorConfig {
        segments: 50,
        key_pool: 500,
        key_len: 8,
        max_window: 3,
        seed: Some(5),
    };
    let segments = generate_segments(cfg);
    assert_eq!(segments.len(), 50);
    assert!(segments.iter().all(|s| (1..=3).contains(&Segment::len(s))));
}

#[test]
fn empty_pool_gives_empty_segments() {
    let cfg = GeneratorConfig {
        key_pool: 0,
        ..seeded(0)
    };
    let segments = generate_segments(cfg);
    assert_eq!(segments.len(), 15);
    assert!(segments.iter().all(Vec::is_empty));
}

#[test]
fn key_pool_has_requested_size() {
    let mut generator = SegmentGenerator::new(seeded(11));
    assert_eq!(generator.key_pool().len(), 100);
    assert_eq!(generator.config().key_len, 5);
}

#[test]
fn huge_window_is_clamped_to_pool() {
    let cfg = GeneratorConfig {
        max_window: usize::MAX,
        ..seeded(1)
    };
    let segments = generate_segments(cfg);
    assert_eq!(segments.len(), 15);
    assert!(segments.iter().all(|s| (1..=100).contains(&Segment::len(s))));
}
