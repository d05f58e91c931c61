use callpos_core::{even_ranks, max_key, min_key, rank_between, RankError, DEFAULT_KEY_LEN};

/// All keys of length 1 and 2 over the rank alphabet.
fn short_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for first in 'a'..='z' {
        keys.push(first.to_string());
        for second in 'a'..='z' {
            keys.push(format!("{first}{second}"));
        }
    }
    keys
}

fn is_padding_of(lo: &str, hi: &str) -> bool {
    hi.len() > lo.len() && hi.starts_with(lo) && hi[lo.len()..].bytes().all(|byte| byte == b'a')
}

#[test]
fn midpoint_sorts_strictly_between_every_short_pair() {
    let keys = short_keys();
    for lo in &keys {
        for hi in &keys {
            if lo.as_str() >= hi.as_str() {
                continue;
            }
            match rank_between(lo, hi) {
                Ok(mid) => {
                    assert!(
                        lo.as_str() < mid.as_str() && mid.as_str() < hi.as_str(),
                        "expected {lo} < {mid} < {hi}"
                    );
                }
                Err(RankError::Exhausted { .. }) => {
                    // Only pairs like "ab"/"aba" have no in-between key.
                    assert!(
                        is_padding_of(lo, hi),
                        "unexpected exhaustion for {lo} / {hi}"
                    );
                }
                Err(other) => panic!("unexpected error for {lo} / {hi}: {other}"),
            }
        }
    }
}

#[test]
fn fifty_insertions_against_a_fixed_bound_stay_in_range() {
    let lo = min_key(DEFAULT_KEY_LEN);
    let mut hi = max_key(DEFAULT_KEY_LEN);
    for round in 0..50 {
        let mid = rank_between(&lo, &hi).unwrap();
        assert!(
            lo.as_str() < mid.as_str() && mid.as_str() < hi.as_str(),
            "round {round}: expected {lo} < {mid} < {hi}"
        );
        hi = mid;
    }
}

#[test]
fn fifty_insertions_climbing_toward_a_fixed_bound_stay_in_range() {
    let mut lo = min_key(DEFAULT_KEY_LEN);
    let hi = "aaaaaaab".to_string();
    for round in 0..50 {
        let mid = rank_between(&lo, &hi).unwrap();
        assert!(
            lo.as_str() < mid.as_str() && mid.as_str() < hi.as_str(),
            "round {round}: expected {lo} < {mid} < {hi}"
        );
        lo = mid;
    }
}

#[test]
fn midpoint_of_default_space_matches_pinned_value() {
    assert_eq!(
        rank_between(&min_key(DEFAULT_KEY_LEN), &max_key(DEFAULT_KEY_LEN)).unwrap(),
        "mzzzzzzz"
    );
}

#[test]
fn adjacent_default_keys_extend_by_one_midpoint_character() {
    assert_eq!(rank_between("aaaaaaaa", "aaaaaaab").unwrap(), "aaaaaaaan");
}

#[test]
fn even_ranks_spread_across_the_default_space() {
    let keys = even_ranks(4, DEFAULT_KEY_LEN).unwrap();
    assert_eq!(keys.len(), 4);
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "expected {} < {}", pair[0], pair[1]);
    }
    for key in &keys {
        assert_eq!(key.len(), DEFAULT_KEY_LEN);
        assert!(key.as_str() > min_key(DEFAULT_KEY_LEN).as_str());
        assert!(key.as_str() <= max_key(DEFAULT_KEY_LEN).as_str());
    }
}

#[test]
fn even_ranks_stay_unique_for_large_seeds() {
    let keys = even_ranks(500, DEFAULT_KEY_LEN).unwrap();
    assert_eq!(keys.len(), 500);
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn moving_to_either_edge_uses_the_sentinels() {
    let keys = even_ranks(4, DEFAULT_KEY_LEN).unwrap();

    let appended = rank_between(keys.last().unwrap(), &max_key(DEFAULT_KEY_LEN)).unwrap();
    assert!(keys.iter().all(|key| key.as_str() < appended.as_str()));

    let prepended = rank_between(&min_key(DEFAULT_KEY_LEN), keys.first().unwrap()).unwrap();
    assert!(keys.iter().all(|key| key.as_str() > prepended.as_str()));
}
