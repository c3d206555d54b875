//! End-to-end search behavior

use std::collections::HashSet;
use std::num::NonZeroUsize;

use proptest::prelude::*;
use shaseek::digest::digest;
use shaseek::search::{
    keyspace_size, search, CandidateCounter, SearchOutcome, SearchTask, Searcher, Step,
};

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_found_regardless_of_parallelism() {
    let target = digest(b"4821");

    for batch_size in [1, 7, 64, 1000, 10_000] {
        for workers in [1, 2, 4, 8] {
            let task = SearchTask::new(target, 4)
                .with_batch_size(nz(batch_size))
                .with_workers(nz(workers));

            let outcome = search(task).unwrap();
            let found = outcome
                .found()
                .unwrap_or_else(|| panic!("batch {batch_size}, workers {workers}: no match"));

            assert_eq!(found.candidate, "4821");
            assert_eq!(found.index, 4821);
            assert_eq!(found.digest, target);
        }
    }
}

#[test]
fn test_exhausts_when_target_outside_keyspace() {
    // Five digits never hash like a four-digit candidate
    let target = digest(b"12345");
    let task = SearchTask::new(target, 4)
        .with_batch_size(nz(333))
        .with_workers(nz(4));

    assert_eq!(
        search(task).unwrap(),
        SearchOutcome::Exhausted { checked: 10_000 }
    );
}

#[test]
fn test_exhaustion_checks_every_candidate_once() {
    let target = digest(b"unreachable");
    let task = SearchTask::new(target, 3)
        .with_batch_size(nz(17))
        .with_workers(nz(3));
    let searcher = Searcher::new(task).unwrap();
    let progress = searcher.progress();

    let outcome = searcher.run();

    assert_eq!(outcome, SearchOutcome::Exhausted { checked: 1000 });
    assert_eq!(Some(progress.checked()), keyspace_size(3));
    // 1000 / 17 rounds up to 59 batches
    assert_eq!(progress.batches(), 59);
    assert_eq!(progress.cursor(), "999");
}

#[test]
fn test_enumeration_covers_keyspace_without_repeats() {
    let mut counter = CandidateCounter::new(4).unwrap();
    let mut seen = HashSet::new();
    let mut previous = None;

    loop {
        let value = counter.value();
        if let Some(prev) = previous {
            assert!(value > prev, "not increasing at {}", counter);
        }
        assert!(seen.insert(counter.to_string()));
        previous = Some(value);

        if counter.advance() == Step::Exhausted {
            break;
        }
    }

    assert_eq!(Some(seen.len() as u64), keyspace_size(4));
}

#[test]
fn test_start_offset_limits_search() {
    let target = digest(b"4821");

    // Starting before the preimage still finds it, with the index relative to the start
    let task = SearchTask::new(target, 4)
        .with_start("4000")
        .with_batch_size(nz(50))
        .with_workers(nz(2));
    let outcome = search(task).unwrap();
    assert_eq!(outcome.found().map(|m| m.index), Some(821));

    // Starting after it scans only the tail of the keyspace
    let task = SearchTask::new(target, 4)
        .with_start("5000")
        .with_batch_size(nz(50))
        .with_workers(nz(2));
    assert_eq!(
        search(task).unwrap(),
        SearchOutcome::Exhausted { checked: 5000 }
    );
}

#[test]
fn test_start_at_last_candidate() {
    let task = SearchTask::new(digest(b"99"), 2).with_start("99");
    let outcome = search(task).unwrap();
    assert_eq!(outcome.found().map(|m| m.index), Some(0));

    let task = SearchTask::new(digest(b"00"), 2).with_start("99");
    assert_eq!(
        search(task).unwrap(),
        SearchOutcome::Exhausted { checked: 1 }
    );
}

#[test]
fn test_oversized_batch_on_small_keyspace() {
    let target = digest(b"42");

    for batch_size in [usize::MAX / 2, 1 << 45, usize::MAX] {
        let task = SearchTask::new(target, 2)
            .with_batch_size(nz(batch_size))
            .with_workers(nz(2));
        let outcome = search(task).unwrap();
        assert_eq!(outcome.found().map(|m| m.index), Some(42));

        // The whole tail fits in one batch
        let task = SearchTask::new(target, 2)
            .with_start("50")
            .with_batch_size(nz(batch_size));
        let searcher = Searcher::new(task).unwrap();
        assert_eq!(searcher.run(), SearchOutcome::Exhausted { checked: 50 });
        assert_eq!(searcher.progress().batches(), 1);
    }
}

#[test]
fn test_searcher_can_run_twice() {
    let task = SearchTask::new(digest(b"731"), 3)
        .with_batch_size(nz(100))
        .with_workers(nz(2));
    let searcher = Searcher::new(task).unwrap();

    let first = searcher.run();
    let second = searcher.run();
    assert_eq!(first, second);
    assert_eq!(searcher.progress().checked(), 800);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn result_is_parallelism_invariant(
        secret in 0u64..1000,
        batch_size in 1usize..300,
        workers in 1usize..6,
    ) {
        let candidate = format!("{secret:03}");
        let task = SearchTask::new(digest(candidate.as_bytes()), 3)
            .with_batch_size(nz(batch_size))
            .with_workers(nz(workers));

        let outcome = search(task).unwrap();
        let found = outcome.found().cloned();
        prop_assert_eq!(found.map(|m| (m.candidate, m.index)), Some((candidate, secret)));
    }
}
