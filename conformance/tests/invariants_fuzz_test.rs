//! Randomized cross-program check that the instruction counter always
//! advances by one, run against the default variant. Fixed seed: a failure
//! here should reproduce exactly.

use rand::SeedableRng;
use rand::rngs::StdRng;
use yan85_conformance::{check_counter_advance, random_programs, run_case};

#[test]
fn counter_advances_by_one_across_random_programs() {
    let cfg = yan85_variants::default::build();
    let mut rng = StdRng::seed_from_u64(42);
    let programs = random_programs(&cfg, &mut rng, 2_000);

    let mut failures = Vec::new();
    for (idx, program) in programs.iter().enumerate() {
        let case = run_case(&cfg, format!("case-{idx}"), program);
        if let Err(msg) = check_counter_advance(&cfg, &case) {
            failures.push(msg);
        }
    }

    assert!(failures.is_empty(), "{} invariant violations, first: {}", failures.len(), failures[0]);
}
