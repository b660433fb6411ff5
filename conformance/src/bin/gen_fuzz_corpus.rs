//! Generates random yan85 programs against the default variant, checks the
//! counter-advance invariant on each, and writes any falsifying cases to a
//! JSON corpus file for later inspection.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use yan85_conformance::{check_counter_advance, random_programs, run_case};

const NUM_PROGRAMS: usize = 5_000;

fn main() {
    let cfg = yan85_variants::default::build();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    let programs = random_programs(&cfg, &mut rng, NUM_PROGRAMS);
    let mut falsifying = Vec::new();

    for (idx, program) in programs.iter().enumerate() {
        let case = run_case(&cfg, format!("case-{idx}"), program);
        if let Err(msg) = check_counter_advance(&cfg, &case) {
            eprintln!("FALSIFIED: {msg}");
            falsifying.push(case);
        }
    }

    println!("{} programs checked, {} falsifying cases", programs.len(), falsifying.len());

    let out_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("corpus");
    fs::create_dir_all(&out_dir).expect("create corpus output dir");
    let out_path = out_dir.join("counter_advance_falsifying.json");
    let json = serde_json::to_string_pretty(&falsifying).expect("serialize falsifying cases");
    fs::write(&out_path, json).expect("write corpus file");
    println!("wrote {}", out_path.display());
}
