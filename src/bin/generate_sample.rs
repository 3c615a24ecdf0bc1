//! Writes a deterministic sample admissions CSV to
//! `data/UC_Schools_Admission_Rankings.csv` so the dashboard can be
//! exercised without the real dataset.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const OUTPUT: &str = "data/UC_Schools_Admission_Rankings.csv";

const CAMPUSES: &[&str] = &["UC Berkeley", "UCLA", "UCSD"];

const CITIES: &[(&str, &str)] = &[
    ("Irvine", "Orange"),
    ("San Jose", "Santa Clara"),
    ("Fresno", "Fresno"),
    ("Sacramento", "Sacramento"),
    ("San Diego", "San Diego"),
    ("Oakland", "Alameda"),
    ("Davis", "Yolo"),
    ("Pasadena", "Los Angeles"),
];

const SCHOOL_SUFFIXES: &[&str] = &["High School", "Academy", "Preparatory", "Charter School"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform float in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One demographic column triple: applied, admitted, rate.
fn demo_cells(rng: &mut SimpleRng, total_applied: u32, share: f64) -> [String; 3] {
    let applied = (total_applied as f64 * share * rng.range(0.6, 1.4)) as u32;
    if applied == 0 {
        // Unreported group: the loader treats blanks as zero.
        return [String::new(), String::new(), String::new()];
    }
    let rate = rng.range(15.0, 95.0);
    let admitted = (applied as f64 * rate / 100.0) as u32;
    [
        applied.to_string(),
        admitted.to_string(),
        format!("{rate:.1}"),
    ]
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    if let Some(dir) = Path::new(OUTPUT).parent() {
        fs::create_dir_all(dir).context("creating data directory")?;
    }
    let mut writer = csv::Writer::from_path(OUTPUT).context("opening output CSV")?;

    writer.write_record([
        "School",
        "City",
        "County",
        "College",
        "Private_Public",
        "Applied",
        "Admitted",
        "Enrolled",
        "Admit_Rate_%",
        "Asian_Applied",
        "Asian_Admitted",
        "Asian_Admit_Rate_%",
        "Hispanic_Latinx_Applied",
        "Hispanic_Latinx_Admitted",
        "Hispanic_Latinx_Admit_Rate_%",
        "White_Applied",
        "White_Admitted",
        "White_Admit_Rate_%",
        "African_American_Applied",
        "African_American_Admitted",
        "African_American_Admit_Rate_%",
        "International_Applied",
        "International_Admitted",
        "International_Admit_Rate_%",
        "Pacific_Islander_Applied",
        "Pacific_Islander_Admitted",
        "Pacific_Islander_Admit_Rate_%",
        "American_Indian_Applied",
        "American_Indian_Admitted",
        "American_Indian_Admit_Rate_%",
    ])?;

    let mut rows = 0usize;
    for i in 0..40 {
        let (city, county) = *rng.pick(CITIES);
        let suffix = *rng.pick(SCHOOL_SUFFIXES);
        let school = format!("{city} {suffix} #{i}");
        let school_type = if rng.unit() < 0.7 { "Public" } else { "Private" };

        // Most schools report to one campus, some to two or three.
        let campuses = 1 + (rng.next_u64() % 3) as usize;
        for campus in CAMPUSES.iter().take(campuses) {
            let applied = 40 + (rng.next_u64() % 400) as u32;
            let rate = rng.range(10.0, 95.0);
            let admitted = (applied as f64 * rate / 100.0) as u32;
            let enrolled = (admitted as f64 * rng.range(0.3, 0.7)) as u32;

            let mut record: Vec<String> = vec![
                school.clone(),
                city.to_string(),
                county.to_string(),
                campus.to_string(),
                school_type.to_string(),
                applied.to_string(),
                admitted.to_string(),
                enrolled.to_string(),
                format!("{rate:.1}"),
            ];
            for share in [0.30, 0.25, 0.20, 0.08, 0.10, 0.02, 0.02] {
                record.extend(demo_cells(&mut rng, applied, share));
            }
            writer.write_record(&record)?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} rows to {OUTPUT}");
    Ok(())
}
