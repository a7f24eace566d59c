use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use drug_ratio_viewer::data::loader::{DEFAULT_DATA_FILE, KEY_COLUMN, VALUE_COLUMN};

/// One row in the layout of the public `drug200.csv` dataset.
#[derive(Debug, Serialize)]
struct DrugRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Sex")]
    sex: &'static str,
    #[serde(rename = "BP")]
    bp: &'static str,
    #[serde(rename = "Cholesterol")]
    cholesterol: &'static str,
    #[serde(rename = "Na_to_K")]
    na_to_k: f64,
    #[serde(rename = "Drug")]
    drug: &'static str,
}

/// Seeded xoshiro256** source, so repeated runs write the same file.
struct RowRng {
    state: [u64; 4],
}

impl RowRng {
    fn seeded(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for slot in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        RowRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.state;
        let out = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *s1 << 17;
        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= t;
        *s3 = s3.rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Age in `[lo, lo + span)`.
    fn age(&mut self, lo: u32, span: u32) -> u32 {
        lo + (self.next_u64() % u64::from(span)) as u32
    }

    /// Log-normal draw (Box-Muller on the log scale) for the skewed ratio column.
    fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (mu + sigma * z).exp()
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate_row(rng: &mut RowRng) -> DrugRow {
    let age = rng.age(15, 60);
    let sex = rng.pick(&["F", "M"]);
    let bp = rng.pick(&["HIGH", "NORMAL", "LOW"]);
    let cholesterol = rng.pick(&["HIGH", "NORMAL"]);

    // Right-skewed like the real column: most rows 6-20, a long tail to ~38.
    let na_to_k = rng.log_normal(2.6, 0.45).clamp(6.2, 38.3);
    let na_to_k = (na_to_k * 1000.0).round() / 1000.0;

    let drug = if na_to_k > 15.0 {
        "DrugY"
    } else {
        match bp {
            "HIGH" if age <= 50 => "drugA",
            "HIGH" => "drugB",
            "LOW" if cholesterol == "HIGH" => "drugC",
            _ => "drugX",
        }
    };

    DrugRow {
        age,
        sex,
        bp,
        cholesterol,
        na_to_k,
        drug,
    }
}

/// Usage: `generate_sample [OUTPUT] [ROWS]`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 200,
    };

    let mut rng = RowRng::seeded(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for _ in 0..rows {
        writer
            .serialize(generate_row(&mut rng))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    println!(
        "Wrote {rows} rows ({KEY_COLUMN}, {VALUE_COLUMN}, ...) to {}",
        output_path.display()
    );
    Ok(())
}
