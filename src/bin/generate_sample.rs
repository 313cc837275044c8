//! Writes a deterministic synthetic `spacex_launch_dash.csv` so the dashboard
//! has something to show without shipping the historical dataset.

/// Per-site launch profile: success odds and payload envelope in kg.
const SITES: [(&str, f64, (f64, f64)); 4] = [
    ("CCAFS LC-40", 0.60, (300.0, 7_000.0)),
    ("CCAFS SLC-40", 0.75, (500.0, 9_600.0)),
    ("KSC LC-39A", 0.85, (1_000.0, 15_600.0)),
    ("VAFB SLC-4E", 0.70, (500.0, 9_600.0)),
];

const FLIGHTS: u32 = 56;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Booster version by flight era, mirroring the real fleet's progression.
fn booster_version(flight: u32) -> (&'static str, &'static str) {
    match flight {
        0..=5 => ("F9 v1.0", "v1.0"),
        6..=20 => ("F9 v1.1", "v1.1"),
        21..=40 => ("F9 FT", "FT"),
        41..=48 => ("F9 B4", "B4"),
        _ => ("F9 B5", "B5"),
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "Payload Mass (kg)",
            "class",
            "Booster Version",
            "Booster Version Category",
        ])
        .expect("Failed to write header");

    for flight in 1..=FLIGHTS {
        let (site, success_odds, (lo, hi)) = SITES[rng.next_u64() as usize % SITES.len()];

        let payload = (lo + (hi - lo) * rng.next_f64()).round();
        // Heavier payloads are a little riskier.
        let heaviness = (payload - lo) / (hi - lo);
        let odds = success_odds - 0.15 * heaviness;
        let class = if rng.next_f64() < odds { 1 } else { 0 };

        let (version, category) = booster_version(flight);

        writer
            .write_record([
                flight.to_string(),
                site.to_string(),
                format!("{payload}"),
                class.to_string(),
                version.to_string(),
                category.to_string(),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {FLIGHTS} launch records to {output_path}");
}
