//! Writes a deterministic `launch_records.csv` so the dashboard can be run
//! without the original data file. Same output on every invocation.

/// Minimal deterministic PRNG (64-bit LCG); only uniform draws are needed.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407),
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) as u32
    }

    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / u32::MAX as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u32() as usize % items.len()]
    }
}

/// Booster version category flown around a given flight number.
fn booster_category(flight: u32) -> &'static str {
    match flight {
        0..=5 => "v1.0",
        6..=19 => "v1.1",
        20..=41 => "FT",
        42..=50 => "B4",
        _ => "B5",
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sites = [
        "CCAFS LC-40",
        "CCAFS SLC-40",
        "KSC LC-39A",
        "VAFB SLC-4E",
    ];
    let failure_outcomes = [
        "Failure (in flight)",
        "Failure (parachute)",
    ];

    let output_path = "launch_records.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
            "Mission Outcome",
        ])
        .expect("Failed to write header");

    let n_flights: u32 = 56;
    for flight in 1..=n_flights {
        let site = *rng.pick(&sites);
        let category = booster_category(flight);

        // Payloads grow with the booster era, up to the heaviest flights.
        let (lo, hi) = match category {
            "v1.0" => (0.0, 700.0),
            "v1.1" => (500.0, 4500.0),
            "FT" => (1500.0, 7000.0),
            _ => (2500.0, 9600.0),
        };
        let payload_kg = (lo + (hi - lo) * rng.next_f64()).round();

        // Landing success odds improve over the programme.
        let success = rng.next_f64() < 0.35 + 0.6 * (flight as f64 / n_flights as f64);
        let outcome = if success {
            if rng.next_f64() < 0.1 {
                "Success (payload status unclear)"
            } else {
                "Success"
            }
        } else {
            *rng.pick(&failure_outcomes)
        };

        writer
            .write_record([
                flight.to_string(),
                site.to_string(),
                u32::from(success).to_string(),
                format!("{payload_kg:.0}"),
                category.to_string(),
                outcome.to_string(),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_flights} launch records to {output_path}");
}
