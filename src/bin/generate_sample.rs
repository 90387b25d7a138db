use chrono::{Duration, NaiveDate};

use shopsight::data::model::Order;

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

    fn next_range(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (category, base price $, base weight g)
    let categories: [(&str, f64, f64); 5] = [
        ("toys", 45.0, 400.0),
        ("books", 25.0, 300.0),
        ("electronics", 320.0, 900.0),
        ("home_decor", 60.0, 1500.0),
        ("sports_leisure", 80.0, 700.0),
    ];
    let products_per_category = 12u64;

    let first_day = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    let day_span = 180u64;
    let n_orders = 800;

    let mut orders: Vec<Order> = Vec::with_capacity(n_orders);
    for _ in 0..n_orders {
        let cat_idx = rng.next_range(categories.len() as u64) as usize;
        let (category, base_price, base_weight) = categories[cat_idx];
        let sku = cat_idx as u64 * products_per_category + rng.next_range(products_per_category);

        let price = round_cents((base_price * rng.gauss(1.0, 0.25).abs()).max(1.0));
        // Roughly a third of orders carry a 5–30% discount.
        let payment_value = if rng.next_f64() < 0.35 {
            let discount = 0.05 + 0.25 * rng.next_f64();
            round_cents(price * (1.0 - discount))
        } else {
            price
        };

        let date = first_day + Duration::days(rng.next_range(day_span) as i64);
        let purchased_at = date
            .and_hms_opt(
                rng.next_range(24) as u32,
                rng.next_range(60) as u32,
                rng.next_range(60) as u32,
            )
            .expect("valid time");

        let quantity = match rng.next_f64() {
            q if q < 0.7 => 1,
            q if q < 0.92 => 2,
            _ => 3,
        };

        orders.push(Order {
            product_id: format!("SKU-{sku:04}"),
            category: category.to_string(),
            purchased_at,
            price,
            payment_value,
            freight_value: round_cents(rng.gauss(15.0, 5.0).abs()),
            product_weight_g: (base_weight * rng.gauss(1.0, 0.3).abs()).round(),
            quantity,
        });
    }

    let output_path = "data/orders.csv";
    std::fs::create_dir_all("data").expect("Failed to create data directory");
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    for order in &orders {
        writer.serialize(order).expect("Failed to write order");
    }
    writer.flush().expect("Failed to flush writer");

    println!(
        "Wrote {} orders across {} categories to {output_path}",
        orders.len(),
        categories.len()
    );
}
