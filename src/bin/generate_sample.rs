use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const TITLES: usize = 800;

const COUNTRIES: &[&str] = &[
    "United States",
    "India",
    "United Kingdom",
    "Japan",
    "South Korea",
    "Canada",
    "Spain",
    "France",
    "Mexico",
    "Egypt",
    "Turkey",
    "Nigeria",
];

const MOVIE_GENRES: &[&str] = &[
    "Dramas",
    "Comedies",
    "International Movies",
    "Documentaries",
    "Action & Adventure",
    "Independent Movies",
    "Romantic Movies",
    "Thrillers",
    "Horror Movies",
    "Stand-Up Comedy",
    "Children & Family Movies",
];

const SHOW_GENRES: &[&str] = &[
    "International TV Shows",
    "TV Dramas",
    "TV Comedies",
    "Crime TV Shows",
    "Kids' TV",
    "Docuseries",
    "Reality TV",
    "Anime Series",
];

const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const RATINGS: &[&str] = &["TV-MA", "TV-14", "PG-13", "R", "TV-PG", "TV-Y7"];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Skewed pick: earlier entries are more likely.
    fn pick_skewed<'a>(&mut self, items: &[&'a str]) -> &'a str {
        let u = self.next_f64();
        items[((u * u) * items.len() as f64) as usize % items.len()]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One generated catalog row; `None` marks an empty cell.
struct Row {
    show_id: String,
    kind: Option<&'static str>,
    title: String,
    country: Option<String>,
    date_added: Option<String>,
    release_year: i64,
    rating: &'static str,
    duration: String,
    listed_in: Option<String>,
}

fn generate_row(i: usize, rng: &mut SimpleRng) -> Row {
    let is_movie = rng.chance(0.7);
    let kind = if rng.chance(0.005) {
        None
    } else if is_movie {
        Some("Movie")
    } else {
        Some("TV Show")
    };

    let country = if rng.chance(0.08) {
        None
    } else if rng.chance(0.15) {
        let a = rng.pick_skewed(COUNTRIES);
        let b = rng.pick_skewed(COUNTRIES);
        Some(if a == b { a.to_string() } else { format!("{a}, {b}") })
    } else {
        Some(rng.pick_skewed(COUNTRIES).to_string())
    };

    // Growth skews towards recent years.
    let year = 2008 + (rng.next_f64().sqrt() * 14.0) as i64;
    let date_added = if rng.chance(0.02) {
        None
    } else if rng.chance(0.01) {
        Some("unknown".to_string())
    } else {
        let month = MONTHS[rng.below(MONTHS.len())];
        let day = 1 + rng.below(28);
        // The real catalog has a few dates with a leading space.
        let pad = if rng.chance(0.05) { " " } else { "" };
        Some(format!("{pad}{month} {day}, {year}"))
    };

    let pool = if is_movie { MOVIE_GENRES } else { SHOW_GENRES };
    let listed_in = if rng.chance(0.01) {
        None
    } else {
        let n = 1 + rng.below(3);
        let mut genres: Vec<&str> = Vec::with_capacity(n);
        for _ in 0..n {
            let g = rng.pick_skewed(pool);
            if !genres.contains(&g) {
                genres.push(g);
            }
        }
        Some(genres.join(", "))
    };

    let duration = if is_movie {
        format!("{} min", 70 + rng.below(80))
    } else {
        let seasons = 1 + rng.below(5);
        format!("{seasons} Season{}", if seasons > 1 { "s" } else { "" })
    };

    Row {
        show_id: format!("s{}", i + 1),
        kind,
        title: format!("Title {:04}", i + 1),
        country,
        date_added,
        release_year: year - rng.below(20) as i64,
        rating: RATINGS[rng.below(RATINGS.len())],
        duration,
        listed_in,
    }
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "show_id",
        "type",
        "title",
        "country",
        "date_added",
        "release_year",
        "rating",
        "duration",
        "listed_in",
    ])?;
    for row in rows {
        let release_year = row.release_year.to_string();
        writer.write_record([
            row.show_id.as_str(),
            row.kind.unwrap_or(""),
            row.title.as_str(),
            row.country.as_deref().unwrap_or(""),
            row.date_added.as_deref().unwrap_or(""),
            release_year.as_str(),
            row.rating,
            row.duration.as_str(),
            row.listed_in.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let text = |f: fn(&Row) -> Option<&str>| -> ArrayRef {
        Arc::new(rows.iter().map(f).collect::<StringArray>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("show_id", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, true),
        Field::new("title", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, true),
        Field::new("date_added", DataType::Utf8, true),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, false),
        Field::new("duration", DataType::Utf8, false),
        Field::new("listed_in", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| Some(r.show_id.as_str())),
            text(|r| r.kind),
            text(|r| Some(r.title.as_str())),
            text(|r| r.country.as_deref()),
            text(|r| r.date_added.as_deref()),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.release_year))),
            text(|r| Some(r.rating)),
            text(|r| Some(r.duration.as_str())),
            text(|r| r.listed_in.as_deref()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..TITLES).map(|i| generate_row(i, &mut rng)).collect();

    let csv_path = "netflix_titles.csv";
    write_csv(csv_path, &rows)?;
    let parquet_path = "netflix_titles.parquet";
    write_parquet(parquet_path, &rows)?;

    println!("Wrote {} titles to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
