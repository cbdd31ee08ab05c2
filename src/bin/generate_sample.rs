use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// Role name, the skills it draws from, and its base salary in lacs.
const ROLES: [(&str, &[&str], f64); 6] = [
    ("Data Analyst", &["SQL", "Excel", "Python", "Tableau", "Power BI", "Statistics"], 4.0),
    ("Data Scientist", &["Python", "Machine Learning", "SQL", "Statistics", "Deep Learning", "NLP"], 8.0),
    ("Software Engineer", &["Java", "Spring", "SQL", "Docker", "Kubernetes", "AWS"], 6.0),
    ("Frontend Developer", &["JavaScript", "React", "CSS", "HTML", "TypeScript"], 5.0),
    ("DevOps Engineer", &["Docker", "Kubernetes", "AWS", "Linux", "Terraform", "Python"], 7.0),
    ("QA Engineer", &["Selenium", "Java", "Testing", "SQL", "Jira"], 3.5),
];

const COMPANIES: [&str; 8] = [
    "Acme Analytics", "Globex", "Initech", "Umbrella Systems",
    "Stark Industries", "Wayne Tech", "Hooli", "Vandelay Imports",
];

const LOCATIONS: [&str; 9] = [
    "Bangalore", "Pune", "Mumbai", "Hyderabad", "Chennai", "Delhi NCR",
    "Bangalore, Remote", "Work From Home", "Pune, Hybrid - WFH",
];

#[derive(Debug, Serialize)]
struct SampleRow {
    job_id: String,
    job_role: String,
    company: String,
    location: String,
    skills: String,
    experience: String,
    salary: String,
    rating: String,
}

fn generate_row(id: usize, rng: &mut SimpleRng) -> SampleRow {
    let (role, skill_pool, base_salary) = ROLES[rng.below(ROLES.len())];

    let n_skills = 2 + rng.below(skill_pool.len() - 1);
    let mut pool: Vec<&str> = skill_pool.to_vec();
    let mut skills = Vec::with_capacity(n_skills);
    for _ in 0..n_skills {
        skills.push(pool.remove(rng.below(pool.len())));
    }

    let min_exp = rng.below(8);
    let max_exp = min_exp + 1 + rng.below(5);
    let min_salary = base_salary + min_exp as f64 * 1.5 + rng.next_f64() * 2.0;
    let max_salary = min_salary + 1.0 + rng.next_f64() * 6.0;

    // A share of rows carry the placeholders real scraped data has.
    let salary = if rng.below(10) == 0 {
        "Not disclosed".to_string()
    } else {
        format!("{min_salary:.1}-{max_salary:.1}")
    };
    let rating = if rng.below(6) == 0 {
        "missing".to_string()
    } else {
        format!("{:.1}", 2.5 + rng.next_f64() * 2.5)
    };

    SampleRow {
        job_id: format!("{:06}", 100_000 + id),
        job_role: role.to_string(),
        company: rng.pick(&COMPANIES).to_string(),
        location: rng.pick(&LOCATIONS).to_string(),
        skills: skills.join(", "),
        experience: format!("{min_exp}-{max_exp}"),
        salary,
        rating,
    }
}

fn write_csv(path: &str, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[SampleRow]) -> Result<()> {
    let columns: [(&str, fn(&SampleRow) -> &str); 8] = [
        ("job_id", |r| r.job_id.as_str()),
        ("job_role", |r| r.job_role.as_str()),
        ("company", |r| r.company.as_str()),
        ("location", |r| r.location.as_str()),
        ("skills", |r| r.skills.as_str()),
        ("experience", |r| r.experience.as_str()),
        ("salary", |r| r.salary.as_str()),
        ("rating", |r| r.rating.as_str()),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, get)| {
            Arc::new(StringArray::from(rows.iter().map(get).collect::<Vec<_>>())) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("creating RecordBatch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let n_rows: usize = std::env::args()
        .nth(1)
        .map(|s| s.parse::<usize>().context("row count must be a positive integer"))
        .transpose()?
        .unwrap_or(2_000);

    let mut rng = SimpleRng::new(42);
    let rows: Vec<SampleRow> = (0..n_rows).map(|i| generate_row(i, &mut rng)).collect();

    let csv_path = "jobs_data_preprocessed.csv";
    let parquet_path = "jobs_data_preprocessed.parquet";
    write_csv(csv_path, &rows)?;
    write_parquet(parquet_path, &rows)?;

    println!("Wrote {} postings to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
