use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a deterministic sample question bank.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Write a sample prelims question bank CSV")]
struct Args {
    /// Destination CSV (parent directories are created).
    #[arg(long, default_value = "data/sample_generated.csv")]
    out: PathBuf,
}

const HEADER: [&str; 6] = [
    "year",
    "question_number",
    "question_text",
    "question_category",
    "sub_category",
    "source",
];

/// (category, sub_category, question stem, options)
const TEMPLATES: &[(&str, &str, &str, [&str; 4])] = &[
    (
        "Geography",
        "Rivers",
        "Which of the following rivers flows through a rift valley?",
        ["Narmada", "Godavari", "Krishna", "Kaveri"],
    ),
    (
        "Polity",
        "Fundamental Rights",
        "Consider the following statements about Article 21:\n1. It applies to citizens only.\n2. It covers the right to privacy.\nWhich of the statements given above is/are correct?",
        ["1 only", "2 only", "Both 1 and 2", "Neither 1 nor 2"],
    ),
    (
        "Economy",
        "",
        "Which body regulates the \"repo rate\" in India?",
        ["SEBI", "RBI", "NITI Aayog", "Finance Commission"],
    ),
    (
        "History",
        "Modern India",
        "In which year was the Indian National Congress founded?",
        ["1885", "1905", "1857", "1920"],
    ),
    (
        "Environment",
        "Biodiversity",
        "Which of the following is a biodiversity hotspot, located in India?",
        ["Western Ghats", "Thar Desert", "Deccan Plateau", "Indo-Gangetic Plain"],
    ),
];

fn main() -> Result<()> {
    let Args { out } = Args::parse();

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut writer =
        csv::Writer::from_path(&out).with_context(|| format!("creating {}", out.display()))?;
    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for year in 2019..=2023 {
        for (n, (category, sub, stem, options)) in TEMPLATES.iter().enumerate() {
            // Rotate templates so each year gets a different numbering.
            let number = ((n + year as usize) % TEMPLATES.len()) + 1;
            let text = format!(
                "{stem} (a) {} (b) {} (c) {} (d) {}",
                options[0], options[1], options[2], options[3]
            );
            let source = if year % 2 == 0 { "UPSC CSE" } else { "UPSC CSE (Set B)" };
            writer.write_record([
                year.to_string().as_str(),
                number.to_string().as_str(),
                text.as_str(),
                *category,
                *sub,
                source,
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} questions to {}", out.display());
    Ok(())
}
