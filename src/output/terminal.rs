// Colored terminal output for extraction results and reports.
//
// This module handles all terminal-specific formatting: colors, bars,
// tables. The main.rs display paths delegate here.

use colored::Colorize;

use crate::db::models::StoredExtraction;
use crate::extract::{ExtractionResult, KeywordSource};

use super::truncate_chars;

/// Display one extraction result as a keyword bar chart plus topic list.
pub fn display_extraction(title: &str, result: &ExtractionResult) {
    println!("\n{}", format!("=== Keywords for \"{title}\" ===").bold());
    println!();

    if result.keywords.is_empty() {
        println!("  No keywords survived filtering — the text may be too short.");
        return;
    }

    let bar_width: usize = 20;

    for (i, kw) in result.keywords.iter().enumerate() {
        let filled = (kw.score.clamp(0.0, 1.0) * bar_width as f64).round() as usize;
        let empty = bar_width.saturating_sub(filled);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

        let colored_bar = if kw.score >= 0.75 {
            bar.bright_green()
        } else if kw.score >= 0.4 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        let source_tag = match kw.source {
            KeywordSource::Title => "title".cyan(),
            KeywordSource::Body => "body".dimmed(),
        };

        println!(
            "  {:>2}. {:<28} {} {:>5.2}  {}",
            i + 1,
            kw.keyword,
            colored_bar,
            kw.score,
            source_tag,
        );
    }

    if !result.topics.is_empty() {
        println!("\n{}", "Recommended topics:".bold());
        for topic in &result.topics {
            println!("  - {:<44} {:>5.2}", topic.topic, topic.score);
        }
    }
    println!();
}

/// Display recent extraction runs as a compact table.
pub fn display_extraction_list(extractions: &[StoredExtraction]) {
    if extractions.is_empty() {
        println!("No extractions stored yet. Run `quarry extract` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Recent Extractions ({}) ===", extractions.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<36} {:<8} {:>8}  {:<8}  {}",
        "Id".dimmed(),
        "Title".dimmed(),
        "Source".dimmed(),
        "Keywords".dimmed(),
        "Enriched".dimmed(),
        "When".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    for ext in extractions {
        let enriched = if ext.enriched {
            "yes".green().to_string()
        } else {
            "no".dimmed().to_string()
        };
        println!(
            "  {:>4}  {:<36} {:<8} {:>8}  {:<8}  {}",
            ext.id,
            truncate_chars(&ext.title, 33),
            ext.source_kind,
            ext.result.keywords.len(),
            enriched,
            ext.extracted_at,
        );
    }
    println!();
}
