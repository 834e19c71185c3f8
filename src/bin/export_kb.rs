//! Export the built-in knowledge base as JSON, or check a JSON knowledge base.
//!
//! Usage:
//!   cargo run --bin export_kb <out.json>        write the built-in content
//!   cargo run --bin export_kb --check <kb.json> validate a custom file
//!
//! The exported file is the starting point for a custom knowledge base; point
//! `knowledge_base_path` in the config at the edited copy.

use std::path::Path;

use faq_assistant::{KnowledgeBase, KnowledgeError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let result = match args.as_slice() {
        [_, flag, path] if flag == "--check" => check(Path::new(path)),
        [_, path] if !path.starts_with("--") => export(Path::new(path)),
        _ => {
            let program = args.first().map(String::as_str).unwrap_or("export_kb");
            eprintln!("Usage: {program} <out.json> | --check <kb.json>");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn export(path: &Path) -> Result<(), KnowledgeError> {
    let kb = KnowledgeBase::builtin();
    kb.save(path)?;
    println!(
        "Wrote {} categories ({} entries) to {}",
        kb.categories().len(),
        kb.entry_count(),
        path.display()
    );
    Ok(())
}

fn check(path: &Path) -> Result<(), KnowledgeError> {
    let kb = KnowledgeBase::load(path)?;
    for category in kb.categories() {
        println!(
            "{}: {} keywords, {} entries{}",
            category.name,
            category.keywords.len(),
            category.entries.len(),
            if category.prefix.is_some() { ", custom prefix" } else { "" }
        );
    }
    println!("OK");
    Ok(())
}
