// Demo driver: runs the transaction pipeline over the canonical fixtures,
// shows contact dispatch, and optionally resolves a markup source given as
// the first CLI argument (URL or file path).

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::env;

use ledger_lens::{
    links, resolve, Address, ContactMethod, PhoneNumber, Pipeline, PipelineError, SourceKind,
    Transaction,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    run_pipeline_demo()?;
    run_contact_demo();

    if let Some(source) = env::args().nth(1) {
        run_resolver_demo(&source)?;
    }

    Ok(())
}

fn fixture_transactions() -> Result<Vec<Transaction>> {
    let date = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| anyhow::anyhow!("invalid fixture date"))
    };

    Ok(vec![
        Transaction::new(date(2024, 8, 2)?, "Acme", Decimal::new(240_000, 2)),
        Transaction::new(date(2024, 8, 3)?, "LoonyTunes", Decimal::new(150_000, 2)),
        Transaction::new(date(2024, 8, 3)?, "Acme", Decimal::new(180_000, 2)),
    ])
}

fn run_pipeline_demo() -> Result<()> {
    println!("Transaction pipeline");
    println!("━━━━━━━━━━━━━━━━━━━━");

    let pipeline = Pipeline::from_vec(fixture_transactions()?);

    // Strict lookup: no match would be an error
    let first_acme = pipeline.find(|tx| tx.customer_id == "Acme")?;
    println!(
        "✓ First Acme transaction: {} on {}",
        first_acme.amount, first_acme.date
    );

    // Optional lookup: absence is a value, not a failure
    match pipeline.try_find(|tx| tx.customer_id == "NoSuchCo") {
        Some(tx) => println!("✓ NoSuchCo transaction found: {}", tx.amount),
        None => println!("✓ NoSuchCo has no transactions (no error raised)"),
    }

    let total = pipeline.sum_by(|tx| tx.amount);
    let average = pipeline.average_by(|tx| tx.amount)?;
    println!("✓ Total volume: {total}, average: {average}");

    // Records are values: a correction builds a new record
    let corrected = first_acme.with_amount(Decimal::new(245_000, 2));
    println!(
        "✓ Correction: {} -> {} (original record untouched)",
        first_acme.amount, corrected.amount
    );

    // filter then sort, chained; same result as naming each step
    let threshold = Decimal::new(150_000, 2);
    let recent_large = pipeline
        .clone()
        .filter(|tx| tx.amount > threshold)
        .sort_by_descending(|tx| tx.date);
    println!(
        "✓ {} transactions above {}, most recent first:",
        recent_large.len(),
        threshold
    );
    println!("{}", serde_json::to_string_pretty(recent_large.items())?);

    // Averaging nothing is refused explicitly rather than dividing by zero
    let empty: Pipeline<Transaction> = Pipeline::from_vec(Vec::new());
    match empty.average_by(|tx| tx.amount) {
        Err(PipelineError::EmptyAggregate) => {
            println!("✓ Averaging an empty ledger is refused explicitly");
        }
        other => println!("unexpected empty-aggregate outcome: {other:?}"),
    }

    Ok(())
}

fn run_contact_demo() {
    println!("\nContact dispatch");
    println!("━━━━━━━━━━━━━━━━");

    let methods = vec![
        ContactMethod::PostalMail(Address::new("1 Loop Rd", "Springfield", "49007")),
        ContactMethod::Email("billing@acme.example".to_string()),
        ContactMethod::VoiceMail(PhoneNumber::new("1", "555-0100")),
        ContactMethod::Sms(PhoneNumber::new("44", "7700-900123")),
    ];

    for method in &methods {
        println!("  {}", method.dispatch_label());
    }
}

fn run_resolver_demo(source: &str) -> Result<()> {
    println!("\nDocument resolver");
    println!("━━━━━━━━━━━━━━━━━");
    println!(
        "Resolving {} source: {}",
        SourceKind::detect(source).name(),
        source
    );

    let document = resolve(source)?;
    let anchors = links(Some(&document));
    println!("✓ {} anchor elements", anchors.len());

    for anchor in anchors.iter().take(10) {
        let text = anchor.text();
        println!(
            "  {} -> {}",
            text.trim(),
            anchor.attr("href").unwrap_or_default()
        );
    }
    if anchors.len() > 10 {
        println!("  … and {} more", anchors.len() - 10);
    }

    Ok(())
}
