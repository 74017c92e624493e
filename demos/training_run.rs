//! Training Run Example
//!
//! Logs a simulated training loop with a live progress display, then
//! snapshots the run to JSON and restores it.
//!
//! Run with: cargo run --example training_run
//! Log-only display: cargo run --example training_run -- --log

use plotkit::deprecation::Deprecated;
use plotkit::palette::{Color, Colormap};
use plotkit::runlog::{ProgressMode, RunLogger};
use plotkit::Style;
use tracing_subscriber::EnvFilter;

#[allow(clippy::cast_precision_loss)]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mode = if std::env::args().any(|a| a == "--log") {
        ProgressMode::Log
    } else {
        ProgressMode::Console
    };

    println!("=== plotkit Training Run ===\n");

    // -------------------------------------------------------------------------
    // 1. Log a simulated training loop
    // -------------------------------------------------------------------------
    println!("1. Training (50 epochs)...");

    let epochs = 50;
    let mut logger = RunLogger::builder(epochs)
        .display_progress(true)
        .update_interval(5)
        .mode(mode)
        .prefix("train")
        .build()?;

    for epoch in 0..epochs {
        let x = epoch as f64;
        let loss = 2.5 / (x + 1.0) + 0.1;
        let accuracy = 0.5 + 0.45 * (1.0 - (-x / 10.0).exp());
        logger.log(
            [("loss", loss), ("accuracy", accuracy)],
            i64::try_from(epoch)?,
        )?;
        std::thread::sleep(std::time::Duration::from_millis(20));
    }

    println!("   {logger}");
    println!("   Display still live: {}", logger.is_displaying());

    // -------------------------------------------------------------------------
    // 2. Query metrics
    // -------------------------------------------------------------------------
    println!("\n2. Querying metrics...");

    let loss = logger.get("loss")?;
    let accuracy = logger.get("accuracy")?;
    println!("   Final loss: {:.4}", loss.last().copied().unwrap_or_default());
    println!(
        "   Best accuracy: {:.4}",
        accuracy.iter().copied().fold(f64::MIN, f64::max)
    );

    // -------------------------------------------------------------------------
    // 3. Snapshot round trip
    // -------------------------------------------------------------------------
    println!("\n3. Snapshot round trip...");

    let json = logger.snapshot().to_json()?;
    println!("   JSON size: {} bytes", json.len());
    let restored = RunLogger::from_json(&json)?;
    println!("   Restored: {restored}");

    // -------------------------------------------------------------------------
    // 4. Plot styling
    // -------------------------------------------------------------------------
    println!("\n4. Plot styling...");

    println!("   Loss curve color: {}", Color::Blue.hex());
    println!("   Accuracy curve color: {}", Color::Orange.hex());
    let cmap = Colormap::bl_wh_rd();
    println!(
        "   {} at 0.0/0.5/1.0: {} {} {}",
        cmap.name(),
        cmap.sample(0.0),
        cmap.sample(0.5),
        cmap.sample(1.0)
    );
    for style in Style::all() {
        println!("   Style {:?}: {}", style, style.resolve()?.display());
    }

    // -------------------------------------------------------------------------
    // 5. Deprecated helper
    // -------------------------------------------------------------------------
    println!("\n5. Deprecated helper...");

    let smooth = Deprecated::new("smooth_v1", |values: &[f64]| {
        values.iter().sum::<f64>() / values.len().max(1) as f64
    })
    .reason("Use an exponential moving average instead.");
    println!("   Mean loss: {:.4}", smooth.call(loss.as_slice()));

    println!("\n=== Done ===");
    Ok(())
}
