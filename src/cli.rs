use anyhow::{ensure, Context as _, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::args::Args;
use crate::autosave::{self, EmitSummary};
use crate::config::Config;
use crate::firefly_api::{self, AccessToken, Firefly, LedgerApi};
use crate::terminal::{style_header, BulletPointPrinter, LineWriter};

pub async fn main(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    // Read the token before touching the network so a missing file fails fast
    let access_token = AccessToken::load(&config.token_path).await?;
    let firefly = Firefly::new(&config.server, &access_token)?;
    run(&firefly, &config, &BulletPointPrinter::new_stdout()).await
}

async fn run<W: LineWriter + Clone>(
    api: &impl LedgerApi,
    config: &Config,
    printer: &BulletPointPrinter<W>,
) -> Result<()> {
    let progress = ProgressBar::new(0).with_style(
        ProgressStyle::with_template("Loading transactions {bar:40} {pos}/{len} pages")
            .context("Invalid progress bar template")?,
    );
    let legs = firefly_api::get_all_transactions(api, &config.bounds, |current, total| {
        progress.set_length(total.into());
        progress.set_position(current.into());
    })
    .await;
    progress.finish_and_clear();
    let legs = legs.context("Failed to load transactions")?;

    let entries = autosave::qualifying_entries(&config.rules, &legs);
    log::info!(
        "{} of {} transactions from {:?} qualify for auto-save",
        entries.len(),
        legs.len(),
        config.rules.source_account,
    );
    let schedule = autosave::build_schedule(entries, &config.bounds)?;

    if config.transfer.apply {
        printer.print_line(style_header("Creating auto-save transfers:"));
    } else {
        printer.print_line(style_header("Auto-save transfers (dry run):"));
    }
    if schedule.is_empty() {
        printer.print_item("(none)");
    }
    let summary = autosave::emit_transfers(api, &config.transfer, &schedule, printer).await;
    print_summary(printer, config, &summary);

    ensure!(
        summary.failed == 0,
        "Failed to create {} of {} auto-save transfers",
        summary.failed,
        summary.planned,
    );
    Ok(())
}

fn print_summary<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    config: &Config,
    summary: &EmitSummary,
) {
    printer.print_line("");
    if config.transfer.apply {
        printer.print_line(format!(
            "Created {} of {} transfers",
            summary.submitted, summary.planned,
        ));
    } else {
        printer.print_line(format!(
            "Would create {} transfers. Run with --apply to create them.",
            summary.planned,
        ));
    }
}
