use rust_decimal::Decimal;

use super::schedule::Schedule;
use crate::config::TransferPolicy;
use crate::firefly_api::{LedgerApi, TransferRequest};
use crate::terminal::{
    style_account, style_amount, style_date, style_description, style_error, BulletPointPrinter,
    LineWriter,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitSummary {
    pub planned: usize,
    pub submitted: usize,
    pub failed: usize,
}

/// Reports one transfer per scheduled date and, if `policy.apply` is set, creates it.
///
/// A failed submission is reported and doesn't stop the remaining dates. Transfers that were
/// already created stay in place.
pub async fn emit_transfers<W: LineWriter + Clone>(
    api: &impl LedgerApi,
    policy: &TransferPolicy,
    schedule: &Schedule,
    printer: &BulletPointPrinter<W>,
) -> EmitSummary {
    let mut summary = EmitSummary::default();
    for (date, entries) in schedule {
        let total = policy.amount * Decimal::from(entries.len());
        log::info!(
            "Auto-save transfer for {date}: total {total}, {} transactions, {} -> {}",
            entries.len(),
            policy.source_account,
            policy.destination_account,
        );
        printer.print_item(format!(
            "{} {} from {} to {} for {}",
            style_date(date),
            style_amount(&total, policy.currency_code.as_deref()),
            style_account(&policy.source_account),
            style_account(&policy.destination_account),
            count_transactions(entries.len()),
        ));
        let details = printer.indent();
        for entry in entries {
            details.print_item(format!(
                "{} {} {}",
                entry.date,
                style_amount(&entry.amount, Some(&entry.currency_code)),
                style_description(&entry.description),
            ));
        }
        summary.planned += 1;

        if !policy.apply {
            continue;
        }
        let request = TransferRequest::new(policy, *date, total);
        match api.create_transfer(&request).await {
            Ok(created) => {
                log::info!("Created transfer {} for {date}", created.id);
                details.print_line(format!("Created transfer #{}", created.id));
                summary.submitted += 1;
            }
            Err(err) => {
                log::error!("Failed to create transfer for {date}: {err:#}");
                details.print_line(style_error(&format!("Failed to create transfer: {err:#}")));
                summary.failed += 1;
            }
        }
    }
    summary
}

fn count_transactions(count: usize) -> String {
    if count == 1 {
        "1 transaction".to_string()
    } else {
        format!("{count} transactions")
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    use super::*;
    use crate::autosave::qualifier::QualifyingEntry;
    use crate::autosave::schedule::build_schedule;
    use crate::config::{DateBounds, AUTOSAVE_CATEGORY, AUTOSAVE_DESCRIPTION};
    use crate::firefly_api::{CreatedTransfer, TransactionsPage};
    use crate::terminal::RecordingLineWriter;

    /// Records created transfers and fails the ones dated `fail_on`
    #[derive(Default)]
    struct FakeLedger {
        created: RefCell<Vec<TransferRequest>>,
        fail_on: Option<&'static str>,
    }

    impl LedgerApi for FakeLedger {
        async fn transactions_page(
            &self,
            _page: u32,
            _bounds: &DateBounds,
        ) -> Result<TransactionsPage> {
            unreachable!("Emitting must not fetch transactions")
        }

        async fn create_transfer(&self, request: &TransferRequest) -> Result<CreatedTransfer> {
            if self.fail_on.is_some() && request.date() == self.fail_on {
                bail!("Server responded with 422 Unprocessable Entity: duplicate");
            }
            let mut created = self.created.borrow_mut();
            created.push(request.clone());
            Ok(CreatedTransfer {
                id: created.len().to_string(),
            })
        }
    }

    fn policy(apply: bool) -> TransferPolicy {
        TransferPolicy {
            amount: Decimal::new(150, 2),
            source_account: "Checking".to_string(),
            destination_account: "Savings".to_string(),
            description: AUTOSAVE_DESCRIPTION.to_string(),
            category: AUTOSAVE_CATEGORY.to_string(),
            currency_code: None,
            error_if_duplicate: false,
            apply_rules: true,
            apply,
        }
    }

    fn entry(description: &str, date: &str) -> QualifyingEntry {
        QualifyingEntry {
            currency_code: "CAD".to_string(),
            amount: Decimal::new(1999, 2),
            description: description.to_string(),
            date: date.to_string(),
        }
    }

    fn schedule() -> Schedule {
        build_schedule(
            vec![
                // auto-save on Monday 2023-03-13
                entry("coffee", "2023-03-10T08:00:00+00:00"),
                entry("lunch", "2023-03-10T12:00:00+00:00"),
                // auto-save on Tuesday 2023-03-14
                entry("groceries", "2023-03-11T10:00:00+00:00"),
                entry("gas", "2023-03-12T10:00:00+00:00"),
                entry("dinner", "2023-03-13T19:00:00+00:00"),
                // auto-save on Thursday 2023-03-16
                entry("book", "2023-03-15T10:00:00+00:00"),
            ],
            &DateBounds::default(),
        )
        .unwrap()
    }

    fn amounts_by_date(created: &[TransferRequest]) -> Vec<(String, Decimal)> {
        created
            .iter()
            .map(|request| {
                let split = &request.transactions[0];
                (split.date.clone(), split.amount)
            })
            .collect()
    }

    #[tokio::test]
    async fn dry_run_never_submits() {
        let api = FakeLedger::default();
        let writer = RecordingLineWriter::default();
        let summary = emit_transfers(
            &api,
            &policy(false),
            &schedule(),
            &BulletPointPrinter::new(writer.clone()),
        )
        .await;

        assert!(api.created.borrow().is_empty());
        assert_eq!(
            EmitSummary {
                planned: 3,
                submitted: 0,
                failed: 0
            },
            summary
        );
        assert_eq!(
            vec![
                "• 2023-03-13 3.00 from Checking to Savings for 2 transactions",
                "  • 2023-03-10T08:00:00+00:00 19.99 CAD coffee",
                "  • 2023-03-10T12:00:00+00:00 19.99 CAD lunch",
                "• 2023-03-14 4.50 from Checking to Savings for 3 transactions",
                "  • 2023-03-11T10:00:00+00:00 19.99 CAD groceries",
                "  • 2023-03-12T10:00:00+00:00 19.99 CAD gas",
                "  • 2023-03-13T19:00:00+00:00 19.99 CAD dinner",
                "• 2023-03-16 1.50 from Checking to Savings for 1 transaction",
                "  • 2023-03-15T10:00:00+00:00 19.99 CAD book",
            ],
            writer.lines()
        );
    }

    #[tokio::test]
    async fn apply_submits_once_per_date() {
        let api = FakeLedger::default();
        let writer = RecordingLineWriter::default();
        let summary = emit_transfers(
            &api,
            &policy(true),
            &schedule(),
            &BulletPointPrinter::new(writer.clone()),
        )
        .await;

        assert_eq!(
            EmitSummary {
                planned: 3,
                submitted: 3,
                failed: 0
            },
            summary
        );
        let created = api.created.borrow();
        assert_eq!(
            vec![
                ("2023-03-13T00:00:00".to_string(), Decimal::new(300, 2)),
                ("2023-03-14T00:00:00".to_string(), Decimal::new(450, 2)),
                ("2023-03-16T00:00:00".to_string(), Decimal::new(150, 2)),
            ],
            amounts_by_date(&created)
        );
        for request in created.iter() {
            let split = &request.transactions[0];
            assert_eq!("transfer", split.type_);
            assert_eq!(AUTOSAVE_DESCRIPTION, split.description);
            assert_eq!(AUTOSAVE_CATEGORY, split.category_name);
            assert_eq!("Checking", split.source_name);
            assert_eq!("Savings", split.destination_name);
            assert!(request.apply_rules);
        }
        let lines = writer.lines();
        assert!(lines.contains(&"  Created transfer #1".to_string()));
        assert!(lines.contains(&"  Created transfer #3".to_string()));
    }

    #[tokio::test]
    async fn failed_submission_continues_with_next_date() {
        let api = FakeLedger {
            fail_on: Some("2023-03-14T00:00:00"),
            ..Default::default()
        };
        let writer = RecordingLineWriter::default();
        let summary = emit_transfers(
            &api,
            &policy(true),
            &schedule(),
            &BulletPointPrinter::new(writer.clone()),
        )
        .await;

        assert_eq!(
            EmitSummary {
                planned: 3,
                submitted: 2,
                failed: 1
            },
            summary
        );
        assert_eq!(
            vec![
                ("2023-03-13T00:00:00".to_string(), Decimal::new(300, 2)),
                ("2023-03-16T00:00:00".to_string(), Decimal::new(150, 2)),
            ],
            amounts_by_date(&api.created.borrow())
        );
        assert!(writer.lines().contains(
            &"  Failed to create transfer: Server responded with 422 Unprocessable Entity: duplicate"
                .to_string()
        ));
    }

    #[test]
    fn transaction_count_is_pluralised() {
        assert_eq!("1 transaction", count_transactions(1));
        assert_eq!("2 transactions", count_transactions(2));
        assert_eq!("0 transactions", count_transactions(0));
    }

    #[tokio::test]
    async fn empty_schedule_does_nothing() {
        let api = FakeLedger::default();
        let writer = RecordingLineWriter::default();
        let summary = emit_transfers(
            &api,
            &policy(true),
            &Schedule::new(),
            &BulletPointPrinter::new(writer.clone()),
        )
        .await;
        assert_eq!(EmitSummary::default(), summary);
        assert!(writer.lines().is_empty());
        assert!(api.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn total_is_amount_times_entries() {
        let entries = (0..7)
            .map(|i| entry(&format!("purchase {i}"), "2023-03-08T10:00:00+00:00"))
            .collect();
        let schedule = Schedule::from([(NaiveDate::from_ymd_opt(2023, 3, 9).unwrap(), entries)]);
        let api = FakeLedger::default();
        emit_transfers(
            &api,
            &policy(true),
            &schedule,
            &BulletPointPrinter::new(RecordingLineWriter::default()),
        )
        .await;
        assert_eq!(
            vec![("2023-03-09T00:00:00".to_string(), Decimal::new(1050, 2))],
            amounts_by_date(&api.created.borrow())
        );
    }
}
