use chrono::NaiveDate;
use console::{style, StyledObject};
use rust_decimal::Decimal;

mod bullet_points;

pub use bullet_points::{BulletPointPrinter, LineWriter};

#[cfg(test)]
pub use bullet_points::RecordingLineWriter;

pub fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

pub fn style_date(date: &NaiveDate) -> StyledObject<String> {
    style(date.format("%Y-%m-%d").to_string()).cyan()
}

pub fn style_amount(amount: &Decimal, currency_code: Option<&str>) -> StyledObject<String> {
    let formatted = match currency_code {
        Some(currency_code) => format!("{amount} {currency_code}"),
        None => amount.to_string(),
    };
    style(formatted).bold().green()
}

pub fn style_account(account: &str) -> StyledObject<&str> {
    style(account).magenta()
}

pub fn style_description(description: &str) -> StyledObject<&str> {
    style(description).blue()
}

pub fn style_error(error: &str) -> StyledObject<&str> {
    style(error).red().bold()
}
