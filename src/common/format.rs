// src/common/format.rs

use chrono::NaiveDate;
use num_format::{Locale as NumLocale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::middleware::i18n::Locale;

/// Formata um valor monetário com símbolo, milhar e duas casas.
///
/// es: `$ 1.234.567,50` / en: `$1,234,567.50`
pub fn format_currency(amount: Decimal, locale: &Locale) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let integer = abs.trunc().to_u64().unwrap_or(u64::MAX);
    let cents = ((abs - abs.trunc()) * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);
    let sign = if negative { "-" } else { "" };

    if locale.is_english() {
        format!("{}${}.{:02}", sign, integer.to_formatted_string(&NumLocale::en), cents)
    } else {
        // Locale::de tem o mesmo agrupamento com ponto do es-CO (1.234.567)
        format!("{}$ {},{:02}", sign, integer.to_formatted_string(&NumLocale::de), cents)
    }
}

pub fn format_date(date: NaiveDate, locale: &Locale) -> String {
    if locale.is_english() {
        date.format("%m/%d/%Y").to_string()
    } else {
        date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn spanish_currency_uses_dot_grouping_and_comma_decimals() {
        assert_eq!(format_currency(dec("1234567.5"), &Locale::default()), "$ 1.234.567,50");
        assert_eq!(format_currency(dec("0"), &Locale::default()), "$ 0,00");
    }

    #[test]
    fn english_currency_uses_comma_grouping() {
        assert_eq!(format_currency(dec("1234567.5"), &Locale::from_tag("en")), "$1,234,567.50");
    }

    #[test]
    fn negative_amounts_keep_the_sign_and_round_to_cents() {
        assert_eq!(format_currency(dec("-15000.456"), &Locale::default()), "-$ 15.000,46");
    }

    #[test]
    fn dates_follow_locale_order() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 28).unwrap();
        assert_eq!(format_date(d, &Locale::default()), "28/05/2024");
        assert_eq!(format_date(d, &Locale::from_tag("en")), "05/28/2024");
    }
}
