//! 金额解析与货币显示
//!
//! 解析用户输入的金额字符串（容忍千分位逗号和首尾空白，空串视为 0），
//! 并把 Decimal 渲染成带货币符号、保留两位小数的显示文本。

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// 金额字符串无法解析时返回的错误
#[derive(Debug, Error)]
#[error("无法解析金额 '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// 去掉首尾空白和千分位逗号
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// 把用户输入解析成 [`Decimal`]；空串或纯空白视为 0
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "金额输入无效: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// 货币代码对应的符号；不认识的代码返回 None
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "CNY" | "JPY" => Some("¥"),
        "KRW" => Some("₩"),
        _ => None,
    }
}

/// 整数部分每三位插入一个逗号
fn group_thousands(text: &str) -> String {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::from(sign);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// 渲染货币显示文本：四舍五入到分、分组、加符号
///
/// 已知代码用符号前缀（$60.00），未知代码退回 "CODE 60.00"。
pub fn format_currency(amount: Decimal, code: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = group_thousands(&format!("{rounded:.2}"));
    match currency_symbol(code) {
        Some(symbol) => format!("{symbol}{text}"),
        None => format!("{code} {text}"),
    }
}

/// 地区代码到货币代码
fn currency_for_region(region: &str) -> Option<&'static str> {
    match region {
        "US" => Some("USD"),
        "CA" => Some("CAD"),
        "AU" => Some("AUD"),
        "GB" => Some("GBP"),
        "CN" => Some("CNY"),
        "JP" => Some("JPY"),
        "KR" => Some("KRW"),
        "DE" | "FR" | "ES" | "IT" | "NL" | "IE" | "PT" | "AT" | "BE" | "FI" => Some("EUR"),
        _ => None,
    }
}

/// 从 locale 环境变量推断货币代码（LC_ALL > LC_MONETARY > LANG），
/// 取不到或不认识时退回 USD。只在生成默认配置时用，显示本身不看 locale。
pub fn detect_currency_code() -> String {
    let locale = ["LC_ALL", "LC_MONETARY", "LANG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .unwrap_or_default();

    // 形如 zh_CN.UTF-8 / en_US / en-GB@euro，取地区段
    let region = locale
        .split(['.', '@'])
        .next()
        .and_then(|tag| tag.split(['_', '-']).nth(1))
        .unwrap_or("");

    currency_for_region(region).unwrap_or("USD").to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_amount("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_empty_is_zero() {
        assert_eq!(parse_amount("").unwrap(), dec!(0));
        assert_eq!(parse_amount("   ").unwrap(), dec!(0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("12.3.4").is_err());
    }

    #[test]
    fn format_groups_digits_and_rounds_half_up() {
        assert_eq!(format_currency(dec!(1234567.891), "USD"), "$1,234,567.89");
        assert_eq!(format_currency(dec!(0.005), "USD"), "$0.01");
        assert_eq!(format_currency(dec!(60), "USD"), "$60.00");
    }

    #[test]
    fn format_known_symbols() {
        assert_eq!(format_currency(dec!(1), "EUR"), "€1.00");
        assert_eq!(format_currency(dec!(1), "CNY"), "¥1.00");
    }

    #[test]
    fn format_falls_back_to_code_prefix() {
        assert_eq!(format_currency(dec!(10), "CHF"), "CHF 10.00");
    }

    #[test]
    fn region_mapping_covers_known_regions_only() {
        assert_eq!(currency_for_region("CN"), Some("CNY"));
        assert_eq!(currency_for_region("GB"), Some("GBP"));
        assert_eq!(currency_for_region("FR"), Some("EUR"));
        assert_eq!(currency_for_region("ZZ"), None);
    }
}
