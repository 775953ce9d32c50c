//! Money rollup: material sums and the net work price.
//!
//! Every monetary input arrives as free text from the task-editing surface.
//! All of it is coerced through [`parse_amount`], which tolerates comma
//! decimal separators and garbage input, so partial data stays usable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parses a free-text amount, treating anything unparseable as zero.
///
/// Whitespace is removed, the first `,` is read as the decimal separator and
/// the longest leading numeric prefix is used, so `"12,5"`, `"12.5"` and
/// `"12.5 л"` all yield 12.5. An exponent suffix is honoured when digits
/// follow it, so `"1e3"` yields 1000 while `"1e"` yields 1.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tasksettle::task::domain::parse_amount;
///
/// assert_eq!(parse_amount("12,5"), dec!(12.5));
/// assert_eq!(parse_amount("1 200"), dec!(1200));
/// assert_eq!(parse_amount("2,5e2"), dec!(250));
/// assert_eq!(parse_amount("n/a"), dec!(0));
/// ```
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);
    numeric_prefix(&normalized)
        .and_then(|prefix| prefix.to_decimal())
        .unwrap_or(Decimal::ZERO)
}

/// Leading numeric run of a normalized amount.
struct NumericPrefix {
    mantissa: String,
    exponent: Option<String>,
}

impl NumericPrefix {
    fn to_decimal(&self) -> Option<Decimal> {
        match &self.exponent {
            Some(exponent) => {
                Decimal::from_scientific(&format!("{}e{exponent}", self.mantissa)).ok()
            }
            None => Decimal::from_str(&self.mantissa).ok(),
        }
    }
}

/// Extracts the leading `[+-]digits[.digits][e[+-]digits]` run of `text`.
fn numeric_prefix(text: &str) -> Option<NumericPrefix> {
    let mut sign = String::new();
    let mut integer = String::new();
    let mut fraction = String::new();
    let mut seen_point = false;
    let mut chars = text.chars().peekable();

    if let Some(&ch @ ('+' | '-')) = chars.peek() {
        if ch == '-' {
            sign.push('-');
        }
        chars.next();
    }
    while let Some(&ch) = chars.peek() {
        match ch {
            '0'..='9' if seen_point => fraction.push(ch),
            '0'..='9' => integer.push(ch),
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        chars.next();
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if integer.is_empty() {
        integer.push('0');
    }
    let mantissa = if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    };
    let exponent = match chars.next() {
        Some('e' | 'E') => exponent_digits(chars),
        _ => None,
    };
    Some(NumericPrefix { mantissa, exponent })
}

/// Reads `[+-]digits` after an exponent marker; `None` when no digit follows.
fn exponent_digits(chars: impl Iterator<Item = char>) -> Option<String> {
    let mut chars = chars.peekable();
    let mut exponent = String::new();
    if let Some(&ch @ ('+' | '-')) = chars.peek() {
        if ch == '-' {
            exponent.push('-');
        }
        chars.next();
    }
    let digits: String = chars.take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    exponent.push_str(&digits);
    Some(exponent)
}

/// Material category priced per quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    /// Engine oil, litres.
    Oil,
    /// Oil filters.
    OilFilter,
    /// Fuel filters.
    FuelFilter,
    /// Air filters.
    AirFilter,
    /// Antifreeze, litres.
    Antifreeze,
}

impl MaterialCategory {
    /// Every category in rollup order.
    pub const ALL: [Self; 5] = [
        Self::Oil,
        Self::OilFilter,
        Self::FuelFilter,
        Self::AirFilter,
        Self::Antifreeze,
    ];
}

/// Raw quantity and unit price of one material line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    /// Quantity as entered.
    pub quantity: String,
    /// Unit price as entered.
    pub unit_price: String,
}

impl MaterialLine {
    /// Creates a line from raw quantity and unit price text.
    #[must_use]
    pub fn new(quantity: impl Into<String>, unit_price: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }

    /// Returns `quantity × unit price`.
    #[must_use]
    pub fn sum(&self) -> Decimal {
        parse_amount(&self.quantity).saturating_mul(parse_amount(&self.unit_price))
    }
}

/// Leaf money inputs of a task, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyInputs {
    /// Engine oil line.
    pub oil: MaterialLine,
    /// Oil filter line.
    pub oil_filter: MaterialLine,
    /// Fuel filter line.
    pub fuel_filter: MaterialLine,
    /// Air filter line.
    pub air_filter: MaterialLine,
    /// Antifreeze line.
    pub antifreeze: MaterialLine,
    /// Other materials amount.
    pub other_materials: String,
    /// Transport expenses.
    pub transport: String,
    /// Per-diem expenses.
    pub per_diem: String,
    /// Lodging expenses.
    pub living: String,
    /// Other expenses.
    pub other_expenses: String,
    /// Gross client-facing service total.
    pub service_total: String,
    /// Non-billable internal job; the work price is the service total.
    pub internal_work: bool,
}

impl MoneyInputs {
    /// Returns the line for a material category.
    #[must_use]
    pub const fn line(&self, category: MaterialCategory) -> &MaterialLine {
        match category {
            MaterialCategory::Oil => &self.oil,
            MaterialCategory::OilFilter => &self.oil_filter,
            MaterialCategory::FuelFilter => &self.fuel_filter,
            MaterialCategory::AirFilter => &self.air_filter,
            MaterialCategory::Antifreeze => &self.antifreeze,
        }
    }

    /// Recomputes every derived sum from the leaf inputs.
    #[must_use]
    pub fn rollup(&self) -> MoneyRollup {
        let oil_total = self.oil.sum();
        let filter_sum = self.oil_filter.sum();
        let fuel_filter_sum = self.fuel_filter.sum();
        let air_filter_sum = self.air_filter.sum();
        let antifreeze_sum = self.antifreeze.sum();
        let service_total = parse_amount(&self.service_total);

        let deductions = [
            oil_total,
            filter_sum,
            fuel_filter_sum,
            air_filter_sum,
            antifreeze_sum,
            parse_amount(&self.other_materials),
            parse_amount(&self.per_diem),
            parse_amount(&self.living),
            parse_amount(&self.other_expenses),
            parse_amount(&self.transport),
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add);

        let work_price = if self.internal_work {
            service_total
        } else {
            service_total.saturating_sub(deductions)
        };

        MoneyRollup {
            oil_total,
            filter_sum,
            fuel_filter_sum,
            air_filter_sum,
            antifreeze_sum,
            deductions,
            service_total,
            work_price,
        }
    }
}

/// Sums derived from [`MoneyInputs`]; never accepted from callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRollup {
    /// Oil quantity × price.
    pub oil_total: Decimal,
    /// Oil filter quantity × price.
    pub filter_sum: Decimal,
    /// Fuel filter quantity × price.
    pub fuel_filter_sum: Decimal,
    /// Air filter quantity × price.
    pub air_filter_sum: Decimal,
    /// Antifreeze quantity × price.
    pub antifreeze_sum: Decimal,
    /// Materials and expenses deducted from the service total.
    pub deductions: Decimal,
    /// Parsed gross service total.
    pub service_total: Decimal,
    /// Net labour value of the task.
    pub work_price: Decimal,
}

impl MoneyRollup {
    /// Returns the derived sum of a material category.
    #[must_use]
    pub const fn category_sum(&self, category: MaterialCategory) -> Decimal {
        match category {
            MaterialCategory::Oil => self.oil_total,
            MaterialCategory::OilFilter => self.filter_sum,
            MaterialCategory::FuelFilter => self.fuel_filter_sum,
            MaterialCategory::AirFilter => self.air_filter_sum,
            MaterialCategory::Antifreeze => self.antifreeze_sum,
        }
    }
}
