// workorder-generation-service/src/calc.rs
//
// Financial arithmetic for work-order lines. Pure functions; callers
// own validation, negative inputs propagate through the same formula.

use crate::models::{OrderTotals, ServiceLine};

/// Payable total of a single line. The evaluation order is fixed:
/// discount applies to the base amount, VAT applies to the discounted
/// amount.
pub fn line_total(quantity: f64, unit_price: f64, discount_percent: f64, vat_percent: f64) -> f64 {
    let base = quantity * unit_price;
    let discount_amount = base * discount_percent / 100.0;
    let after_discount = base - discount_amount;
    let vat_amount = after_discount * vat_percent / 100.0;
    after_discount + vat_amount
}

/// Order-level aggregates over a line list. `subtotal` and `discount`
/// are pre-tax; `total` sums the already-discounted-and-taxed line
/// totals, so VAT shows up only in `total`.
pub fn order_totals(lines: &[ServiceLine]) -> OrderTotals {
    let subtotal = lines.iter().map(|l| l.quantity * l.unit_price).sum();
    let discount = lines
        .iter()
        .map(|l| l.quantity * l.unit_price * l.discount_percent / 100.0)
        .sum();
    let total = lines.iter().map(|l| l.total).sum();

    OrderTotals {
        subtotal,
        discount,
        total,
    }
}
