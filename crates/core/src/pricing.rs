//! Pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::Cart, cities::City, rates::ExchangeRate};

/// Customer-facing totals for one checkout attempt against one city.
///
/// Derived values only; nothing here is cached, so recomputing after any
/// cart or rate change always reflects current state. Amounts are exact
/// decimals; rounding and thousands separators are presentation concerns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    /// Cart subtotal in USD.
    pub subtotal_usd: Decimal,

    /// Cart subtotal converted to IQD at the supplied rate.
    pub subtotal_iqd: Decimal,

    /// Delivery fee in IQD for the destination city.
    pub delivery_fee_iqd: u32,

    /// Grand total in IQD, delivery included.
    pub grand_total_iqd: Decimal,
}

/// Derives all checkout totals from the cart, destination city and the
/// exchange rate current at the moment of the call.
#[must_use]
pub fn checkout_totals(cart: &Cart, city: City, rate: ExchangeRate) -> CheckoutTotals {
    let subtotal_usd = cart.subtotal();
    let subtotal_iqd = rate.convert(subtotal_usd);
    let delivery_fee_iqd = city.delivery_fee();
    let grand_total_iqd = subtotal_iqd + Decimal::from(delivery_fee_iqd);

    CheckoutTotals {
        subtotal_usd,
        subtotal_iqd,
        delivery_fee_iqd,
        grand_total_iqd,
    }
}

/// Formats an IQD amount with thousands separators, e.g. `33,000`.
#[must_use]
pub fn format_iqd(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::{Product, ProductId};

    use super::*;

    fn cart_with(entries: &[(i64, Decimal, u32)]) -> Cart {
        let mut cart = Cart::new();

        for &(id, unit_price, quantity) in entries {
            let product = Product {
                id: ProductId::new(id),
                name: format!("Product {id}"),
                unit_price,
                image_url: String::new(),
                category: String::new(),
            };

            for _ in 0..quantity {
                cart.add(&product);
            }
        }

        cart
    }

    #[test]
    fn erbil_checkout_scenario() -> TestResult {
        // Two units at $10.00, rate 1500, delivered to Erbil.
        let cart = cart_with(&[(1, Decimal::new(1_000, 2), 2)]);
        let rate = ExchangeRate::new(Decimal::new(1_500, 0))?;

        let totals = checkout_totals(&cart, City::Erbil, rate);

        assert_eq!(totals.subtotal_usd, Decimal::new(2_000, 2));
        assert_eq!(totals.subtotal_iqd, Decimal::new(30_000, 0));
        assert_eq!(totals.delivery_fee_iqd, 3_000);
        assert_eq!(totals.grand_total_iqd, Decimal::new(33_000, 0));

        Ok(())
    }

    #[test]
    fn empty_cart_totals_are_delivery_only() -> TestResult {
        let rate = ExchangeRate::new(Decimal::new(1_500, 0))?;

        let totals = checkout_totals(&Cart::new(), City::Baghdad, rate);

        assert_eq!(totals.subtotal_usd, Decimal::ZERO);
        assert_eq!(totals.subtotal_iqd, Decimal::ZERO);
        assert_eq!(totals.grand_total_iqd, Decimal::new(5_000, 0));

        Ok(())
    }

    #[test]
    fn fractional_prices_convert_exactly() -> TestResult {
        // 3 units at $2.50 = $7.50; at 1450 that is exactly 10875 IQD.
        let cart = cart_with(&[(1, Decimal::new(250, 2), 3)]);
        let rate = ExchangeRate::new(Decimal::new(1_450, 0))?;

        let totals = checkout_totals(&cart, City::Duhok, rate);

        assert_eq!(totals.subtotal_iqd, Decimal::new(10_875, 0));
        assert_eq!(totals.grand_total_iqd, Decimal::new(14_875, 0));

        Ok(())
    }

    #[test]
    fn format_iqd_groups_thousands() {
        assert_eq!(format_iqd(Decimal::new(33_000, 0)), "33,000");
        assert_eq!(format_iqd(Decimal::new(1_234_567, 0)), "1,234,567");
        assert_eq!(format_iqd(Decimal::new(999, 0)), "999");
        assert_eq!(format_iqd(Decimal::ZERO), "0");
    }
}
