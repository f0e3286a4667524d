//! Receipt

use std::io;

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

use crate::{
    items::LineItem,
    prices::{Price, php},
    shipping::ShippingCharge,
};

/// Priced totals for a cart, ready for the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    subtotal: Price,
    amount_discount: Price,
    percent_discount: Price,
    adjusted: Price,
    shipping: ShippingCharge,
    total: Price,
}

impl Receipt {
    /// Creates a receipt from already-derived totals.
    #[must_use]
    pub fn new(
        subtotal: Price,
        amount_discount: Price,
        percent_discount: Price,
        adjusted: Price,
        shipping: ShippingCharge,
        total: Price,
    ) -> Self {
        Self {
            subtotal,
            amount_discount,
            percent_discount,
            adjusted,
            shipping,
            total,
        }
    }

    /// Total cost before any discounts or shipping.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Flat promotional discount taken off the subtotal.
    #[must_use]
    pub fn amount_discount(&self) -> Price {
        self.amount_discount
    }

    /// Percentage promotional discount taken off the remainder.
    #[must_use]
    pub fn percent_discount(&self) -> Price {
        self.percent_discount
    }

    /// Subtotal net of both discounts.
    #[must_use]
    pub fn adjusted(&self) -> Price {
        self.adjusted
    }

    /// Resolved shipping charge.
    #[must_use]
    pub fn shipping(&self) -> ShippingCharge {
        self.shipping
    }

    /// Amount payable: adjusted total plus shipping.
    #[must_use]
    pub fn total(&self) -> Price {
        self.total
    }

    /// Total promotional savings on this receipt.
    #[must_use]
    pub fn savings(&self) -> Price {
        Price::new((*self.amount_discount).saturating_add(*self.percent_discount))
    }

    /// Renders the order-summary table followed by the totals block.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the output sink cannot be written.
    pub fn write_to(&self, mut out: impl io::Write, cart: &[LineItem]) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["ITEM", "PRICE", "QUANTITY", "TOTAL"]);

        for line in cart {
            let line_total = (*line.price()).saturating_mul(i64::from(line.qty()));

            builder.push_record([
                format!("{} | {}", line.name(), line.size().label()),
                php(*line.price()).to_string(),
                line.qty().to_string(),
                php(line_total).to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;

        for (label, value) in self.summary_lines() {
            writeln!(out, "{label:>10}  {value:>14}")?;
        }

        Ok(())
    }

    fn summary_lines(&self) -> SmallVec<[(&'static str, String); 4]> {
        let mut lines: SmallVec<[(&'static str, String); 4]> = SmallVec::new();

        lines.push(("Subtotal", self.subtotal.to_money().to_string()));

        if *self.savings() > 0 {
            lines.push(("Discount", format!("-{}", self.savings().to_money())));
        }

        let shipping = match self.shipping {
            ShippingCharge::Unset => "N/A".to_string(),
            ShippingCharge::Free => "FREE".to_string(),
            ShippingCharge::Tier(tier) if *tier.price() == 0 => "FREE".to_string(),
            ShippingCharge::Tier(tier) => tier.price().to_money().to_string(),
        };
        lines.push(("Shipping", shipping));

        lines.push(("Total", self.total.to_money().to_string()));

        lines
    }
}
