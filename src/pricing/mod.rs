//! Pricing engine.
//!
//! Maps a selection set and a pricing table to a quote:
//! base price for the project type, plus a per-page charge beyond the
//! included pages, scaled by the design-tier multiplier, then widened into
//! a ±10% range.
//!
//! Unknown project types and design tiers never reject a quote. They price
//! with [`FALLBACK_BASE_PRICE`] and [`FALLBACK_MULTIPLIER`] so the visitor
//! always sees a number.

pub mod table;

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::types::{PriceQuote, SelectionSet, INCLUDED_PAGES};
pub use table::{PricingTable, MAX_TABLE_AMOUNT};

/// Base price used when the project type is not in the catalogue.
pub const FALLBACK_BASE_PRICE: Decimal = dec!(1000);

/// Multiplier used when the design tier is not in the catalogue.
pub const FALLBACK_MULTIPLIER: Decimal = dec!(1);

/// Lower edge of the quoted range, as a fraction of the estimate.
pub const RANGE_LOW: Decimal = dec!(0.9);

/// Upper edge of the quoted range, as a fraction of the estimate.
pub const RANGE_HIGH: Decimal = dec!(1.1);

/// Largest estimate a quote will show. Estimates beyond it (absurd page
/// counts, or a table built without [`PricingTable::validate`]) are clamped.
pub const QUOTE_CEILING: Decimal = dec!(1000000000000000000);

/// Compute the price quote for a selection.
///
/// The range bounds are derived from the unrounded estimate; all three
/// values are rounded to whole units, half away from zero. Never panics:
/// arithmetic is checked and the estimate is clamped to [`QUOTE_CEILING`].
pub fn compute_quote(selection: &SelectionSet, table: &PricingTable) -> PriceQuote {
    let base = selection
        .project_type()
        .map(|t| table.base_price_for(t))
        .unwrap_or(FALLBACK_BASE_PRICE);

    // Unparseable page counts price as the included pages
    let pages = selection.pages().unwrap_or(INCLUDED_PAGES);
    let extra_pages = Decimal::from(pages.saturating_sub(INCLUDED_PAGES));

    let multiplier = selection
        .design_tier()
        .map(|t| table.multiplier_for(t))
        .unwrap_or(FALLBACK_MULTIPLIER);

    let estimate = extra_pages
        .checked_mul(table.per_page_rate)
        .and_then(|pages_cost| pages_cost.checked_add(base))
        .and_then(|subtotal| subtotal.checked_mul(multiplier))
        .filter(|estimate| *estimate <= QUOTE_CEILING)
        .unwrap_or_else(|| {
            warn!(
                pages,
                %base,
                %multiplier,
                ceiling = %QUOTE_CEILING,
                "Estimate out of range, clamping"
            );
            QUOTE_CEILING
        });

    let quote = PriceQuote {
        min: round_whole(estimate * RANGE_LOW),
        max: round_whole(estimate * RANGE_HIGH),
        total: round_whole(estimate),
    };

    debug!(
        project_type = %selection.project_type,
        design_tier = %selection.design_tier,
        pages,
        %base,
        %extra_pages,
        %multiplier,
        total = %quote.total,
        "Quote computed"
    );

    quote
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
