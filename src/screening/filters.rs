//! Hard filters evaluated on the latest bar.

use serde::Serialize;

use crate::models::bar::Bar;
use crate::models::screening::ScreeningCriteria;

/// Result of each hard filter for one ticker. All must pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub open_ratio_ok: bool,
    pub min_price_ok: bool,
    pub min_volume_ok: bool,
}

impl FilterOutcome {
    pub fn passed(&self) -> bool {
        self.open_ratio_ok && self.min_price_ok && self.min_volume_ok
    }
}

/// Open gap vs `previous` close, minimum close price and minimum share volume.
pub fn evaluate_filters(latest: &Bar, previous: &Bar, criteria: &ScreeningCriteria) -> FilterOutcome {
    FilterOutcome {
        open_ratio_ok: latest.open > criteria.min_open_ratio * previous.close,
        min_price_ok: latest.close >= criteria.min_price,
        min_volume_ok: latest.volume > criteria.min_volume_shares,
    }
}
