use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::trading_model::{Confidence, FlashLoanOpportunity, Opportunity};
use crate::constants::{
    FLASH_LOAN_AMOUNT_USD, FLASH_LOAN_MIN_COMBINED_SPREAD, FLASH_LOAN_MIN_LEG_SPREAD,
};

/// Pair up same-pair opportunities whose legs are each wide enough and
/// whose combined spread clears the flash-loan threshold.
///
/// Each unordered pair of opportunities appears at most once.
pub fn find_flash_loan_opportunities(
    opportunities: &[Opportunity],
    now: DateTime<Utc>,
) -> Vec<FlashLoanOpportunity> {
    let legs: Vec<&Opportunity> = opportunities
        .iter()
        .filter(|o| o.profit_potential > FLASH_LOAN_MIN_LEG_SPREAD)
        .collect();

    let mut found = Vec::new();
    for (i, first) in legs.iter().enumerate() {
        for second in &legs[i + 1..] {
            if first.token_pair != second.token_pair {
                continue;
            }
            let combined = first.profit_potential + second.profit_potential;
            if combined <= FLASH_LOAN_MIN_COMBINED_SPREAD {
                continue;
            }
            found.push(FlashLoanOpportunity {
                id: format!("flash_{}", Uuid::new_v4().simple()),
                token_pair: first.token_pair.clone(),
                combined_profit: combined,
                estimated_profit: combined * FLASH_LOAN_AMOUNT_USD,
                loan_amount: FLASH_LOAN_AMOUNT_USD,
                opportunities: vec![first.id.clone(), second.id.clone()],
                confidence: Confidence::High,
                created_at: now,
            });
        }
    }
    found
}
