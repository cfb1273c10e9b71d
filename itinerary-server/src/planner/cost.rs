//! Trip cost estimation.

use crate::domain::{AllowanceTable, BudgetTier, DayPlan, Money};

/// Estimate the total cost of a trip.
///
/// The total is the sum of ticket prices of every scheduled visit plus the
/// tier's daily allowance for each day of the trip. Days without any
/// visits still incur the allowance.
pub fn estimate(
    plans: &[DayPlan],
    tier: BudgetTier,
    days: u32,
    allowances: &AllowanceTable,
) -> Money {
    let tickets: Money = plans.iter().map(DayPlan::ticket_total).sum();
    tickets + allowances.daily_allowance(tier) * days
}
