//! Read-side views over the trip's plan items.

use plan_items::domain::{BudgetCategoryType, ItemCategory, PlanItem, TripPlanItemType};
use std::collections::BTreeMap;
use time::{Date, UtcOffset};

use super::state::Panel;

/// Distinct planned days, ascending.
pub fn trip_days(items: &[PlanItem], offset: UtcOffset) -> Vec<Date> {
    let mut days: Vec<Date> = items.iter().filter_map(|item| item.day_date(offset)).collect();
    days.sort();
    days.dedup();
    days
}

fn by_start(a: &&PlanItem, b: &&PlanItem) -> std::cmp::Ordering {
    a.start_at
        .cmp(&b.start_at)
        .then_with(|| a.title.cmp(&b.title))
}

/// Items listed by a panel. The daily plan shows `day` only; the budget
/// lists everything that carries a cost.
pub fn panel_items<'a>(
    items: &'a [PlanItem],
    panel: Panel,
    day: Option<Date>,
    offset: UtcOffset,
) -> Vec<&'a PlanItem> {
    let mut listed: Vec<&PlanItem> = items
        .iter()
        .filter(|item| match panel {
            Panel::Summary => false,
            Panel::Accommodations => item.item_type == TripPlanItemType::Accommodation,
            Panel::Transport => item.category() == ItemCategory::Transport,
            Panel::DailyPlan => day.is_some() && item.day_date(offset) == day,
            Panel::Budget => item.cost.is_some(),
        })
        .collect();
    listed.sort_by(by_start);
    listed
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSlice {
    pub category: BudgetCategoryType,
    pub total: f64,
    /// 0.0–100.0 of the currency's total
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyBudget {
    pub currency: String,
    pub total: f64,
    pub slices: Vec<BudgetSlice>,
}

/// Costs grouped per currency, then per budget category. Items without an
/// explicit category count under their type's default.
pub fn budget_breakdown(items: &[PlanItem]) -> Vec<CurrencyBudget> {
    let mut sums: BTreeMap<&str, BTreeMap<BudgetCategoryType, f64>> = BTreeMap::new();
    for item in items {
        let Some(cost) = item.cost else { continue };
        *sums
            .entry(item.currency.as_str())
            .or_default()
            .entry(item.effective_budget_category())
            .or_default() += cost;
    }

    sums.into_iter()
        .map(|(currency, categories)| {
            let total: f64 = categories.values().sum();
            let slices = categories
                .into_iter()
                .filter(|(_, sum)| *sum > 0.0)
                .map(|(category, sum)| BudgetSlice {
                    category,
                    total: sum,
                    percentage: if total > 0.0 { sum / total * 100.0 } else { 0.0 },
                })
                .collect();
            CurrencyBudget {
                currency: currency.to_string(),
                total,
                slices,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripSummary {
    pub item_count: usize,
    pub first_day: Option<Date>,
    pub last_day: Option<Date>,
    pub accommodations: usize,
    pub nights: i64,
    pub transport_legs: usize,
    pub activities: usize,
    pub expenses: usize,
    pub totals: Vec<(String, f64)>,
}

pub fn summarize(items: &[PlanItem], offset: UtcOffset) -> TripSummary {
    let days = trip_days(items, offset);
    let count = |category: ItemCategory| items.iter().filter(|i| i.category() == category).count();
    let nights = items
        .iter()
        .filter_map(|item| item.accommodation_details.as_ref())
        .filter_map(|details| details.nights)
        .filter(|nights| *nights > 0)
        .sum();

    TripSummary {
        item_count: items.len(),
        first_day: days.first().copied(),
        last_day: days.last().copied(),
        accommodations: count(ItemCategory::Accommodation),
        nights,
        transport_legs: count(ItemCategory::Transport),
        activities: count(ItemCategory::Activity),
        expenses: count(ItemCategory::Expense),
        totals: budget_breakdown(items)
            .into_iter()
            .map(|budget| (budget.currency, budget.total))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn item(json: &str) -> PlanItem {
        serde_json::from_str(json).unwrap()
    }

    fn sample() -> Vec<PlanItem> {
        vec![
            item(
                r#"{"id": "1", "type": "museum", "title": "Gulbenkian", "cost": 10,
                    "day": "2025-07-02T00:00:00.000Z", "startAt": "2025-07-02T15:00:00.000Z"}"#,
            ),
            item(
                r#"{"id": "2", "type": "restaurant", "title": "Ramiro", "cost": 40,
                    "startAt": "2025-07-02T12:00:00.000Z"}"#,
            ),
            item(
                r#"{"id": "3", "type": "accommodation", "title": "Casa", "cost": 240,
                    "day": "2025-07-01T00:00:00.000Z",
                    "accommodationDetails": {"nights": 2, "guests": 0}}"#,
            ),
            item(
                r#"{"id": "4", "type": "expense", "title": "Seguro", "cost": 30,
                    "currency": "USD", "budgetCategory": "other"}"#,
            ),
            item(r#"{"id": "5", "type": "transport_local", "title": "Metro"}"#),
        ]
    }

    #[test]
    fn days_are_sorted_and_unique() {
        assert_eq!(
            trip_days(&sample(), UtcOffset::UTC),
            vec![date!(2025 - 07 - 01), date!(2025 - 07 - 02)]
        );
    }

    #[test]
    fn undated_items_land_on_their_local_day() {
        let items = vec![item(
            r#"{"id": "9", "type": "show", "title": "Fado", "startAt": "2025-07-02T23:30:00.000Z"}"#,
        )];
        let lisbon_summer = time::macros::offset!(+1);
        assert_eq!(trip_days(&items, lisbon_summer), vec![date!(2025 - 07 - 03)]);
        assert_eq!(
            panel_items(&items, Panel::DailyPlan, Some(date!(2025 - 07 - 03)), lisbon_summer).len(),
            1
        );
    }

    #[test]
    fn daily_plan_orders_by_start() {
        let items = sample();
        let titles: Vec<&str> = panel_items(&items, Panel::DailyPlan, Some(date!(2025 - 07 - 02)), UtcOffset::UTC)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, ["Ramiro", "Gulbenkian"]);
        assert!(panel_items(&items, Panel::DailyPlan, None, UtcOffset::UTC).is_empty());
    }

    #[test]
    fn budget_groups_by_currency_and_default_category() {
        let budgets = budget_breakdown(&sample());
        assert_eq!(budgets.len(), 2);

        let eur = &budgets[0];
        assert_eq!(eur.currency, "EUR");
        assert_eq!(eur.total, 290.0);
        let categories: Vec<BudgetCategoryType> = eur.slices.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            [
                BudgetCategoryType::Accommodation,
                BudgetCategoryType::Food,
                BudgetCategoryType::Activities
            ]
        );
        let share: f64 = eur.slices.iter().map(|s| s.percentage).sum();
        assert!((share - 100.0).abs() < 1e-9);

        assert_eq!(budgets[1].currency, "USD");
        assert_eq!(budgets[1].slices[0].category, BudgetCategoryType::Other);
    }

    #[test]
    fn summary_counts() {
        let summary = summarize(&sample(), UtcOffset::UTC);
        assert_eq!(summary.item_count, 5);
        assert_eq!(summary.first_day, Some(date!(2025 - 07 - 01)));
        assert_eq!(summary.nights, 2);
        assert_eq!(summary.accommodations, 1);
        assert_eq!(summary.transport_legs, 1);
        assert_eq!(summary.activities, 2);
        assert_eq!(summary.expenses, 1);
        assert_eq!(
            summary.totals,
            vec![("EUR".to_string(), 290.0), ("USD".to_string(), 30.0)]
        );
    }
}
