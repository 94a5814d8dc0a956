//! Condition evaluation over stock records: every condition must hold, and a
//! metric missing from the source never matches.

use crate::domain::condition::Condition;
use crate::domain::stock::Stock;

pub fn evaluate(condition: &Condition, stock: &Stock) -> bool {
    match stock.metric(condition.field) {
        Some(actual) => condition.operator.apply(actual, condition.value),
        None => false,
    }
}

pub fn matches_all(conditions: &[Condition], stock: &Stock) -> bool {
    conditions.iter().all(|c| evaluate(c, stock))
}

pub fn filter_stocks<'a>(stocks: &'a [Stock], conditions: &[Condition]) -> Vec<&'a Stock> {
    stocks
        .iter()
        .filter(|stock| matches_all(conditions, stock))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::condition::Operator;
    use crate::domain::stock::Metric;

    fn stocks() -> Vec<Stock> {
        vec![
            Stock::new("A")
                .with(Metric::Roe, 20.0)
                .with(Metric::PeRatio, 10.0),
            Stock::new("B")
                .with(Metric::Roe, 10.0)
                .with(Metric::PeRatio, 25.0),
            Stock::new("C")
                .with(Metric::Roe, 15.0)
                .with(Metric::PeRatio, 18.0),
        ]
    }

    fn tickers(rows: &[&Stock]) -> Vec<String> {
        rows.iter().map(|s| s.ticker.clone()).collect()
    }

    #[test]
    fn empty_conditions_keep_everything_in_order() {
        let data = stocks();
        let result = filter_stocks(&data, &[]);
        assert_eq!(tickers(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_record_set() {
        let conditions = [Condition::new(Metric::Roe, Operator::GreaterThan, 0.0)];
        assert!(filter_stocks(&[], &conditions).is_empty());
    }

    #[test]
    fn single_condition() {
        let data = stocks();
        let conditions = [Condition::new(Metric::Roe, Operator::GreaterThan, 15.0)];
        assert_eq!(tickers(&filter_stocks(&data, &conditions)), vec!["A"]);
    }

    #[test]
    fn all_conditions_must_hold() {
        let data = stocks();
        let conditions = [
            Condition::new(Metric::Roe, Operator::GreaterThan, 12.0),
            Condition::new(Metric::PeRatio, Operator::LessThan, 20.0),
        ];
        assert_eq!(tickers(&filter_stocks(&data, &conditions)), vec!["A", "C"]);
    }

    #[test]
    fn condition_order_does_not_matter() {
        let data = stocks();
        let forward = [
            Condition::new(Metric::Roe, Operator::GreaterThan, 12.0),
            Condition::new(Metric::PeRatio, Operator::LessThan, 15.0),
        ];
        let reversed = [forward[1], forward[0]];
        assert_eq!(
            filter_stocks(&data, &forward),
            filter_stocks(&data, &reversed)
        );
    }

    #[test]
    fn equality_is_exact() {
        let data = vec![
            Stock::new("EXACT").with(Metric::Roe, 15.0),
            Stock::new("NEAR").with(Metric::Roe, 15.01),
        ];
        let conditions = [Condition::new(Metric::Roe, Operator::Equal, 15.0)];
        assert_eq!(tickers(&filter_stocks(&data, &conditions)), vec!["EXACT"]);
    }

    #[test]
    fn missing_metric_never_matches() {
        let stock = Stock::new("X");
        for op in [Operator::GreaterThan, Operator::LessThan, Operator::Equal] {
            assert!(!evaluate(&Condition::new(Metric::Roe, op, 0.0), &stock));
        }
    }

    #[test]
    fn nan_metric_never_matches() {
        let stock = Stock::new("X").with(Metric::Roe, f64::NAN);
        assert!(!evaluate(
            &Condition::new(Metric::Roe, Operator::LessThan, 100.0),
            &stock
        ));
    }

    #[test]
    fn no_matches_is_empty() {
        let data = stocks();
        let conditions = [Condition::new(Metric::Roe, Operator::GreaterThan, 100.0)];
        assert!(filter_stocks(&data, &conditions).is_empty());
    }
}
