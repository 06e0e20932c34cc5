//! Unit tests for RSI indicator

use chrono::{Duration, NaiveDate};
use gapscreen::indicators::momentum::{calculate_rsi, calculate_rsi_series};
use gapscreen::models::bar::Bar;

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c, c, c, 1_000))
        .collect()
}

#[test]
fn test_rsi_needs_period_plus_one_bars() {
    let bars = bars_from_closes(&(0..14).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
    assert!(calculate_rsi(&bars, 14).is_none());

    let bars = bars_from_closes(&(0..15).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
    assert!(calculate_rsi(&bars, 14).is_some());
}

#[test]
fn test_rsi_series_warmup_is_none() {
    let bars = bars_from_closes(&[10.0, 11.0, 10.0, 12.0]);
    let series = calculate_rsi_series(&bars, 2);
    assert_eq!(series.len(), 4);
    assert!(series[0].is_none());
    assert!(series[1].is_none());
    assert!(series[2].is_some());
}

#[test]
fn test_rsi_balanced_moves_is_fifty() {
    let bars = bars_from_closes(&[10.0, 11.0, 10.0]);
    let rsi = calculate_rsi(&bars, 2).unwrap();
    assert!((rsi - 50.0).abs() < 1e-9);
}

#[test]
fn test_rsi_known_value() {
    // gains [2, 0], losses [0, 1] -> RS = 2
    let bars = bars_from_closes(&[10.0, 12.0, 11.0]);
    let rsi = calculate_rsi(&bars, 2).unwrap();
    assert!((rsi - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_rsi_only_gains_saturates_at_100() {
    let bars = bars_from_closes(&(0..20).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
    assert_eq!(calculate_rsi(&bars, 14), Some(100.0));
}

#[test]
fn test_rsi_only_losses_is_zero() {
    let bars = bars_from_closes(&(0..20).map(|i| 200.0 - i as f64).collect::<Vec<_>>());
    let rsi = calculate_rsi(&bars, 14).unwrap();
    assert!(rsi.abs() < 1e-9);
}

#[test]
fn test_rsi_flat_window_is_undefined() {
    let bars = bars_from_closes(&[100.0; 20]);
    assert!(calculate_rsi(&bars, 14).is_none());
    assert!(calculate_rsi_series(&bars, 14).iter().all(Option::is_none));
}

#[test]
fn test_rsi_zero_period() {
    let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
    assert!(calculate_rsi_series(&bars, 0).iter().all(Option::is_none));
}

#[test]
fn test_rsi_stays_in_range() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0)
        .collect();
    let bars = bars_from_closes(&closes);
    for value in calculate_rsi_series(&bars, 14).into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
    }
}
