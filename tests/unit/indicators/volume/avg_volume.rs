//! Unit tests for rolling average volume

use chrono::{Duration, NaiveDate};
use gapscreen::indicators::volume::calculate_avg_volume_series;
use gapscreen::models::bar::Bar;

fn bars_from_volumes(volumes: &[u64]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    volumes
        .iter()
        .enumerate()
        .map(|(i, &v)| Bar::new(start + Duration::days(i as i64), 10.0, 10.0, 10.0, 10.0, v))
        .collect()
}

#[test]
fn test_avg_volume_rolling_window() {
    let bars = bars_from_volumes(&[100, 200, 300]);
    let series = calculate_avg_volume_series(&bars, 2);
    assert_eq!(series, vec![None, Some(150.0), Some(250.0)]);
}

#[test]
fn test_avg_volume_counts_zero_volume_days() {
    let bars = bars_from_volumes(&[0, 0, 300]);
    let series = calculate_avg_volume_series(&bars, 3);
    assert_eq!(series[2], Some(100.0));
}

#[test]
fn test_avg_volume_window_longer_than_series() {
    let bars = bars_from_volumes(&[1, 2, 3]);
    assert!(calculate_avg_volume_series(&bars, 20).iter().all(Option::is_none));
}
