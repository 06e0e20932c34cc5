//! End-to-end screening runs against in-memory market data

use std::sync::Arc;
use std::time::Duration;

use gapscreen::errors::ScreenError;
use gapscreen::models::screening::ScreeningCriteria;
use gapscreen::pipeline::{ScreenPipeline, ScreenRequest};
use gapscreen::services::market_data::RawBarTable;

use crate::test_utils::{
    gap_rows, keyed, rows_from_closes, static_pipeline, FailingProvider, SlowProvider, BENCHMARK,
};

fn request(symbols: &[&str]) -> ScreenRequest {
    ScreenRequest::new(symbols.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn trailing_return_over_thirty_sessions() {
    let pipeline = static_pipeline(keyed(vec![
        ("BBCA.JK", gap_rows(100.0, 103.0, 110.0, 6_000_000)),
        (BENCHMARK, rows_from_closes(&[7000.0, 7035.0], 0)),
    ]));

    let outcome = pipeline.run_screen(request(&["BBCA.JK"])).await.unwrap();

    assert_eq!(outcome.results.len(), 1);
    let ret = outcome.results[0].trailing_return_pct.unwrap();
    assert!((ret - 10.0).abs() < 1e-9);
    assert_eq!(outcome.benchmark.label(), "7,035.00 (+0.50%)");
}

#[tokio::test]
async fn small_open_gap_is_excluded() {
    let pipeline = static_pipeline(keyed(vec![(
        "TLKM.JK",
        gap_rows(100.0, 101.0, 104.0, 6_000_000),
    )]));

    let err = pipeline.run_screen(request(&["TLKM.JK"])).await.unwrap_err();
    assert!(matches!(err, ScreenError::NoResults));
}

#[tokio::test]
async fn empty_benchmark_does_not_block_screening() {
    let pipeline = static_pipeline(keyed(vec![
        ("BBCA.JK", gap_rows(100.0, 103.0, 110.0, 6_000_000)),
        (BENCHMARK, Vec::new()),
    ]));

    let outcome = pipeline.run_screen(request(&["BBCA.JK"])).await.unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert!(outcome.benchmark.latest_close.is_none());
    assert_eq!(outcome.benchmark.change_pct, 0.0);
    assert_eq!(outcome.benchmark.label(), "N/A");
}

#[tokio::test]
async fn empty_fetch_is_data_unavailable() {
    let pipeline = static_pipeline(RawBarTable::empty());

    let err = pipeline.run_screen(request(&["BBCA.JK"])).await.unwrap_err();
    assert!(matches!(err, ScreenError::DataUnavailable(_)));
}

#[tokio::test]
async fn one_passer_one_volume_failure() {
    let pipeline = static_pipeline(keyed(vec![
        ("PASS.JK", gap_rows(100.0, 103.0, 105.5, 6_000_000)),
        ("THIN.JK", gap_rows(100.0, 103.0, 120.0, 1_000_000)),
        (BENCHMARK, rows_from_closes(&[7000.0], 0)),
    ]));

    let outcome = pipeline
        .run_screen(request(&["PASS.JK", "THIN.JK"]))
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 1);
    let result = &outcome.results[0];
    assert_eq!(result.symbol, "PASS.JK");
    assert!((result.trailing_return_pct.unwrap() - 5.5).abs() < 1e-9);

    assert_eq!(outcome.diagnostics.requested, 2);
    assert_eq!(outcome.diagnostics.with_data, 2);
    assert_eq!(outcome.diagnostics.filtered, 1);
    assert_eq!(outcome.diagnostics.faults, 0);

    let charted: Vec<&str> = outcome.charts.keys().map(String::as_str).collect();
    assert_eq!(charted, vec!["PASS.JK"]);
}

#[tokio::test]
async fn results_ranked_by_trailing_return() {
    let pipeline = static_pipeline(keyed(vec![
        ("LOW.JK", gap_rows(100.0, 103.0, 102.0, 6_000_000)),
        ("HIGH.JK", gap_rows(100.0, 103.0, 130.0, 6_000_000)),
        ("MID.JK", gap_rows(100.0, 103.0, 115.0, 6_000_000)),
    ]));

    let outcome = pipeline
        .run_screen(request(&["LOW.JK", "HIGH.JK", "MID.JK"]))
        .await
        .unwrap();

    let ranked: Vec<&str> = outcome.results.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(ranked, vec!["HIGH.JK", "MID.JK", "LOW.JK"]);
    let charted: Vec<&str> = outcome.charts.keys().map(String::as_str).collect();
    assert_eq!(charted, ranked);
}

#[tokio::test]
async fn short_history_passer_is_left_out_of_ranking() {
    let mut short = rows_from_closes(&[100.0, 100.0, 100.0], 6_000_000);
    if let Some(last) = short.last_mut() {
        last.open = Some(105.0);
        last.high = Some(105.0);
    }

    let pipeline = static_pipeline(keyed(vec![
        ("NEW.JK", short),
        ("OLD.JK", gap_rows(100.0, 103.0, 110.0, 6_000_000)),
    ]));

    let outcome = pipeline
        .run_screen(request(&["NEW.JK", "OLD.JK"]))
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].symbol, "OLD.JK");
    assert_eq!(outcome.diagnostics.undefined_return, 1);
}

#[tokio::test]
async fn malformed_ticker_is_skipped() {
    let mut broken = gap_rows(100.0, 103.0, 110.0, 6_000_000);
    broken[3].close = Some(0.0);

    let pipeline = static_pipeline(keyed(vec![
        ("BROKEN.JK", broken),
        ("GOOD.JK", gap_rows(100.0, 103.0, 110.0, 6_000_000)),
    ]));

    let outcome = pipeline
        .run_screen(request(&["BROKEN.JK", "GOOD.JK"]))
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.diagnostics.faults, 1);
}

#[tokio::test]
async fn tickers_are_cleaned_before_fetching() {
    let pipeline = static_pipeline(keyed(vec![(
        "BBCA.JK",
        gap_rows(100.0, 103.0, 110.0, 6_000_000),
    )]));

    let outcome = pipeline
        .run_screen(request(&[" bbca.jk", "BBCA.JK", ""]))
        .await
        .unwrap();

    assert_eq!(outcome.diagnostics.requested, 1);
    assert_eq!(outcome.results[0].symbol, "BBCA.JK");
}

#[tokio::test]
async fn empty_ticker_list_is_invalid_input() {
    let pipeline = static_pipeline(RawBarTable::empty());

    let err = pipeline.run_screen(request(&[" ", ""])).await.unwrap_err();
    assert!(matches!(err, ScreenError::InvalidInput(_)));
}

#[tokio::test]
async fn invalid_criteria_is_invalid_input() {
    let pipeline = static_pipeline(RawBarTable::empty());
    let criteria = ScreeningCriteria {
        min_open_ratio: -1.0,
        ..ScreeningCriteria::default()
    };

    let err = pipeline
        .run_screen(request(&["BBCA.JK"]).with_criteria(criteria))
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenError::InvalidInput(_)));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let pipeline = ScreenPipeline::new(Arc::new(SlowProvider {
        delay: Duration::from_secs(5),
    }))
    .with_fetch_timeout(Duration::from_millis(50));

    let err = pipeline.run_screen(request(&["BBCA.JK"])).await.unwrap_err();
    match err {
        ScreenError::DataUnavailable(reason) => assert!(reason.contains("timed out")),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn provider_failure_is_data_unavailable() {
    let pipeline = ScreenPipeline::new(Arc::new(FailingProvider));

    let err = pipeline.run_screen(request(&["BBCA.JK"])).await.unwrap_err();
    assert!(matches!(err, ScreenError::DataUnavailable(_)));
    assert_eq!(err.kind(), "data_unavailable");
}

#[tokio::test]
async fn pooled_pipeline_matches_sequential() {
    let table = || {
        keyed(vec![
            ("A.JK", gap_rows(100.0, 103.0, 111.0, 6_000_000)),
            ("B.JK", gap_rows(100.0, 103.0, 107.0, 6_000_000)),
            ("C.JK", gap_rows(100.0, 103.0, 119.0, 6_000_000)),
            ("D.JK", gap_rows(100.0, 100.5, 125.0, 6_000_000)),
        ])
    };
    let symbols = ["A.JK", "B.JK", "C.JK", "D.JK"];

    let sequential = static_pipeline(table()).run_screen(request(&symbols)).await.unwrap();
    let pooled = static_pipeline(table())
        .with_workers(3)
        .run_screen(request(&symbols))
        .await
        .unwrap();

    assert_eq!(sequential.results, pooled.results);
    assert_eq!(pooled.diagnostics.filtered, 1);
}

#[tokio::test]
async fn zero_close_benchmark_is_reported_unavailable() {
    let pipeline = static_pipeline(keyed(vec![
        ("BBCA.JK", gap_rows(100.0, 103.0, 110.0, 6_000_000)),
        (BENCHMARK, rows_from_closes(&[0.0, 7035.0], 0)),
    ]));

    let outcome = pipeline.run_screen(request(&["BBCA.JK"])).await.unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert!(outcome.benchmark.latest_close.is_none());
    assert_eq!(outcome.benchmark.label(), "N/A");
}

#[tokio::test(flavor = "current_thread")]
async fn concurrent_runs_share_one_pipeline() {
    let pipeline = Arc::new(
        static_pipeline(keyed(vec![
            ("A.JK", gap_rows(100.0, 103.0, 111.0, 6_000_000)),
            ("B.JK", gap_rows(100.0, 103.0, 107.0, 6_000_000)),
        ]))
        .with_workers(2),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.run_screen(request(&["A.JK", "B.JK"])).await })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        let symbols: Vec<_> = outcome.results.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A.JK", "B.JK"]);
    }
}
