//! End-to-end poll pass tests

use crate::common::{monitor_with, RecordingSink, ScriptedSource};
use pricewatch::alert::NotificationEvent;
use pricewatch::monitor::TickOutcome;
use pricewatch::subscriber::{ConfigCommand, SubscriberId, TargetSide};
use rust_decimal_macros::dec;
use std::sync::Arc;

#[tokio::test]
async fn test_change_signal_between_polls() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![Some(dec!(1.00)), Some(dec!(1.06))]),
        sink.clone(),
    );
    monitor.register_subscriber(SubscriberId(1)).await;

    monitor.on_tick().await;
    assert!(sink.take().is_empty());

    monitor.on_tick().await;
    let events = sink.take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        NotificationEvent::ChangeSignal {
            subscriber,
            change_percent,
            observation,
        } => {
            assert_eq!(*subscriber, SubscriberId(1));
            assert_eq!(*change_percent, dec!(6.0));
            assert_eq!(observation.price, dec!(1.06));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn test_per_subscriber_thresholds() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![Some(dec!(100)), Some(dec!(107))]),
        sink.clone(),
    );
    monitor.register_subscriber(SubscriberId(1)).await;
    monitor
        .apply_command(SubscriberId(2), &ConfigCommand::SetThreshold(10))
        .await
        .unwrap();

    monitor.on_tick().await;
    monitor.on_tick().await;

    let recipients: Vec<_> = sink.take().iter().map(|e| e.subscriber()).collect();
    assert_eq!(recipients, vec![SubscriberId(1)]);
}

#[tokio::test]
async fn test_max_target_latch_across_passes() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![
            Some(dec!(0.20)),
            Some(dec!(0.19)),
            Some(dec!(0.18)),
            Some(dec!(0.20)),
        ]),
        sink.clone(),
    );
    let id = SubscriberId(7);
    monitor
        .apply_command(id, &ConfigCommand::SetThreshold(100))
        .await
        .unwrap();
    monitor
        .apply_command(
            id,
            &ConfigCommand::SetTarget {
                side: TargetSide::Max,
                price: dec!(0.20),
            },
        )
        .await
        .unwrap();

    monitor.on_tick().await;
    assert_eq!(sink.take().len(), 1);
    assert!(monitor.store().get(id).await.unwrap().max_triggered);

    monitor.on_tick().await;
    assert!(sink.take().is_empty());
    assert!(monitor.store().get(id).await.unwrap().max_triggered);

    monitor.on_tick().await;
    assert!(sink.take().is_empty());
    assert!(!monitor.store().get(id).await.unwrap().max_triggered);

    monitor.on_tick().await;
    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), "target_max");
}

#[tokio::test]
async fn test_both_providers_down_skips_cycle() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![Some(dec!(1.0)), None, Some(dec!(2.0))]),
        sink.clone(),
    );
    monitor.register_subscriber(SubscriberId(1)).await;

    monitor.on_tick().await;
    assert_eq!(monitor.on_tick().await, TickOutcome::SourceUnavailable);
    assert_eq!(monitor.history().last_price().await, Some(dec!(1.0)));
    assert!(sink.take().is_empty());

    // The next successful pass still compares against the last committed price
    match monitor.on_tick().await {
        TickOutcome::Completed(summary) => {
            assert_eq!(summary.previous_price, Some(dec!(1.0)));
            assert_eq!(summary.events, 1);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn test_delivery_failure_keeps_latch() {
    let sink = Arc::new(RecordingSink::failing());
    let monitor = monitor_with(
        ScriptedSource::new(vec![Some(dec!(0.5)), Some(dec!(0.5))]),
        sink.clone(),
    );
    let id = SubscriberId(3);
    monitor
        .apply_command(
            id,
            &ConfigCommand::SetTarget {
                side: TargetSide::Min,
                price: dec!(0.6),
            },
        )
        .await
        .unwrap();

    match monitor.on_tick().await {
        TickOutcome::Completed(summary) => {
            assert_eq!(summary.events, 1);
            assert_eq!(summary.delivery_failures, 1);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(monitor.store().get(id).await.unwrap().min_triggered);
    assert_eq!(monitor.history().last_price().await, Some(dec!(0.5)));

    // No resend on the next pass
    monitor.on_tick().await;
    assert_eq!(sink.take().len(), 1);
}

#[tokio::test]
async fn test_disabled_subscriber_is_silent() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![Some(dec!(1)), Some(dec!(3))]),
        sink.clone(),
    );
    let id = SubscriberId(9);
    monitor
        .apply_command(
            id,
            &ConfigCommand::SetTarget {
                side: TargetSide::Max,
                price: dec!(2),
            },
        )
        .await
        .unwrap();
    monitor
        .apply_command(id, &ConfigCommand::SetAlertsEnabled(false))
        .await
        .unwrap();

    monitor.on_tick().await;
    monitor.on_tick().await;

    assert!(sink.take().is_empty());
    assert!(!monitor.store().get(id).await.unwrap().max_triggered);
}

#[tokio::test]
async fn test_target_report() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(ScriptedSource::new(vec![Some(dec!(0.5))]), sink);
    let id = SubscriberId(1);
    monitor
        .apply_command(
            id,
            &ConfigCommand::SetTarget {
                side: TargetSide::Max,
                price: dec!(0.6),
            },
        )
        .await
        .unwrap();

    let report = monitor.target_report(id).await.unwrap();
    let max = report.max.unwrap();
    assert_eq!(max.distance_pct, Some(dec!(20)));
    assert!(!max.reached);
    assert!(report.min.is_none());
    assert!(monitor.history().last_price().await.is_none());
}

#[tokio::test]
async fn test_tiny_previous_price_completes_pass() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![
            Some(dec!(0.0000000000000000000000000001)),
            Some(dec!(1000000)),
        ]),
        sink.clone(),
    );
    monitor.register_subscriber(SubscriberId(1)).await;

    monitor.on_tick().await;
    match monitor.on_tick().await {
        TickOutcome::Completed(summary) => {
            assert_eq!(summary.price, dec!(1000000));
            assert_eq!(summary.events, 0);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(monitor.history().last_price().await, Some(dec!(1000000)));
}

#[tokio::test]
async fn test_min_target_at_decimal_max_survives_later_passes() {
    let sink = Arc::new(RecordingSink::default());
    let monitor = monitor_with(
        ScriptedSource::new(vec![Some(dec!(1)), Some(dec!(1)), Some(dec!(1))]),
        sink.clone(),
    );
    let command =
        ConfigCommand::parse_target(TargetSide::Min, &rust_decimal::Decimal::MAX.to_string())
            .unwrap();
    monitor.apply_command(SubscriberId(1), &command).await.unwrap();

    for expected_events in [1, 0, 0] {
        match monitor.on_tick().await {
            TickOutcome::Completed(summary) => assert_eq!(summary.events, expected_events),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    let config = monitor.store().get(SubscriberId(1)).await.unwrap();
    assert!(config.min_triggered);
}
