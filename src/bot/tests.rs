//! Tests for the bot runtime, driven by tokio's paused clock.

use super::*;
use crate::engine::ScriptedRandom;
use crate::notification::{EventData, EventType, RecordingNotifier};

fn bot_with(values: &[f64]) -> (Bot, Arc<RecordingNotifier>) {
    bot_with_config(Config::default(), values)
}

fn bot_with_config(config: Config, values: &[f64]) -> (Bot, Arc<RecordingNotifier>) {
    let recorder = Arc::new(RecordingNotifier::default());
    let bot = Bot::with_parts(
        BotConfig::new(config),
        Box::new(ScriptedRandom::new(values.to_vec())),
        recorder.clone() as Arc<dyn Notifier>,
    )
    .unwrap();
    (bot, recorder)
}

// ==================== Startup and price ticks ====================

#[tokio::test(start_paused = true)]
async fn test_start_ticks_once_and_announces() {
    let (bot, recorder) = bot_with(&[0.5, 0.9]);

    bot.start().await.unwrap();

    assert_eq!(recorder.count(EventType::Price), 1);
    assert_eq!(recorder.count(EventType::Startup), 1);
    // 50_000 + (0.9 - 0.5) * 50 + 0.1
    assert!((bot.snapshot().await.current_price - 50_020.1).abs() < 1e-9);
    assert!(!bot.is_running().await);
}

#[tokio::test(start_paused = true)]
async fn test_price_ticks_every_interval() {
    let (bot, recorder) = bot_with(&[0.5]);

    bot.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    assert_eq!(recorder.count(EventType::Price), 4);
}

#[tokio::test(start_paused = true)]
async fn test_double_start_rejected() {
    let (bot, _) = bot_with(&[0.5]);

    bot.start().await.unwrap();
    assert!(matches!(bot.start().await, Err(BotError::AlreadyStarted)));
}

// ==================== Trades ====================

#[tokio::test]
async fn test_gated_trade_rejected_while_stopped() {
    let (bot, recorder) = bot_with(&[0.5, 0.9]);

    let result = bot.trade(TradeKind::Buy).await;

    assert!(matches!(
        result,
        Err(BotError::Engine(EngineError::NotRunning))
    ));
    assert_eq!(bot.snapshot().await.total_trades, 0);

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    match &events[0].data {
        EventData::Error(data) => assert_eq!(data.message, NOT_RUNNING_MESSAGE),
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_gated_trade_allowed_while_running() {
    let (bot, recorder) = bot_with(&[0.5, 0.9]);

    bot.set_running(true).await;
    let trade = bot.trade(TradeKind::Buy).await.unwrap();

    assert_eq!(trade.pair, "BTCUSD");
    assert!((trade.pnl - 2.0).abs() < 1e-9);
    assert_eq!(recorder.count(EventType::Trade), 1);

    bot.set_running(false).await;
}

#[tokio::test]
async fn test_manual_trade_ignores_run_state() {
    let (bot, recorder) = bot_with(&[0.5, 0.1]);

    let trade = bot.manual_trade(TradeKind::Sell).await.unwrap();

    assert!((trade.pnl + 1.0).abs() < 1e-9);
    let snap = bot.snapshot().await;
    assert_eq!(snap.total_trades, 1);
    assert_eq!(snap.successful_trades, 0);
    assert_eq!(recorder.count(EventType::Trade), 1);
    assert_eq!(recorder.count(EventType::Error), 0);
}

// ==================== Automated trading ====================

#[tokio::test(start_paused = true)]
async fn test_automated_trading_follows_run_state() {
    let (bot, recorder) = bot_with(&[0.5, 0.9]);
    bot.start().await.unwrap();

    assert!(bot.set_running(true).await);
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(bot.snapshot().await.total_trades, 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(bot.snapshot().await.total_trades, 2);

    assert!(bot.set_running(false).await);
    assert!(!bot.set_running(false).await);
    tokio::time::sleep(Duration::from_secs(30)).await;

    let snap = bot.snapshot().await;
    assert_eq!(snap.total_trades, 2);
    assert!(!snap.is_running);
    assert_eq!(recorder.count(EventType::Status), 2);
    assert_eq!(recorder.count(EventType::Error), 0);
}

#[tokio::test]
async fn test_automated_trade_skips_quietly_when_stopped() {
    let (bot, recorder) = bot_with(&[0.5, 0.9]);

    automated_trade(&bot.engine, bot.notifier.as_ref(), &bot.ticket).await;

    assert_eq!(bot.snapshot().await.total_trades, 0);
    assert!(recorder.events().is_empty());

    bot.engine.lock().await.set_running(true);
    automated_trade(&bot.engine, bot.notifier.as_ref(), &bot.ticket).await;

    assert_eq!(bot.snapshot().await.total_trades, 1);
    assert_eq!(recorder.count(EventType::Trade), 1);
    assert_eq!(recorder.count(EventType::Error), 0);
}

#[tokio::test(start_paused = true)]
async fn test_automated_trades_use_ticket() {
    let (bot, _) = bot_with(&[0.5, 0.9]);
    bot.set_amount(Some("40")).await;
    bot.set_pair("SOLUSD").await.unwrap();

    bot.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(5_100)).await;

    let snap = bot.snapshot().await;
    let trade = snap.last_trade().unwrap();
    assert_eq!(trade.amount, 40.0);
    assert_eq!(trade.pair, "SOLUSD");
    assert_eq!(trade.kind, TradeKind::Buy);

    bot.set_running(false).await;
}

#[tokio::test(start_paused = true)]
async fn test_toggle() {
    let (bot, recorder) = bot_with(&[0.5]);

    assert!(bot.toggle().await);
    assert!(bot.is_running().await);
    assert!(!bot.toggle().await);
    assert!(!bot.is_running().await);
    assert_eq!(recorder.count(EventType::Status), 2);
    assert!(!bot.trade_task.is_active().await);
}

// ==================== Ticket ====================

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount(Some("250"), 100.0), 250.0);
    assert_eq!(parse_amount(Some(" 12.5 "), 100.0), 12.5);
    assert_eq!(parse_amount(Some("abc"), 100.0), 100.0);
    assert_eq!(parse_amount(Some(""), 100.0), 100.0);
    assert_eq!(parse_amount(Some("0"), 100.0), 100.0);
    assert_eq!(parse_amount(Some("-5"), 100.0), 100.0);
    assert_eq!(parse_amount(Some("inf"), 100.0), 100.0);
    assert_eq!(parse_amount(None, 100.0), 100.0);
}

#[tokio::test]
async fn test_set_amount_falls_back_to_default() {
    let (bot, _) = bot_with(&[0.5, 0.9]);

    assert_eq!(bot.set_amount(Some("250")).await, 250.0);
    assert_eq!(bot.manual_trade(TradeKind::Buy).await.unwrap().amount, 250.0);

    assert_eq!(bot.set_amount(Some("lots")).await, 100.0);
    assert_eq!(bot.ticket().await.amount, 100.0);
}

#[tokio::test]
async fn test_set_pair() {
    let (bot, _) = bot_with(&[0.5]);

    bot.set_pair("ethusd").await.unwrap();
    assert_eq!(bot.ticket().await.pair, "ETHUSD");

    let result = bot.set_pair("DOGEUSD").await;
    assert!(matches!(result, Err(BotError::UnknownPair(p)) if p == "DOGEUSD"));
    assert_eq!(bot.ticket().await.pair, "ETHUSD");
}

#[tokio::test]
async fn test_ticket_defaults_from_config() {
    let mut config = Config::default();
    config.trading.pairs = vec!["RELIANCE".to_string(), "TCS".to_string()];
    config.trading.default_amount = 500.0;
    let (bot, _) = bot_with_config(config, &[0.5]);

    let ticket = bot.ticket().await;
    assert_eq!(ticket.pair, "RELIANCE");
    assert_eq!(ticket.amount, 500.0);
    assert_eq!(bot.pairs().len(), 2);
}

// ==================== Shutdown ====================

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_everything() {
    let (bot, recorder) = bot_with(&[0.5, 0.9]);
    bot.start().await.unwrap();
    bot.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    bot.shutdown("test").await.unwrap();
    let prices = recorder.count(EventType::Price);

    tokio::time::sleep(Duration::from_secs(20)).await;

    assert_eq!(recorder.count(EventType::Price), prices);
    assert_eq!(bot.snapshot().await.total_trades, 0);
    assert!(!bot.is_running().await);
    assert_eq!(recorder.count(EventType::Shutdown), 1);
}

// ==================== Construction ====================

#[test]
fn test_invalid_config_rejected() {
    let mut config = Config::default();
    config.trading.history_limit = 0;

    let result = Bot::with_parts(
        BotConfig::new(config),
        Box::new(ScriptedRandom::new([0.5])),
        Arc::new(NoopNotifier::new()),
    );

    assert!(matches!(result, Err(BotError::Config(_))));
}

#[test]
fn test_seed_precedence() {
    let mut config = Config::default();
    config.simulation.seed = Some(1);

    assert_eq!(BotConfig::new(config.clone()).seed(), Some(1));
    assert_eq!(BotConfig::new(config.clone()).with_seed(None).seed(), Some(1));
    assert_eq!(BotConfig::new(config).with_seed(Some(9)).seed(), Some(9));
    assert_eq!(BotConfig::new(Config::default()).seed(), None);
}
