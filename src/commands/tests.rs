//! Tests for console command parsing and dispatch.

use super::*;
use std::sync::Arc;

use crate::bot::BotConfig;
use crate::config::Config;
use crate::engine::ScriptedRandom;
use crate::notification::{EventType, Notifier, RecordingNotifier};

fn test_bot() -> (Bot, Arc<RecordingNotifier>) {
    let recorder = Arc::new(RecordingNotifier::default());
    let bot = Bot::with_parts(
        BotConfig::new(Config::default()),
        Box::new(ScriptedRandom::new([0.5, 0.9])),
        recorder.clone() as Arc<dyn Notifier>,
    )
    .unwrap();
    (bot, recorder)
}

// ==================== Parsing ====================

#[test]
fn test_parse_trade_commands() {
    assert_eq!(
        "buy".parse::<Command>().unwrap(),
        Command::Trade {
            kind: TradeKind::Buy,
            amount: None,
            pair: None
        }
    );
    assert_eq!(
        "SELL 250 ethusd".parse::<Command>().unwrap(),
        Command::Trade {
            kind: TradeKind::Sell,
            amount: Some("250".to_string()),
            pair: Some("ethusd".to_string())
        }
    );
}

#[test]
fn test_parse_manual() {
    assert_eq!(
        "manual sell".parse::<Command>().unwrap(),
        Command::Manual(TradeKind::Sell)
    );
    assert_eq!(
        "manual".parse::<Command>(),
        Err(CommandError::MissingArgument("buy or sell"))
    );
    assert!(matches!(
        "manual hold".parse::<Command>(),
        Err(CommandError::InvalidArgument(_))
    ));
}

#[test]
fn test_parse_simple_commands() {
    assert_eq!("start".parse::<Command>().unwrap(), Command::Start);
    assert_eq!(" stop ".parse::<Command>().unwrap(), Command::Stop);
    assert_eq!("toggle".parse::<Command>().unwrap(), Command::Toggle);
    assert_eq!("status".parse::<Command>().unwrap(), Command::Status);
    assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
    assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
}

#[test]
fn test_parse_history() {
    assert_eq!("history".parse::<Command>().unwrap(), Command::History(10));
    assert_eq!("history 3".parse::<Command>().unwrap(), Command::History(3));
    assert!(matches!(
        "history many".parse::<Command>(),
        Err(CommandError::InvalidArgument(_))
    ));
}

#[test]
fn test_parse_ticket_commands() {
    assert_eq!(
        "amount 42".parse::<Command>().unwrap(),
        Command::Amount(Some("42".to_string()))
    );
    assert_eq!("amount".parse::<Command>().unwrap(), Command::Amount(None));
    assert_eq!(
        "pair".parse::<Command>(),
        Err(CommandError::MissingArgument("pair"))
    );
}

#[test]
fn test_parse_errors() {
    assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
    assert_eq!(
        "dance".parse::<Command>(),
        Err(CommandError::Unknown("dance".to_string()))
    );
}

// ==================== Dispatch ====================

#[tokio::test]
async fn test_dispatch_gated_trade_while_stopped() {
    let (bot, recorder) = test_bot();

    let reply = dispatch(&bot, Command::Trade {
        kind: TradeKind::Buy,
        amount: None,
        pair: None,
    })
    .await;

    assert_eq!(reply.text.as_deref(), Some("trading bot is not running"));
    assert_eq!(recorder.count(EventType::Error), 1);
    assert_eq!(bot.snapshot().await.total_trades, 0);
}

#[tokio::test]
async fn test_dispatch_trade_updates_ticket() {
    let (bot, recorder) = test_bot();
    dispatch(&bot, Command::Start).await;

    let reply = dispatch(&bot, Command::Trade {
        kind: TradeKind::Sell,
        amount: Some("200".to_string()),
        pair: Some("ethusd".to_string()),
    })
    .await;

    assert_eq!(reply, Reply::default());
    let trade = bot.snapshot().await.last_trade().cloned().unwrap();
    assert_eq!(trade.amount, 200.0);
    assert_eq!(trade.pair, "ETHUSD");
    assert!((trade.pnl - 3.0).abs() < 1e-9);
    assert_eq!(recorder.count(EventType::Trade), 1);

    dispatch(&bot, Command::Stop).await;
}

#[tokio::test]
async fn test_dispatch_trade_with_unknown_pair_keeps_ticket() {
    let (bot, recorder) = test_bot();
    dispatch(&bot, Command::Start).await;
    let before = bot.ticket().await;

    let reply = dispatch(&bot, Command::Trade {
        kind: TradeKind::Buy,
        amount: Some("500".to_string()),
        pair: Some("BADPAIR".to_string()),
    })
    .await;

    assert!(reply.text.unwrap().contains("unknown trading pair: BADPAIR"));
    assert_eq!(bot.ticket().await, before);
    assert_eq!(bot.snapshot().await.total_trades, 0);
    assert_eq!(recorder.count(EventType::Trade), 0);

    dispatch(&bot, Command::Stop).await;
}

#[tokio::test]
async fn test_dispatch_manual_trade() {
    let (bot, _) = test_bot();

    let reply = dispatch(&bot, Command::Manual(TradeKind::Buy)).await;

    assert!(reply.text.is_none());
    assert_eq!(bot.snapshot().await.total_trades, 1);
}

#[tokio::test]
async fn test_dispatch_start_twice() {
    let (bot, _) = test_bot();

    assert!(dispatch(&bot, Command::Start).await.text.is_none());
    assert_eq!(
        dispatch(&bot, Command::Start).await.text.as_deref(),
        Some("bot is already running")
    );
    dispatch(&bot, Command::Toggle).await;
    assert!(!bot.is_running().await);
}

#[tokio::test]
async fn test_dispatch_unknown_pair_lists_choices() {
    let (bot, _) = test_bot();

    let reply = dispatch(&bot, Command::Pair("XYZ".to_string())).await;

    let text = reply.text.unwrap();
    assert!(text.contains("unknown trading pair: XYZ"));
    assert!(text.contains("BTCUSD, ETHUSD"));
}

#[tokio::test]
async fn test_dispatch_amount_and_status() {
    let (bot, _) = test_bot();

    let reply = dispatch(&bot, Command::Amount(Some("oops".to_string()))).await;
    assert_eq!(reply.text.as_deref(), Some("amount set to 100"));

    let status = dispatch(&bot, Command::Status).await.text.unwrap();
    assert!(status.contains("Bot: STOPPED"));
    assert!(status.contains("Ticket: 100 BTCUSD"));
}

#[tokio::test]
async fn test_dispatch_history_and_quit() {
    let (bot, _) = test_bot();

    assert_eq!(
        dispatch(&bot, Command::History(5)).await.text.as_deref(),
        Some("No trades yet")
    );

    dispatch(&bot, Command::Manual(TradeKind::Sell)).await;
    let history = dispatch(&bot, Command::History(5)).await.text.unwrap();
    assert_eq!(history.lines().count(), 1);

    assert!(dispatch(&bot, Command::Quit).await.quit);
}

#[tokio::test]
async fn test_run_console_stops_at_quit() {
    let (bot, _) = test_bot();
    let input: &[u8] = b"manual buy\n\nbogus\nquit\nmanual buy\n";

    run_console(&bot, input).await.unwrap();

    assert_eq!(bot.snapshot().await.total_trades, 1);
}
