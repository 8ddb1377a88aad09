//! Operator console: parses stdin lines into commands and applies them to the bot.

use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, warn};

use crate::bot::Bot;
use crate::domain::TradeKind;
use crate::notification::{format_history, format_snapshot};

const DEFAULT_HISTORY_ROWS: usize = 10;

const HELP: &str = "\
Commands:
  buy [amount] [pair]      gated buy (requires a started bot)
  sell [amount] [pair]     gated sell (requires a started bot)
  manual <buy|sell>        trade even while the bot is stopped
  start | stop | toggle    switch automated trading
  amount <value>           set the ticket amount (invalid input means default)
  pair <symbol>            select the ticket pair
  status                   print price and statistics
  history [n]              print the last n trades
  help                     print this help
  quit                     shut down";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Trade {
        kind: TradeKind,
        amount: Option<String>,
        pair: Option<String>,
    },
    Manual(TradeKind),
    Start,
    Stop,
    Toggle,
    Amount(Option<String>),
    Pair(String),
    Status,
    History(usize),
    Help,
    Quit,
}

/// Console input errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (type 'help')")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let arg = parts.next().map(str::to_string);

        let command = match head.to_ascii_lowercase().as_str() {
            "buy" | "sell" => Command::Trade {
                kind: head.parse().map_err(CommandError::InvalidArgument)?,
                amount: arg,
                pair: parts.next().map(str::to_string),
            },
            "manual" => {
                let kind = arg.ok_or(CommandError::MissingArgument("buy or sell"))?;
                Command::Manual(kind.parse().map_err(CommandError::InvalidArgument)?)
            }
            "start" => Command::Start,
            "stop" => Command::Stop,
            "toggle" => Command::Toggle,
            "amount" => Command::Amount(arg),
            "pair" => Command::Pair(arg.ok_or(CommandError::MissingArgument("pair"))?),
            "status" => Command::Status,
            "history" => match arg {
                Some(n) => Command::History(
                    n.parse()
                        .map_err(|_| CommandError::InvalidArgument(format!("row count: {}", n)))?,
                ),
                None => Command::History(DEFAULT_HISTORY_ROWS),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

/// Result of applying a command.
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    /// Text for the operator; trade results reach them through the notifier instead.
    pub text: Option<String>,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            quit: false,
        }
    }

    fn silent() -> Self {
        Self::default()
    }
}

/// Applies one command to the bot.
pub async fn dispatch(bot: &Bot, command: Command) -> Reply {
    match command {
        Command::Trade { kind, amount, pair } => {
            // Pair first: it is the only part that can be rejected.
            if let Some(pair) = pair {
                if let Err(e) = bot.set_pair(&pair).await {
                    return Reply::text(e.to_string());
                }
            }
            if amount.is_some() {
                bot.set_amount(amount.as_deref()).await;
            }
            match bot.trade(kind).await {
                Ok(_) => Reply::silent(),
                Err(e) => Reply::text(e.to_string()),
            }
        }
        Command::Manual(kind) => match bot.manual_trade(kind).await {
            Ok(_) => Reply::silent(),
            Err(e) => Reply::text(e.to_string()),
        },
        Command::Start => {
            if !bot.set_running(true).await {
                return Reply::text("bot is already running");
            }
            Reply::silent()
        }
        Command::Stop => {
            bot.set_running(false).await;
            Reply::silent()
        }
        Command::Toggle => {
            bot.toggle().await;
            Reply::silent()
        }
        Command::Amount(input) => {
            let amount = bot.set_amount(input.as_deref()).await;
            Reply::text(format!("amount set to {}", amount))
        }
        Command::Pair(pair) => match bot.set_pair(&pair).await {
            Ok(()) => Reply::text(format!("pair set to {}", bot.ticket().await.pair)),
            Err(e) => Reply::text(format!("{} (available: {})", e, bot.pairs().join(", "))),
        },
        Command::Status => {
            let snapshot = bot.snapshot().await;
            let ticket = bot.ticket().await;
            Reply::text(format!(
                "{}\nTicket: {} {}",
                format_snapshot(&snapshot),
                ticket.amount,
                ticket.pair
            ))
        }
        Command::History(rows) => {
            let snapshot = bot.snapshot().await;
            Reply::text(format_history(&snapshot.trade_history, rows))
        }
        Command::Help => Reply::text(HELP),
        Command::Quit => Reply {
            text: None,
            quit: true,
        },
    }
}

/// Reads commands from `input` until EOF or `quit`.
pub async fn run_console<R>(bot: &Bot, input: R) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                warn!(input = %line, "Invalid command");
                println!("{}", e);
                continue;
            }
        };

        debug!(command = ?command, "Console command");
        let reply = dispatch(bot, command).await;
        if let Some(text) = reply.text {
            println!("{}", text);
        }
        if reply.quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
