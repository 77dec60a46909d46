//! Command parsing for the dashboard REPL
//!
//! Maps slash-commands typed at the prompt onto panel operations.

use crate::error::{DashboardError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Refresh the live-prices panel now
    Prices,
    /// Value a portfolio; `input` holds newline-delimited `symbol,qty` lines
    Portfolio { input: String },
    /// Predict next close joined with the Sharpe ratio
    Predict { symbol: String },
    /// Analyze risk level, risk metrics and anomalies
    Risk { symbol: String },
    /// Fetch the explained-variance plot
    Pca { symbol: String },
    /// Load the course catalog
    Courses,
    /// Quote a single symbol
    Quote { symbol: String },
    /// Add a symbol to the polled watchlist
    Watch { symbol: String },
    /// Remove a symbol from the polled watchlist
    Unwatch { symbol: String },
    /// Show the polled watchlist
    Watchlist,
    /// Show help
    Help,
    /// Exit the dashboard
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// Bare input (no leading slash) is treated as a quote request for
    /// that symbol.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(DashboardError::Command("Empty input".to_string()));
        }

        if !input.starts_with('/') {
            return Ok(Command::Quote {
                symbol: input.to_uppercase(),
            });
        }

        let parts: Vec<&str> = input[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Err(DashboardError::Command("Empty command".to_string()));
        }

        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "prices" | "live" | "l" => Ok(Command::Prices),
            "portfolio" | "pf" => {
                if args.is_empty() {
                    return Err(DashboardError::Command(
                        "Portfolio requires symbol,quantity pairs".to_string(),
                    ));
                }
                // Pairs are separated by whitespace or semicolons at the
                // prompt; the parser works on newline-delimited lines
                let input = args.join("\n").replace(';', "\n");
                Ok(Command::Portfolio { input })
            }
            "predict" | "p" => {
                let symbol = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing symbol for predict command".to_string())
                })?;
                Ok(Command::Predict {
                    symbol: symbol.to_uppercase(),
                })
            }
            "risk" | "r" => {
                let symbol = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing symbol for risk command".to_string())
                })?;
                Ok(Command::Risk {
                    symbol: symbol.to_uppercase(),
                })
            }
            "pca" => {
                let symbol = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing symbol for pca command".to_string())
                })?;
                Ok(Command::Pca {
                    symbol: symbol.to_uppercase(),
                })
            }
            "courses" | "learn" => Ok(Command::Courses),
            "quote" => {
                let symbol = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing symbol for quote command".to_string())
                })?;
                Ok(Command::Quote {
                    symbol: symbol.to_uppercase(),
                })
            }
            "watch" | "w" => {
                let symbol = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing symbol for watch command".to_string())
                })?;
                Ok(Command::Watch {
                    symbol: symbol.to_uppercase(),
                })
            }
            "unwatch" => {
                let symbol = args.first().ok_or_else(|| {
                    DashboardError::Command("Missing symbol for unwatch command".to_string())
                })?;
                Ok(Command::Unwatch {
                    symbol: symbol.to_uppercase(),
                })
            }
            "watchlist" | "list" => Ok(Command::Watchlist),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(DashboardError::Command(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"
FinSight Dashboard Commands
===========================

Panel Commands:
  /prices                      Refresh live prices now
  /portfolio <sym,qty;...>     Value a portfolio (e.g. /portfolio INFY,10;TCS,5)
  /predict <symbol>            Price prediction + Sharpe ratio
  /risk <symbol>               Risk level, metrics and anomalies
  /pca <symbol>                Explained-variance plot
  /courses                     Course catalog
  /quote <symbol>              Single live quote

Watchlist Commands:
  /watch <symbol>              Add to the polled watchlist
  /unwatch <symbol>            Remove from the polled watchlist
  /watchlist                   Show the polled watchlist

Other Commands:
  /help                        Show help
  /exit                        Exit

Command Aliases:
  /l = /prices    /pf = /portfolio    /p = /predict
  /r = /risk      /w = /watch         /q = /exit

Bare input is treated as a quote request, e.g. just type INFY.
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_panel_commands() {
        assert_eq!(Command::parse("/prices").unwrap(), Command::Prices);
        assert_eq!(Command::parse("/courses").unwrap(), Command::Courses);
        assert_eq!(
            Command::parse("/predict infy").unwrap(),
            Command::Predict {
                symbol: "INFY".to_string()
            }
        );
        assert_eq!(
            Command::parse("/risk tcs").unwrap(),
            Command::Risk {
                symbol: "TCS".to_string()
            }
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("/l").unwrap(), Command::Prices);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
        assert_eq!(
            Command::parse("/p sbin").unwrap(),
            Command::Predict {
                symbol: "SBIN".to_string()
            }
        );
    }

    #[test]
    fn test_parse_portfolio_joins_pairs_as_lines() {
        let cmd = Command::parse("/portfolio INFY,10;TCS,5 SBIN,3").unwrap();
        assert_eq!(
            cmd,
            Command::Portfolio {
                input: "INFY,10\nTCS,5\nSBIN,3".to_string()
            }
        );
    }

    #[test]
    fn test_parse_missing_symbol_is_an_error() {
        assert!(Command::parse("/predict").is_err());
        assert!(Command::parse("/portfolio").is_err());
        assert!(Command::parse("/watch").is_err());
    }

    #[test]
    fn test_parse_bare_input_is_a_quote() {
        assert_eq!(
            Command::parse("reliance").unwrap(),
            Command::Quote {
                symbol: "RELIANCE".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert!(Command::parse("/frobnicate").is_err());
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());
    }
}
