//! Free-text command classification.
//!
//! Inbound text is keyword-prefixed free text with no quoting or escaping,
//! so parsing is deliberately permissive: the first whitespace-separated
//! token is matched against a fixed keyword table, missing arguments degrade
//! to [`Command::ShowHelp`] or defaults, and nothing here ever fails. The
//! help reply is expected behavior, not an error path.
//!
//! Keywords are matched exactly - no trimming variants, no case folding.
//! They are part of the wire contract with end users:
//!
//! ```text
//! ID教えて                          - reply with the sender's user id
//! 今日のおすすめ <key>               - list today's items for a shop
//! お店 <key>                        - show a shop's item buttons
//! 予約 <key> [<item>] [<qty>]       - reserve an item (arity per config)
//! ```

use serde::{Deserialize, Serialize};

use crate::types::ShopKey;

/// Keyword that triggers a today's-deals listing.
const KEYWORD_LIST_TODAY: &str = "今日のおすすめ";
/// Keyword that triggers shop selection.
const KEYWORD_SELECT_SHOP: &str = "お店";
/// Keyword that triggers a reservation.
const KEYWORD_RESERVE: &str = "予約";
/// Exact text that asks for the sender's own id.
const KEYWORD_WHO_AM_I: &str = "ID教えて";

/// Quantity applied when the token is missing or not a positive integer.
const DEFAULT_QUANTITY: u32 = 1;

/// A classified inbound text command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List today's items for a shop.
    ListToday { shop_key: ShopKey },
    /// Show a shop's items as selectable reservation buttons.
    SelectShop { shop_key: ShopKey },
    /// Reserve an item (or just a count) at a shop.
    Reserve {
        shop_key: ShopKey,
        item_name: Option<String>,
        quantity: u32,
    },
    /// Reply with the sender's opaque user id.
    WhoAmI,
    /// Fallback for anything unrecognized, including empty input.
    ShowHelp,
}

/// Expected argument layout of the 予約 command.
///
/// The two deployed phrasings are not distinguishable by content alone, so
/// the layout is fixed configuration, never auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReserveArgumentMode {
    /// `予約 <key> <item> <qty>`
    #[default]
    WithItem,
    /// `予約 <key> <qty>`
    CountOnly,
}

/// Classifies inbound text into [`Command`] values.
#[derive(Debug, Clone, Copy)]
pub struct CommandParser {
    mode: ReserveArgumentMode,
}

impl CommandParser {
    /// Create a parser with the given reservation argument layout.
    #[must_use]
    pub const fn new(mode: ReserveArgumentMode) -> Self {
        Self { mode }
    }

    /// The configured reservation argument layout.
    #[must_use]
    pub const fn mode(&self) -> ReserveArgumentMode {
        self.mode
    }

    /// Classify raw message text.
    ///
    /// Never fails: unrecognized or incomplete input becomes
    /// [`Command::ShowHelp`], malformed quantities become 1.
    #[must_use]
    pub fn parse(&self, raw_text: &str) -> Command {
        let text = raw_text.trim();

        if text == KEYWORD_WHO_AM_I {
            return Command::WhoAmI;
        }

        let mut tokens = text.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Command::ShowHelp;
        };

        match keyword {
            KEYWORD_LIST_TODAY => tokens.next().map_or(Command::ShowHelp, |key| {
                Command::ListToday {
                    shop_key: ShopKey::new(key),
                }
            }),
            KEYWORD_SELECT_SHOP => tokens.next().map_or(Command::ShowHelp, |key| {
                Command::SelectShop {
                    shop_key: ShopKey::new(key),
                }
            }),
            KEYWORD_RESERVE => {
                let Some(key) = tokens.next() else {
                    return Command::ShowHelp;
                };
                let (item_name, quantity_token) = match self.mode {
                    ReserveArgumentMode::WithItem => {
                        (tokens.next().map(str::to_owned), tokens.next())
                    }
                    ReserveArgumentMode::CountOnly => (None, tokens.next()),
                };
                Command::Reserve {
                    shop_key: ShopKey::new(key),
                    item_name,
                    quantity: parse_quantity(quantity_token),
                }
            }
            _ => Command::ShowHelp,
        }
    }
}

/// Parse a quantity token, degrading to the default on anything invalid.
fn parse_quantity(token: Option<&str>) -> u32 {
    token
        .and_then(|t| t.parse::<u32>().ok())
        .filter(|&q| q >= 1)
        .unwrap_or(DEFAULT_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_item() -> CommandParser {
        CommandParser::new(ReserveArgumentMode::WithItem)
    }

    fn count_only() -> CommandParser {
        CommandParser::new(ReserveArgumentMode::CountOnly)
    }

    #[test]
    fn test_who_am_i_exact_match() {
        assert_eq!(with_item().parse("ID教えて"), Command::WhoAmI);
        // Trailing content breaks the exact match
        assert_eq!(with_item().parse("ID教えて ください"), Command::ShowHelp);
    }

    #[test]
    fn test_list_today() {
        assert_eq!(
            with_item().parse("今日のおすすめ shopA"),
            Command::ListToday {
                shop_key: ShopKey::new("shopA")
            }
        );
        // Missing key degrades to help
        assert_eq!(with_item().parse("今日のおすすめ"), Command::ShowHelp);
    }

    #[test]
    fn test_select_shop() {
        assert_eq!(
            with_item().parse("お店 shopA"),
            Command::SelectShop {
                shop_key: ShopKey::new("shopA")
            }
        );
        assert_eq!(with_item().parse("お店"), Command::ShowHelp);
    }

    #[test]
    fn test_reserve_with_item_full() {
        assert_eq!(
            with_item().parse("予約 shopA bread 2"),
            Command::Reserve {
                shop_key: ShopKey::new("shopA"),
                item_name: Some("bread".to_owned()),
                quantity: 2,
            }
        );
    }

    #[test]
    fn test_reserve_count_only_layout() {
        assert_eq!(
            count_only().parse("予約 shopX 3"),
            Command::Reserve {
                shop_key: ShopKey::new("shopX"),
                item_name: None,
                quantity: 3,
            }
        );
    }

    #[test]
    fn test_reserve_defaults_quantity_to_one() {
        assert_eq!(
            count_only().parse("予約 shopX"),
            Command::Reserve {
                shop_key: ShopKey::new("shopX"),
                item_name: None,
                quantity: 1,
            }
        );
        // Non-numeric quantity degrades, never fails
        assert_eq!(
            with_item().parse("予約 shopA bread many"),
            Command::Reserve {
                shop_key: ShopKey::new("shopA"),
                item_name: Some("bread".to_owned()),
                quantity: 1,
            }
        );
        // Zero is not a valid quantity
        assert_eq!(
            with_item().parse("予約 shopA bread 0"),
            Command::Reserve {
                shop_key: ShopKey::new("shopA"),
                item_name: Some("bread".to_owned()),
                quantity: 1,
            }
        );
    }

    #[test]
    fn test_reserve_missing_key_shows_help() {
        assert_eq!(with_item().parse("予約"), Command::ShowHelp);
    }

    #[test]
    fn test_unrecognized_text_shows_help() {
        assert_eq!(with_item().parse(""), Command::ShowHelp);
        assert_eq!(with_item().parse("   "), Command::ShowHelp);
        assert_eq!(with_item().parse("こんにちは"), Command::ShowHelp);
        // Keyword must be its own token
        assert_eq!(with_item().parse("予約shopA"), Command::ShowHelp);
    }
}
