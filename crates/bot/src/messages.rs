//! Reply message builders.
//!
//! Factory functions for every reply the bot sends. The command strings
//! embedded in quick-reply options and buttons are part of the wire contract
//! with end users and must stay in sync with the parser vocabulary.

use otoku_core::{ItemRecord, ShopRecord};

use crate::line::{Action, Message, QuickReplyItem};

/// Maximum actions the LINE buttons template accepts.
const MAX_BUTTON_ACTIONS: usize = 4;

/// Reply sent when a command names a shop that is not in the catalog.
pub const TEXT_SHOP_NOT_FOUND: &str = "店舗がありません";

/// Prompt above the nearby-shop quick-reply options.
const TEXT_NEARBY_PROMPT: &str = "近くのお得なお店はこちらです。選択してください：";

/// Reply when a location query matches no shops at all.
const TEXT_NO_NEARBY: &str = "近くにお店が見つかりませんでした。";

/// Reply when a shop has no items posted today.
const TEXT_NO_ITEMS: &str = "本日の商品はまだありません。";

/// Fixed usage text, also the fallback for unrecognized input.
const TEXT_HELP: &str =
    "位置情報を送るか、「お店 [店舗名]」または「予約 [店舗名] [商品名] [数量]」で送信してください。";

/// Build the "shop not found" reply.
#[must_use]
pub fn build_not_found() -> Message {
    Message::text(TEXT_SHOP_NOT_FOUND)
}

/// Build the fixed usage reply.
#[must_use]
pub fn build_help() -> Message {
    Message::text(TEXT_HELP)
}

/// Build the nearby-shop quick reply.
///
/// One selectable option per shop, labeled with the display name and
/// re-submitting `お店 <key>`. An empty shortlist becomes a plain text
/// reply, since quick replies require at least one option.
#[must_use]
pub fn build_nearby_quick_reply<'a>(shops: impl IntoIterator<Item = &'a ShopRecord>) -> Message {
    let items: Vec<QuickReplyItem> = shops
        .into_iter()
        .map(|shop| {
            QuickReplyItem::new(Action::message(
                shop.name.clone(),
                format!("お店 {}", shop.key),
            ))
        })
        .collect();

    if items.is_empty() {
        Message::text(TEXT_NO_NEARBY)
    } else {
        Message::text_with_quick_reply(TEXT_NEARBY_PROMPT, items)
    }
}

/// Build the item selection buttons for a shop.
///
/// Each button pre-fills a single-quantity reservation command. Falls back
/// to plain text when the shop has nothing posted.
#[must_use]
pub fn build_item_buttons(shop: &ShopRecord) -> Message {
    if shop.items.is_empty() {
        return Message::text(TEXT_NO_ITEMS);
    }

    let actions: Vec<Action> = shop
        .items
        .iter()
        .take(MAX_BUTTON_ACTIONS)
        .map(|item| {
            Action::message(
                format!("{} {}円", item.name, item.discount_price),
                format!("予約 {} {} 1", shop.key, item.name),
            )
        })
        .collect();

    Message::buttons(
        format!("{} の商品一覧", shop.name),
        shop.name.clone(),
        "商品を選んでください",
        actions,
    )
}

/// Build the newline-joined today's-deals listing for a shop.
#[must_use]
pub fn build_today_listing(shop: &ShopRecord) -> Message {
    if shop.items.is_empty() {
        return Message::text(TEXT_NO_ITEMS);
    }

    let lines: Vec<String> = shop.items.iter().map(summarize_item).collect();
    Message::text(format!("{} の本日のおすすめ\n{}", shop.name, lines.join("\n")))
}

/// One-line item summary: `name, discount → regular`.
fn summarize_item(item: &ItemRecord) -> String {
    format!(
        "{}, {}円 → {}円",
        item.name, item.discount_price, item.price
    )
}

/// Build the reservation confirmation reply.
#[must_use]
pub fn build_reservation_confirmation(
    shop_name: &str,
    item_name: Option<&str>,
    quantity: u32,
) -> Message {
    let text = item_name.map_or_else(
        || format!("{shop_name} に予約しました。数量: {quantity}"),
        |item| format!("{shop_name} の {item} を予約しました。数量: {quantity}"),
    );
    Message::text(text)
}
