use crate::error::ApiError;
use crate::models::gift::{
    BuyGiftResult, GiftCatalogItem, GiftHistoryItem, GiftInventoryItem, GiftList, SendGiftResult,
};
use crate::repositories::gift::{GiftBlock, GiftSentBlock, InventoryBlock};
use crate::repositories::GiftRepository;
use crate::upstream::{LooseField, UpstreamClient};

use super::{ensure_connected, rejection};

const DEFAULT_GIFT_NAME: &str = "Gift";

pub(crate) fn to_catalog_item(raw: &GiftBlock) -> Option<GiftCatalogItem> {
    Some(GiftCatalogItem {
        id: raw.id.positive_integer()?,
        name: raw.nom.text().unwrap_or_else(|| DEFAULT_GIFT_NAME.to_string()),
        slug: raw.slug.text(),
        image_path: raw.image.text(),
        price_coins: raw.prix.non_negative_integer().unwrap_or(0),
    })
}

pub(crate) fn to_inventory_item(raw: &InventoryBlock) -> Option<GiftInventoryItem> {
    Some(GiftInventoryItem {
        gift_id: raw.gift_id.positive_integer()?,
        gift_name: raw.nom.text().unwrap_or_else(|| DEFAULT_GIFT_NAME.to_string()),
        gift_image_path: raw.image.text(),
        quantity: raw.quantite.non_negative_integer().unwrap_or(0),
        updated_at: raw.date_maj.text(),
    })
}

pub(crate) fn to_history_item(raw: &GiftSentBlock) -> Option<GiftHistoryItem> {
    Some(GiftHistoryItem {
        id: raw.id.positive_integer()?,
        gift_id: raw.gift_id.positive_integer()?,
        gift_name: raw.nom.text().unwrap_or_else(|| DEFAULT_GIFT_NAME.to_string()),
        gift_image_path: raw.image.text(),
        recipient_user_id: raw.destinataire_id.positive_integer()?,
        price_coins: raw.prix.non_negative_integer().unwrap_or(0),
        created_at: raw.date.text(),
    })
}

pub struct GiftService<'a> {
    repository: GiftRepository<'a>,
}

impl<'a> GiftService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self {
            repository: GiftRepository::new(client),
        }
    }

    pub async fn catalog(&self, session_id: &str) -> Result<GiftList<GiftCatalogItem>, ApiError> {
        let payload = self.repository.catalog(session_id).await?;
        ensure_connected(&payload.connected)?;

        Ok(GiftList {
            items: payload.result.iter().filter_map(to_catalog_item).collect(),
        })
    }

    pub async fn inventory(&self, session_id: &str) -> Result<GiftList<GiftInventoryItem>, ApiError> {
        let payload = self.repository.inventory(session_id).await?;
        ensure_connected(&payload.connected)?;

        Ok(GiftList {
            items: payload.result.iter().filter_map(to_inventory_item).collect(),
        })
    }

    pub async fn history(&self, session_id: &str, limit: i64) -> Result<GiftList<GiftHistoryItem>, ApiError> {
        let payload = self.repository.history(session_id, limit).await?;
        ensure_connected(&payload.connected)?;

        // The provider does not always honour `limit`
        let items = payload
            .result
            .iter()
            .filter_map(to_history_item)
            .take(limit.max(0) as usize)
            .collect();

        Ok(GiftList { items })
    }

    pub async fn buy(&self, session_id: &str, gift_id: i64) -> Result<BuyGiftResult, ApiError> {
        let payload = self.repository.buy(session_id, gift_id).await?;
        if !payload.accepted.flag() {
            return Err(rejection(&payload.error, "Gift purchase rejected"));
        }

        tracing::info!(gift_id, "gift purchased");
        Ok(BuyGiftResult {
            gift_id,
            spent_coins: payload.spent.non_negative_integer().unwrap_or(0),
            remaining_balance: payload.solde.integer().unwrap_or(0),
        })
    }

    pub async fn send(&self, session_id: &str, gift_id: i64, recipient_user_id: i64) -> Result<SendGiftResult, ApiError> {
        let payload = self.repository.send(session_id, gift_id, recipient_user_id).await?;
        if !payload.accepted.flag() {
            return Err(rejection(&payload.error, "Gift delivery rejected"));
        }

        tracing::info!(gift_id, recipient_user_id, "gift sent");
        Ok(SendGiftResult {
            gift_id,
            recipient_user_id,
            remaining_inventory: payload.restant.non_negative_integer().unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_items_need_an_id() {
        let raw: GiftBlock = serde_json::from_value(json!({"id": "4", "nom": "Rose", "prix": "15", "image": "/g/rose.png"})).unwrap();
        let item = to_catalog_item(&raw).unwrap();
        assert_eq!(item.price_coins, 15);
        assert_eq!(item.image_path.as_deref(), Some("/g/rose.png"));

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["priceCoins"], 15);
        assert!(json.get("slug").is_none());

        let raw: GiftBlock = serde_json::from_value(json!({"nom": "Orphan"})).unwrap();
        assert!(to_catalog_item(&raw).is_none());
    }

    #[test]
    fn inventory_defaults() {
        let raw: InventoryBlock = serde_json::from_value(json!({"gift_id": 2, "quantite": "-1"})).unwrap();
        let item = to_inventory_item(&raw).unwrap();
        assert_eq!(item.gift_name, "Gift");
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn history_requires_recipient() {
        let raw: GiftSentBlock =
            serde_json::from_value(json!({"id": 1, "gift_id": 2, "destinataire_id": "9", "prix": 5})).unwrap();
        assert_eq!(to_history_item(&raw).unwrap().recipient_user_id, 9);

        let raw: GiftSentBlock = serde_json::from_value(json!({"id": 1, "gift_id": 2})).unwrap();
        assert!(to_history_item(&raw).is_none());
    }
}
