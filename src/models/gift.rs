use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCatalogItem {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub price_coins: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftInventoryItem {
    pub gift_id: i64,
    pub gift_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_image_path: Option<String>,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftHistoryItem {
    pub id: i64,
    pub gift_id: i64,
    pub gift_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_image_path: Option<String>,
    pub recipient_user_id: i64,
    pub price_coins: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftList<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyGiftResult {
    pub gift_id: i64,
    pub spent_coins: i64,
    pub remaining_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendGiftResult {
    pub gift_id: i64,
    pub recipient_user_id: i64,
    pub remaining_inventory: i64,
}
