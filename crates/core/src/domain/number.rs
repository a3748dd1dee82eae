use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssistantId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumberId(pub String);

impl std::fmt::Display for AssistantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PhoneNumberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inventory search filters, passed through to the carrier unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSearchCriteria {
    pub country: String,
    /// Requested number type as the caller phrases it ("local", "tollfree", ...).
    pub number_type: String,
    #[serde(default)]
    pub area_code: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

fn default_search_limit() -> u32 {
    10
}

/// One purchasable number from the carrier's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateNumber {
    pub phone_number: String,
    pub friendly_name: String,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// A carrier price entry for one number type in one country. Prices stay as
/// the verbatim strings the carrier returned; the purchase confirmation
/// compares against `current_price` character for character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub number_type: String,
    pub base_price: String,
    pub current_price: String,
    pub price_unit: String,
}

/// What the carrier needs to execute a purchase. The E.164 number is enough;
/// the carrier derives everything else from its own inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPurchase {
    pub phone_number: String,
}

/// The carrier-side resource created by a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierNumber {
    pub sid: String,
    pub phone_number: String,
}

/// The provider-side record of a number, after registration. `assistant_id`
/// is present when the purchase already carried it; the linking step patches
/// it in otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumberRecord {
    pub id: PhoneNumberId,
    pub number: String,
    #[serde(default)]
    pub assistant_id: Option<AssistantId>,
}
