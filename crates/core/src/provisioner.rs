//! Phone-number search, pricing, and guarded purchase.
//!
//! Purchase ordering is deliberate: the carrier resource is created first and
//! the provider-side registration second, so a failed registration leaves a
//! number we still own instead of a charge with nothing to show for it. The
//! confirmation guard runs before either call; declining is cost-free.

use thiserror::Error;
use tracing::info;

use crate::clients::{AssistantProviderClient, CarrierClient, ProviderError, RegisterNumberRequest};
use crate::domain::number::{
    AssistantId, CandidateNumber, NumberPurchase, NumberSearchCriteria, PhoneNumberRecord,
    PriceQuote,
};

/// The literal token a caller must supply to authorize a charge.
pub const PURCHASE_TOKEN: &str = "PURCHASE";

/// The two strings the caller typed to authorize the purchase. Checked
/// character for character: the price must reproduce `quote.current_price`
/// exactly and the token must be the literal `PURCHASE`. No trimming, no
/// case folding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseConfirmation {
    pub price: String,
    pub token: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfirmationFailure {
    #[error("typed price `{typed}` does not match the quoted price `{quoted}`")]
    PriceMismatch { typed: String, quoted: String },
    #[error("confirmation token must be exactly `{PURCHASE_TOKEN}`")]
    TokenMismatch,
}

#[derive(Debug, Error)]
pub enum PurchaseError {
    /// User abort; nothing was charged.
    #[error(transparent)]
    NotConfirmed(#[from] ConfirmationFailure),
    #[error("carrier purchase failed: {0}")]
    Carrier(#[source] ProviderError),
    /// The carrier charge went through but the provider never learned about
    /// the number. The carrier sid is carried so the number is recoverable.
    #[error(
        "number {number} was purchased (carrier sid {carrier_sid}) but provider registration \
         failed: {source}"
    )]
    RegistrationFailed {
        carrier_sid: String,
        number: String,
        #[source]
        source: ProviderError,
    },
}

pub struct PhoneNumberProvisioner<C, A> {
    carrier: C,
    assistant_provider: A,
}

impl<C, A> PhoneNumberProvisioner<C, A>
where
    C: CarrierClient,
    A: AssistantProviderClient,
{
    pub fn new(carrier: C, assistant_provider: A) -> Self {
        Self { carrier, assistant_provider }
    }

    /// Pass-through inventory search. An empty result is not an error.
    pub async fn search(
        &self,
        criteria: &NumberSearchCriteria,
    ) -> Result<Vec<CandidateNumber>, ProviderError> {
        self.carrier.search_numbers(criteria).await
    }

    pub async fn get_pricing(&self, country: &str) -> Result<Vec<PriceQuote>, ProviderError> {
        self.carrier.get_pricing(country).await
    }

    /// Executes the guarded purchase: confirmation check, carrier purchase,
    /// then provider registration carrying `assistant_id` when given.
    pub async fn purchase(
        &self,
        candidate: &CandidateNumber,
        quote: &PriceQuote,
        confirmation: &PurchaseConfirmation,
        assistant_id: Option<&AssistantId>,
    ) -> Result<PhoneNumberRecord, PurchaseError> {
        verify_confirmation(quote, confirmation)?;

        let purchased = self
            .carrier
            .purchase_number(&NumberPurchase { phone_number: candidate.phone_number.clone() })
            .await
            .map_err(PurchaseError::Carrier)?;

        info!(
            event_name = "provision.number_purchased",
            number = %purchased.phone_number,
            carrier_sid = %purchased.sid,
            price = %quote.current_price,
            "carrier purchase completed"
        );

        let record = self
            .assistant_provider
            .register_number(&RegisterNumberRequest {
                number: purchased.phone_number.clone(),
                carrier_sid: purchased.sid.clone(),
                assistant_id: assistant_id.cloned(),
            })
            .await
            .map_err(|source| PurchaseError::RegistrationFailed {
                carrier_sid: purchased.sid.clone(),
                number: purchased.phone_number.clone(),
                source,
            })?;

        Ok(record)
    }
}

fn verify_confirmation(
    quote: &PriceQuote,
    confirmation: &PurchaseConfirmation,
) -> Result<(), ConfirmationFailure> {
    if confirmation.price != quote.current_price {
        return Err(ConfirmationFailure::PriceMismatch {
            typed: confirmation.price.clone(),
            quoted: quote.current_price.clone(),
        });
    }
    if confirmation.token != PURCHASE_TOKEN {
        return Err(ConfirmationFailure::TokenMismatch);
    }
    Ok(())
}
