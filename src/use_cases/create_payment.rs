//! Create-payment use case: turn a validated order into a provider
//! preference plus a pending local transaction.

use std::sync::Arc;

use crate::domain::{OrderItem, Transaction};
use crate::error::AppError;
use crate::mercadopago::{PreferenceClient, PreferenceItem, PreferenceRequest, CURRENCY_ID};
use crate::ports::TransactionStore;

/// What the caller needs to move the buyer to checkout: the redirect URL
/// and the preference id (rendered as a QR on the machine).
#[derive(Debug)]
pub struct PaymentCreated {
    pub payment_url: String,
    pub qr_data: String,
}

pub struct CreatePayment {
    payments: PreferenceClient,
    store: Arc<dyn TransactionStore>,
    notification_url: String,
}

impl CreatePayment {
    pub fn new(
        payments: PreferenceClient,
        store: Arc<dyn TransactionStore>,
        notification_url: String,
    ) -> Self {
        Self {
            payments,
            store,
            notification_url,
        }
    }

    pub async fn execute(
        &self,
        machine_id: String,
        items: Vec<OrderItem>,
    ) -> Result<PaymentCreated, AppError> {
        let request = PreferenceRequest {
            items: items
                .iter()
                .map(|item| PreferenceItem {
                    title: item.name.clone(),
                    quantity: item.quantity,
                    currency_id: CURRENCY_ID.to_string(),
                    unit_price: item.price,
                })
                .collect(),
            external_reference: machine_id.clone(),
            notification_url: self.notification_url.clone(),
        };

        let preference = self.payments.create_preference(&request).await?;

        let tx = Transaction::new(preference.id.clone(), machine_id, items);
        if let Err(e) = self.store.insert(&tx).await {
            // The provider already accepted the preference; without a local
            // record its webhook will be answered 404 and dropped.
            tracing::error!(
                machine_id = %tx.machine_id,
                preference_id = %tx.id,
                error = %e,
                "preference created but transaction write failed, orphaned preference"
            );
            return Err(e.into());
        }

        tracing::info!(
            machine_id = %tx.machine_id,
            preference_id = %tx.id,
            "payment preference created, transaction pending"
        );

        Ok(PaymentCreated {
            payment_url: preference.init_point,
            qr_data: preference.id,
        })
    }
}
