//! Wire schemas for the Mercado Pago `/v1/payments` API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payment::PaymentStatus;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct PayerIdentification {
    #[serde(rename = "type", default = "default_identification_type")]
    pub id_type: String,
    pub number: String,
}

pub fn default_identification_type() -> String {
    "CPF".into()
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct PayerInfo {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<PayerIdentification>,
}

/// Body sent to the provider to create a PIX charge
#[derive(Serialize, Debug)]
pub struct PixPaymentRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub description: String,
    pub payment_method_id: String,
    pub payer: PayerInfo,
}

/// Body sent to the provider to charge a tokenized card.
///
/// There is deliberately no `payment_method_id` here: the provider infers
/// the brand from the token, which avoids brand mismatch rejections.
#[derive(Serialize, Debug)]
pub struct CardPaymentRequest {
    pub token: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub installments: u32,
    pub payer: PayerInfo,
}

/// PIX QR payload nested in the provider response
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct TransactionData {
    pub qr_code: Option<String>,
    pub qr_code_base64: Option<String>,
    pub ticket_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct PointOfInteraction {
    #[serde(rename = "type", default)]
    pub poi_type: Option<String>,
    pub transaction_data: Option<TransactionData>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PaymentResponse {
    pub id: u64,
    pub status: PaymentStatus,
    pub status_detail: Option<String>,
    pub payment_method_id: Option<String>,
    pub point_of_interaction: Option<PointOfInteraction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn card_request_has_no_fixed_payment_method() {
        let request = CardPaymentRequest {
            token: "tok_123".into(),
            transaction_amount: dec!(157.5),
            installments: 1,
            payer: PayerInfo {
                email: "a@b.com".into(),
                identification: Some(PayerIdentification {
                    id_type: "CPF".into(),
                    number: "12345678909".into(),
                }),
            },
        };

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("payment_method_id").is_none());
        assert_eq!(body["transaction_amount"], 157.5);
        assert_eq!(body["payer"]["identification"]["type"], "CPF");
    }

    #[test]
    fn pix_response_carries_qr_payload() {
        let raw = serde_json::json!({
            "id": 12345678,
            "status": "pending",
            "status_detail": "pending_waiting_transfer",
            "payment_method_id": "pix",
            "point_of_interaction": {
                "type": "PIX",
                "transaction_data": {
                    "qr_code": "00020126360014BR.GOV.BCB.PIX",
                    "qr_code_base64": "iVBORw0KGgo="
                }
            }
        });

        let response: PaymentResponse = serde_json::from_value(raw).unwrap();
        let poi = response.point_of_interaction.unwrap();
        let data = poi.transaction_data.unwrap();
        assert_eq!(data.qr_code.as_deref(), Some("00020126360014BR.GOV.BCB.PIX"));
        assert!(data.qr_code_base64.is_some());
    }
}
