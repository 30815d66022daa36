use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Charge status, owned entirely by Mercado Pago. This service only relays
/// whatever the provider reports.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    // O pagamento foi criado mas ainda não foi pago (PIX aguardando QR)
    #[default]
    #[display("pending")]
    Pending,
    // O pagamento foi aprovado e acreditado com sucesso
    #[display("approved")]
    Approved,
    // O pagamento foi autorizado mas ainda não foi capturado
    #[display("authorized")]
    Authorized,
    // O pagamento está em revisão
    #[display("in_process")]
    InProcess,
    // O pagamento foi recusado (o usuário pode tentar pagar novamente)
    #[display("rejected")]
    Rejected,
    // O pagamento foi cancelado por uma das partes ou expirou
    #[display("cancelled")]
    Cancelled,
    // O pagamento foi devolvido ao usuário
    #[display("refunded")]
    Refunded,
    // O valor foi retirado via chargeback no cartão
    #[display("charged_back")]
    ChargedBack,
    // Qualquer status novo que o provedor venha a introduzir
    #[serde(other)]
    #[display("unknown")]
    Unknown,
}

impl PaymentStatus {
    pub fn is_approved(self) -> bool {
        self == PaymentStatus::Approved
    }
}
