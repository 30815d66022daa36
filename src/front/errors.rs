use derive_more::Display;
use log::error;
use ntex::{http, web};
use serde_json::json;

use crate::api::payment::MercadoPagoError;
use crate::api::ticket::DeliveryError;

#[derive(Debug, Display, derive_more::Error)]
pub enum ApiError {
    #[display("transaction amount must be greater than zero")]
    InvalidAmount,
    #[display("{_0}")]
    InvalidInput(#[error(not(source))] String),
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    /// Provider error relayed with its own status code when it is a valid
    /// HTTP status, 500 otherwise
    #[display("mercado pago returned status {status}")]
    Upstream {
        status: u16,
        #[error(not(source))]
        body: serde_json::Value,
    },
    #[display("{_0}")]
    Internal(#[error(not(source))] String),
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{:#?}", self);

        let body = match self {
            ApiError::InvalidAmount => json!({
                "error": "Valor inválido",
                "message": "O valor da transação deve ser maior que zero",
            }),
            ApiError::InvalidInput(msg) => json!({
                "error": "Dados inválidos",
                "message": msg,
            }),
            ApiError::NotFound(msg) => json!({ "error": msg }),
            ApiError::Upstream { body, .. } => json!({
                "error": "Erro ao processar pagamento",
                "message": body.get("message").cloned().unwrap_or(serde_json::Value::Null),
                "cause": body.get("cause").cloned().unwrap_or(serde_json::Value::Null),
            }),
            ApiError::Internal(_) => json!({
                "error": "Erro interno do servidor",
            }),
        };

        web::HttpResponse::build(self.status_code()).json(&body)
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            ApiError::InvalidAmount | ApiError::InvalidInput(_) => http::StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => http::StatusCode::from_u16(*status)
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Internal(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MercadoPagoError> for ApiError {
    fn from(err: MercadoPagoError) -> Self {
        match err {
            MercadoPagoError::Upstream { status, body } => ApiError::Upstream { status, body },
            MercadoPagoError::Transport(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::MissingDestination
            | DeliveryError::InvalidEmail
            | DeliveryError::InvalidWhatsapp => ApiError::InvalidInput(err.to_string()),
            DeliveryError::Transport(e) => ApiError::Internal(e.to_string()),
        }
    }
}
