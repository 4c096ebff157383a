//! orders.rs
//!
//! Клиент внешнего orders API: создание заказа и история покупок.
//! Все запросы авторизуются токеном сессии в заголовке `X-Session-Token`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::Order;

pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

// --- Модели данных orders API ---

#[derive(Debug, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub movie_title: &'a str,
    pub showtime: &'a str,
    pub show_date: NaiveDate,
    // Места отправляем списком номеров, сервер хранит их строкой
    pub seats: &'a [u32],
    pub ticket_count: u32,
    pub total_price: i64,
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    order: Option<Order>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrdersListResponse {
    #[serde(default)]
    orders: Option<Vec<Order>>,
    #[serde(default)]
    error: Option<String>,
}

/// Клиент orders API
#[derive(Clone)]
pub struct OrdersApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl OrdersApiClient {
    /// Создает и конфигурирует клиент на основе настроек приложения.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            base_url: config.orders_url.clone(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Создает заказ. Ответ сервера может содержать созданный заказ
    /// целиком — тогда он возвращается для показа подтверждения.
    pub async fn create_order(
        &self,
        session_token: &str,
        request: &CreateOrderRequest<'_>,
    ) -> Result<Option<Order>, AppError> {
        info!(
            "Creating order: showtime={}, seats={:?}, total={}",
            request.showtime, request.seats, request.total_price
        );

        let response = self
            .http_client
            .post(&self.base_url)
            .header(SESSION_TOKEN_HEADER, session_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body: CreateOrderResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                tracing::error!("create_order failed with status {}: {:?}", status, e);
                return Err(AppError::Remote(format!("Сервер вернул ошибку {}", status)));
            }
            Err(e) => return Err(AppError::Network(e)),
        };

        if !body.success {
            let message = body
                .error
                .unwrap_or_else(|| "Не удалось оформить заказ".to_string());
            return Err(AppError::Remote(message));
        }

        Ok(body.order)
    }

    /// Возвращает историю заказов пользователя.
    pub async fn fetch_orders(&self, session_token: &str) -> Result<Vec<Order>, AppError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .header(SESSION_TOKEN_HEADER, session_token)
            .send()
            .await?;

        let status = response.status();
        let body: OrdersListResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                tracing::error!("fetch_orders failed with status {}: {:?}", status, e);
                return Err(AppError::Remote(format!("Сервер вернул ошибку {}", status)));
            }
            Err(e) => return Err(AppError::Network(e)),
        };

        match body.orders {
            Some(orders) => Ok(orders),
            None => {
                let message = body
                    .error
                    .unwrap_or_else(|| "Ошибка загрузки заказов".to_string());
                Err(AppError::Remote(message))
            }
        }
    }
}
