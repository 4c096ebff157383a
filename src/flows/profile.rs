//! profile.rs
//!
//! История покупок в личном кабинете. Список загружается при открытии
//! и по кнопке обновления; успешный ответ заменяет список целиком,
//! ошибка оставляет прежний. Ответ, пришедший после закрытия кабинета,
//! отбрасывается по порядковому номеру запроса.

use tracing::debug;

use crate::error::AppError;
use crate::models::Order;
use crate::services::OrdersApiClient;

#[derive(Debug, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
    is_open: bool,
    request_seq: u64,
}

impl OrderHistory {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.request_seq += 1;
    }

    fn begin_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    /// Заменяет список целиком. false — ответ опоздал и отброшен.
    pub fn apply_loaded(&mut self, seq: u64, orders: Vec<Order>) -> bool {
        if !self.is_open || self.request_seq != seq {
            debug!("Dropping stale orders response");
            return false;
        }
        self.orders = orders;
        true
    }

    /// Загрузка истории. Без токена — ничего не делает. Повторный
    /// вызов (ручное обновление) идемпотентен.
    pub async fn load(
        &mut self,
        session_token: Option<&str>,
        api: &OrdersApiClient,
    ) -> Result<bool, AppError> {
        let token = match session_token {
            Some(token) => token,
            None => return Ok(false),
        };

        let seq = self.begin_request();
        let orders = api.fetch_orders(token).await?;
        Ok(self.apply_loaded(seq, orders))
    }
}
