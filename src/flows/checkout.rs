//! checkout.rs
//!
//! Форма покупки: выбранный сеанс плюс состояние выбора мест.
//! Отправка заказа требует активной сессии; без нее интерфейс
//! открывает диалог входа и повторяет попытку.

use tracing::info;

use crate::config::MovieConfig;
use crate::error::AppError;
use crate::flows::seats::SelectionState;
use crate::models::order::TICKET_PRICE;
use crate::models::{Order, Showtime};
use crate::services::orders::CreateOrderRequest;
use crate::services::OrdersApiClient;

/// Подтверждение покупки для показа пользователю.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseConfirmation {
    pub seats: Vec<u32>,
    pub ticket_count: u32,
    pub total_price: i64,
    /// Заказ, как его записал сервер (если сервер его вернул)
    pub order: Option<Order>,
}

#[derive(Debug, Default)]
pub struct BookingForm {
    pub selection: SelectionState,
    selected_time: Option<String>,
}

impl BookingForm {
    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    /// Выбор сеанса. Распроданные и неизвестные сеансы выбрать нельзя.
    pub fn select_showtime(&mut self, schedule: &[Showtime], time: &str) -> Result<(), AppError> {
        let showtime = schedule
            .iter()
            .find(|s| s.time == time)
            .ok_or_else(|| AppError::validation("Такого сеанса нет в расписании"))?;

        if !showtime.available {
            return Err(AppError::validation("На этот сеанс билетов нет"));
        }

        self.selected_time = Some(showtime.time.clone());
        Ok(())
    }

    /// Отправка заказа.
    ///
    /// Порядок проверок: сначала сессия, затем локальная валидация —
    /// и только потом сетевой вызов. Итоговая цена считается здесь:
    /// число билетов умножить на фиксированные 500 ₽.
    /// При успехе выбор мест и счетчик билетов сбрасываются.
    pub async fn submit(
        &mut self,
        session_token: Option<&str>,
        api: &OrdersApiClient,
        movie: &MovieConfig,
    ) -> Result<PurchaseConfirmation, AppError> {
        let token = session_token.ok_or(AppError::AuthRequired)?;

        let showtime = self
            .selected_time
            .clone()
            .ok_or_else(|| AppError::validation("Выберите время сеанса"))?;

        if self.selection.is_empty() {
            return Err(AppError::validation("Выберите места в зале"));
        }

        let seats = self.selection.selected().to_vec();
        let ticket_count = self.selection.ticket_count();
        let total_price = i64::from(ticket_count) * TICKET_PRICE;

        let order = api
            .create_order(
                token,
                &CreateOrderRequest {
                    movie_title: &movie.title,
                    showtime: &showtime,
                    show_date: movie.show_date,
                    seats: &seats,
                    ticket_count,
                    total_price,
                },
            )
            .await?;

        info!(
            "Order placed: showtime={}, seats={:?}, total={}",
            showtime, seats, total_price
        );
        self.selection.clear();

        Ok(PurchaseConfirmation {
            seats,
            ticket_count,
            total_price,
            order,
        })
    }
}
