use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// Цена билета фиксированная для всей премьеры
pub const TICKET_PRICE: i64 = 500;

// Заказ в том виде, в котором его возвращает orders API. Поля id,
// status и created_at назначает сервер, клиент их не меняет.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub movie_title: String,
    pub showtime: String,
    pub show_date: Option<NaiveDate>,
    // Сервер хранит места строкой вида "1,2,5"
    pub seats: String,
    pub ticket_count: u32,
    pub total_price: i64,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn status_label(&self) -> &str {
        match self.status.as_str() {
            "confirmed" => "Подтверждено",
            other => other,
        }
    }
}
