use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub time: String,
    pub available: bool,
}

impl Showtime {
    fn new(time: &str, available: bool) -> Self {
        Self {
            time: time.to_string(),
            available,
        }
    }
}

// Расписание премьерного дня. Каталог статический: сеансы на один день,
// последний сеанс распродан.
pub fn premiere_schedule() -> Vec<Showtime> {
    vec![
        Showtime::new("12:00", true),
        Showtime::new("15:30", true),
        Showtime::new("18:00", true),
        Showtime::new("21:00", true),
        Showtime::new("23:30", false),
    ]
}
