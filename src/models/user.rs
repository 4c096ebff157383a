use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub name: Option<String>,
}

impl User {
    // Имя для отображения: у пользователя без имени показываем "Гость"
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Гость")
    }
}
