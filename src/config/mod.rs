use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub movie: MovieConfig,
    pub session: SessionConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
}

// Адреса внешних API (auth и orders — два независимых эндпоинта)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub auth_url: String,
    pub orders_url: String,
    pub timeout_seconds: u64,
}

// Данные премьеры. Сеансы и зал — статический каталог в models.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieConfig {
    pub title: String,
    pub venue: String,
    pub show_date: NaiveDate,
}

// Настройки локального хранилища сессии
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub file_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "rubin_tickets=info".to_string()),
            },
            api: ApiConfig {
                auth_url: env::var("AUTH_API_URL").unwrap_or_else(|_| {
                    "https://functions.poehali.dev/8ea29647-df1f-4b6f-a43d-23016d262ee7"
                        .to_string()
                }),
                orders_url: env::var("ORDERS_API_URL").unwrap_or_else(|_| {
                    "https://functions.poehali.dev/dfffafd3-1730-44a3-a8d2-53828b391cc0"
                        .to_string()
                }),
                timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("HTTP_TIMEOUT_SECONDS must be a valid number"),
            },
            movie: MovieConfig {
                title: env::var("MOVIE_TITLE")
                    .unwrap_or_else(|_| "Мотоцикл в окне 1".to_string()),
                venue: env::var("CINEMA_NAME")
                    .unwrap_or_else(|_| "Кинотеатр Рубин".to_string()),
                show_date: env::var("SHOW_DATE")
                    .unwrap_or_else(|_| "2026-01-01".to_string())
                    .parse()
                    .expect("SHOW_DATE must be a date in YYYY-MM-DD format"),
            },
            session: SessionConfig {
                file_path: env::var("SESSION_FILE")
                    .unwrap_or_else(|_| ".rubin_session.json".to_string())
                    .into(),
            },
        }
    }
}
