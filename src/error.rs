use thiserror::Error;

/// Ошибки клиента. Любая из них не фатальна: интерфейс возвращается
/// в состояние до действия и показывает сообщение пользователю.
#[derive(Debug, Error)]
pub enum AppError {
    /// Некорректный локальный ввод (телефон, код, пустой выбор мест).
    #[error("{0}")]
    Validation(String),

    /// Действие требует активной сессии.
    #[error("Требуется авторизация")]
    AuthRequired,

    /// Сервер ответил ошибкой (не-2xx или success=false).
    /// Сообщение сервера показывается как есть.
    #[error("{0}")]
    Remote(String),

    /// Транспортная ошибка — показываем общее сообщение.
    #[error("Ошибка соединения с сервером")]
    Network(#[from] reqwest::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
