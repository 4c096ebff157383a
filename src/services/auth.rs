//! auth.rs
//!
//! Клиент внешнего auth API: SMS-верификация по номеру телефона.
//!
//! Эндпоинт принимает POST с полем `action` и отвечает JSON с флагом
//! `success`. Бэкенд работает в демо-режиме: вместо отправки SMS код
//! возвращается в поле `dev_code`, и клиент показывает его пользователю.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::User;

// --- Модели данных auth API ---

#[derive(Debug, Serialize)]
struct SendCodeRequest<'a> {
    action: &'static str,
    phone: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SendCodeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub dev_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
struct VerifyCodeRequest<'a> {
    action: &'static str,
    phone: &'a str,
    code: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyCodeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    session_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Клиент auth API
#[derive(Clone)]
pub struct AuthApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl AuthApiClient {
    /// Создает и конфигурирует клиент на основе настроек приложения.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            base_url: config.auth_url.clone(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Запрашивает код подтверждения для номера телефона.
    pub async fn send_code(&self, phone: &str) -> Result<SendCodeResponse, AppError> {
        info!("Requesting verification code for {}", phone);

        let response = self
            .http_client
            .post(&self.base_url)
            .json(&SendCodeRequest {
                action: "send_code",
                phone,
            })
            .send()
            .await?;

        let status = response.status();
        let body: SendCodeResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                tracing::error!("send_code failed with status {}: {:?}", status, e);
                return Err(AppError::Remote(format!("Сервер вернул ошибку {}", status)));
            }
            Err(e) => return Err(AppError::Network(e)),
        };

        if !body.success {
            let message = body
                .error
                .unwrap_or_else(|| "Ошибка отправки кода".to_string());
            return Err(AppError::Remote(message));
        }

        Ok(body)
    }

    /// Проверяет код и возвращает пользователя с токеном сессии.
    /// Имя опционально: бэкенд заполняет его в профиле при первом входе.
    pub async fn verify_code(
        &self,
        phone: &str,
        code: &str,
        name: &str,
    ) -> Result<(User, String), AppError> {
        info!("Verifying code for {}", phone);

        let response = self
            .http_client
            .post(&self.base_url)
            .json(&VerifyCodeRequest {
                action: "verify_code",
                phone,
                code,
                name,
            })
            .send()
            .await?;

        let status = response.status();
        let body: VerifyCodeResponse = match response.json().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                tracing::error!("verify_code failed with status {}: {:?}", status, e);
                return Err(AppError::Remote(format!("Сервер вернул ошибку {}", status)));
            }
            Err(e) => return Err(AppError::Network(e)),
        };

        if !body.success {
            let message = body.error.unwrap_or_else(|| "Неверный код".to_string());
            return Err(AppError::Remote(message));
        }

        match (body.user, body.session_token) {
            (Some(user), Some(token)) => Ok((user, token)),
            _ => Err(AppError::Remote("Некорректный ответ сервера".to_string())),
        }
    }
}
