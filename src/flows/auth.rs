//! auth.rs
//!
//! Двухшаговый вход по номеру телефона: запрос кода, затем проверка.
//!
//! Переходы состояния — чистые функции `apply_*`. Каждый сетевой вызов
//! получает порядковый номер; ответ применяется только если диалог все
//! еще открыт и номер актуален. Так закрытие диалога или «Назад»
//! просто отбрасывает опоздавший ответ, ничего не отменяя.

use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;
use crate::models::User;
use crate::services::AuthApiClient;

#[derive(Debug, Validate)]
struct PhoneInput {
    #[validate(length(min = 10, message = "Введите корректный номер телефона"))]
    phone: String,
}

#[derive(Debug, Validate)]
struct CodeInput {
    #[validate(length(equal = 6, message = "Введите 6-значный код"))]
    code: String,
}

fn first_message(errors: &ValidationErrors, fallback: &str) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref())
        .next()
        .map(|m| m.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    PhoneEntry,
    CodeEntry,
}

#[derive(Debug)]
pub struct AuthFlow {
    step: AuthStep,
    pub phone: String,
    pub code: String,
    pub name: String,
    dev_code: Option<String>,
    is_open: bool,
    request_seq: u64,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self {
            step: AuthStep::PhoneEntry,
            phone: String::new(),
            code: String::new(),
            name: String::new(),
            dev_code: None,
            is_open: false,
            request_seq: 0,
        }
    }
}

impl AuthFlow {
    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Код, который бэкенд вернул вместо отправки SMS (демо-режим).
    pub fn dev_code(&self) -> Option<&str> {
        self.dev_code.as_deref()
    }

    pub fn open(&mut self) {
        self.reset_fields();
        self.is_open = true;
    }

    /// Закрытие диалога. Поля не трогаем, но поднимаем порядковый
    /// номер: ответ на запрос, ушедший до закрытия, будет отброшен.
    pub fn close(&mut self) {
        self.is_open = false;
        self.request_seq += 1;
    }

    /// «Назад» со второго шага: очищает код и демо-код.
    pub fn go_back(&mut self) {
        self.step = AuthStep::PhoneEntry;
        self.code.clear();
        self.dev_code = None;
        self.request_seq += 1;
    }

    fn reset_fields(&mut self) {
        self.step = AuthStep::PhoneEntry;
        self.phone.clear();
        self.code.clear();
        self.name.clear();
        self.dev_code = None;
    }

    pub fn validate_phone(&self) -> Result<(), AppError> {
        let input = PhoneInput {
            phone: self.phone.trim().to_string(),
        };
        input.validate().map_err(|errs| {
            AppError::Validation(first_message(&errs, "Введите корректный номер телефона"))
        })
    }

    pub fn validate_code(&self) -> Result<(), AppError> {
        let input = CodeInput {
            code: self.code.trim().to_string(),
        };
        input
            .validate()
            .map_err(|errs| AppError::Validation(first_message(&errs, "Введите 6-значный код")))
    }

    fn begin_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    fn is_current(&self, seq: u64) -> bool {
        self.is_open && self.request_seq == seq
    }

    /// Применяет ответ на запрос кода. Возвращает false для
    /// опоздавшего ответа (диалог закрыт или был нажат «Назад»).
    pub fn apply_code_sent(&mut self, seq: u64, dev_code: Option<String>) -> bool {
        if !self.is_current(seq) {
            debug!("Dropping stale send_code response");
            return false;
        }
        self.step = AuthStep::CodeEntry;
        self.dev_code = dev_code;
        true
    }

    /// Применяет успешную проверку кода: закрывает диалог, сбрасывает
    /// поля и отдает пользователя с токеном. None — ответ опоздал.
    pub fn apply_verified(&mut self, seq: u64, user: User, token: String) -> Option<(User, String)> {
        if !self.is_current(seq) {
            debug!("Dropping stale verify_code response");
            return None;
        }
        self.reset_fields();
        self.is_open = false;
        Some((user, token))
    }

    /// Шаг 1: валидация и запрос кода. При ошибке валидации сетевой
    /// вызов не делается, диалог остается на вводе телефона.
    pub async fn request_code(&mut self, api: &AuthApiClient) -> Result<Option<String>, AppError> {
        self.validate_phone()?;

        let seq = self.begin_request();
        let phone = self.phone.trim().to_string();
        let response = api.send_code(&phone).await?;

        if self.apply_code_sent(seq, response.dev_code) {
            Ok(self.dev_code.clone())
        } else {
            Ok(None)
        }
    }

    /// Шаг 2: валидация и проверка кода. Успех закрывает диалог;
    /// отказ сервера оставляет его на вводе кода.
    pub async fn verify_code(
        &mut self,
        api: &AuthApiClient,
    ) -> Result<Option<(User, String)>, AppError> {
        self.validate_code()?;

        let seq = self.begin_request();
        let phone = self.phone.trim().to_string();
        let code = self.code.trim().to_string();
        let name = self.name.trim().to_string();
        let (user, token) = api.verify_code(&phone, &code, &name).await?;

        Ok(self.apply_verified(seq, user, token))
    }
}
