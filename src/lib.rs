pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod flows;

// Shared state для всего приложения: конфигурация и клиенты двух
// внешних API. Изменяемое состояние (сессия, формы) живет в цикле UI.
pub struct AppState {
    pub config: config::Config,
    pub auth_api: services::AuthApiClient,
    pub orders_api: services::OrdersApiClient,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let auth_api = services::AuthApiClient::from_config(&config.api);
        let orders_api = services::OrdersApiClient::from_config(&config.api);
        Self {
            config,
            auth_api,
            orders_api,
        }
    }
}
