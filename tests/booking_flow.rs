//! Интеграционные тесты клиента против замоканных внешних API.

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rubin_tickets::config::{ApiConfig, AppConfig, Config, MovieConfig, SessionConfig};
use rubin_tickets::error::AppError;
use rubin_tickets::flows::auth::AuthStep;
use rubin_tickets::flows::{AuthFlow, BookingForm, OrderHistory};
use rubin_tickets::models::showtime::premiere_schedule;
use rubin_tickets::models::Hall;
use rubin_tickets::AppState;

fn test_state(server_uri: &str) -> AppState {
    AppState::new(Config {
        app: AppConfig {
            rust_log: "rubin_tickets=debug".to_string(),
        },
        api: ApiConfig {
            auth_url: format!("{}/auth", server_uri),
            orders_url: format!("{}/orders", server_uri),
            timeout_seconds: 5,
        },
        movie: MovieConfig {
            title: "Мотоцикл в окне 1".to_string(),
            venue: "Кинотеатр Рубин".to_string(),
            show_date: "2026-01-01".parse().unwrap(),
        },
        session: SessionConfig {
            file_path: std::env::temp_dir().join("rubin_tickets_test_session.json"),
        },
    })
}

#[tokio::test]
async fn full_purchase_flow_computes_total_and_clears_selection() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_partial_json(json!({"action": "send_code"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Код отправлен на номер +79991234567",
            "dev_code": "123456"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_partial_json(json!({"action": "verify_code", "code": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {"id": 1, "phone": "+79991234567", "name": null},
            "session_token": "1:+79991234567:111111"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Тело заказа проверяется целиком: итог 2 * 500 = 1000
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("X-Session-Token", "1:+79991234567:111111"))
        .and(body_json(json!({
            "movie_title": "Мотоцикл в окне 1",
            "showtime": "18:00",
            "show_date": "2026-01-01",
            "seats": [1, 2],
            "ticket_count": 2,
            "total_price": 1000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "order": {
                "id": 7,
                "movie_title": "Мотоцикл в окне 1",
                "showtime": "18:00",
                "show_date": "2026-01-01",
                "seats": "1,2",
                "ticket_count": 2,
                "total_price": 1000,
                "status": "confirmed",
                "created_at": "2025-12-20T14:31:07.123456"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Вход
    let mut auth = AuthFlow::default();
    auth.open();
    auth.phone = "+79991234567".to_string();
    let dev_code = auth.request_code(&state.auth_api).await.unwrap();
    assert_eq!(dev_code.as_deref(), Some("123456"));
    assert_eq!(auth.step(), AuthStep::CodeEntry);

    auth.code = "123456".to_string();
    let (user, token) = auth
        .verify_code(&state.auth_api)
        .await
        .unwrap()
        .expect("verified response must be applied");
    assert_eq!(user.id, 1);
    assert!(!auth.is_open());

    // Покупка: сеанс 18:00, два билета, места 1 и 2
    let hall = Hall::premiere();
    let mut form = BookingForm::default();
    form.select_showtime(&premiere_schedule(), "18:00").unwrap();
    form.selection.set_ticket_count(2);
    form.selection.toggle_seat(&hall, 1);
    form.selection.toggle_seat(&hall, 2);

    let confirmation = form
        .submit(Some(&token), &state.orders_api, &state.config.movie)
        .await
        .unwrap();

    assert_eq!(confirmation.total_price, 1000);
    assert_eq!(confirmation.seats, vec![1, 2]);
    assert_eq!(confirmation.order.as_ref().map(|o| o.id), Some(7));

    // После успеха выбор сброшен
    assert!(form.selection.is_empty());
    assert_eq!(form.selection.ticket_count(), 1);
}

#[tokio::test]
async fn short_phone_fails_validation_without_network_call() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let mut auth = AuthFlow::default();
    auth.open();
    auth.phone = "123".to_string();

    let err = auth.request_code(&state.auth_api).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(auth.step(), AuthStep::PhoneEntry);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn five_digit_code_fails_validation_without_network_call() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let mut auth = AuthFlow::default();
    auth.open();
    auth.phone = "+79991234567".to_string();
    auth.code = "12345".to_string();

    let err = auth.verify_code(&state.auth_api).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Некорректный номер телефона"})),
        )
        .mount(&server)
        .await;

    let mut auth = AuthFlow::default();
    auth.open();
    auth.phone = "+7000000000".to_string();

    let err = auth.request_code(&state.auth_api).await.unwrap_err();
    match err {
        AppError::Remote(message) => assert_eq!(message, "Некорректный номер телефона"),
        other => panic!("expected Remote error, got {:?}", other),
    }
    // Диалог остался на вводе телефона
    assert_eq!(auth.step(), AuthStep::PhoneEntry);
}

#[tokio::test]
async fn rejected_code_keeps_code_entry_step() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_partial_json(json!({"action": "send_code"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "dev_code": "123456"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_partial_json(json!({"action": "verify_code"})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Неверный код или код истек"})),
        )
        .mount(&server)
        .await;

    let mut auth = AuthFlow::default();
    auth.open();
    auth.phone = "+79991234567".to_string();
    auth.request_code(&state.auth_api).await.unwrap();

    auth.code = "654321".to_string();
    let err = auth.verify_code(&state.auth_api).await.unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));
    assert_eq!(auth.step(), AuthStep::CodeEntry);
    assert!(auth.is_open());
}

#[tokio::test]
async fn order_history_replaces_list_wholesale() {
    let server = MockServer::start().await;
    let state = test_state(&server.uri());

    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(header("X-Session-Token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [
                {
                    "id": 2,
                    "movie_title": "Мотоцикл в окне 1",
                    "showtime": "21:00",
                    "show_date": "2026-01-01",
                    "seats": "5",
                    "ticket_count": 1,
                    "total_price": 500,
                    "status": "confirmed",
                    "created_at": "2025-12-21T09:00:00"
                }
            ]
        })))
        .mount(&server)
        .await;

    let mut history = OrderHistory::default();
    history.open();

    assert!(history.load(Some("tok"), &state.orders_api).await.unwrap());
    assert_eq!(history.orders().len(), 1);
    assert_eq!(history.orders()[0].id, 2);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_orders() {
    let good = MockServer::start().await;
    let bad = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{
                "id": 1,
                "movie_title": "Мотоцикл в окне 1",
                "showtime": "12:00",
                "show_date": "2026-01-01",
                "seats": "1",
                "ticket_count": 1,
                "total_price": 500,
                "status": "confirmed",
                "created_at": null
            }]
        })))
        .mount(&good)
        .await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Ошибка загрузки заказов"})),
        )
        .mount(&bad)
        .await;

    let mut history = OrderHistory::default();
    history.open();

    let good_state = test_state(&good.uri());
    assert!(history
        .load(Some("tok"), &good_state.orders_api)
        .await
        .unwrap());
    assert_eq!(history.orders().len(), 1);

    let bad_state = test_state(&bad.uri());
    let err = history
        .load(Some("tok"), &bad_state.orders_api)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));
    assert_eq!(history.orders().len(), 1, "prior list must stay intact");
}

#[tokio::test]
async fn transport_failure_shows_generic_message() {
    // Ничего не слушает: чистая транспортная ошибка
    let state = test_state("http://127.0.0.1:9");

    let mut history = OrderHistory::default();
    history.open();

    let err = history
        .load(Some("tok"), &state.orders_api)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(err.to_string(), "Ошибка соединения с сервером");
}
