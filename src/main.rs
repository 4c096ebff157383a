use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rubin_tickets::{
    config::Config,
    error::AppError,
    flows::checkout::PurchaseConfirmation,
    flows::seats::{SeatToggle, SelectionState, MAX_TICKETS, MIN_TICKETS},
    flows::{auth::AuthStep, AuthFlow, BookingForm, OrderHistory},
    models::order::TICKET_PRICE,
    models::showtime::premiere_schedule,
    models::{seat, Hall, Order, Showtime},
    session::SessionStore,
    AppState,
};

type Input = Lines<BufReader<tokio::io::Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rubin tickets client");

    let session = SessionStore::load(config.session.file_path.clone());
    let state = AppState::new(config);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    run(&state, session, &mut input).await
}

async fn run(state: &AppState, mut session: SessionStore, input: &mut Input) -> Result<()> {
    let movie = &state.config.movie;
    let hall = Hall::premiere();
    let schedule = premiere_schedule();

    let mut form = BookingForm::default();
    let mut auth = AuthFlow::default();
    let mut history = OrderHistory::default();

    println!();
    println!("{} • Премьера «{}»", movie.venue, movie.title);
    println!("{} • {} ₽ за билет", format_date_ru(movie.show_date), TICKET_PRICE);

    loop {
        println!();
        match session.user() {
            Some(user) => println!("В аккаунте: {} ({})", user.display_name(), user.phone),
            None => println!("Вы не вошли в аккаунт"),
        }
        println!("1) Расписание сеансов");
        println!("2) Выбор мест");
        println!("3) Купить билет");
        println!("4) Личный кабинет");
        if session.is_authenticated() {
            println!("5) Выйти из аккаунта");
        } else {
            println!("5) Вход по номеру телефона");
        }
        println!("0) Выход");

        let Some(choice) = prompt(input, "Пункт меню:").await? else {
            break;
        };

        match choice.as_str() {
            "1" => pick_showtime(&mut form, &schedule, input).await?,
            "2" => pick_seats(&mut form, &hall, input).await?,
            "3" => buy(&mut form, &mut auth, &mut session, state, input).await?,
            "4" => show_profile(&mut history, &session, state, input).await?,
            "5" => {
                if session.is_authenticated() {
                    session.clear();
                    println!("Вы вышли из аккаунта");
                } else {
                    run_auth_dialog(&mut auth, &mut session, state, input).await?;
                }
            }
            "0" => break,
            "" => {}
            other => println!("Нет такого пункта: {}", other),
        }
    }

    println!("До встречи на премьере!");
    Ok(())
}

/* ---------- Расписание ---------- */

async fn pick_showtime(
    form: &mut BookingForm,
    schedule: &[Showtime],
    input: &mut Input,
) -> Result<()> {
    println!("\nРасписание сеансов:");
    for showtime in schedule {
        let mark = if form.selected_time() == Some(showtime.time.as_str()) {
            ">"
        } else {
            " "
        };
        let label = if showtime.available {
            "доступно"
        } else {
            "продано"
        };
        println!(" {} {} — {}", mark, showtime.time, label);
    }

    let Some(time) = prompt(input, "Время сеанса (Enter — назад):").await? else {
        return Ok(());
    };
    if time.is_empty() {
        return Ok(());
    }

    match form.select_showtime(schedule, &time) {
        Ok(()) => println!("✅ Сеанс {} выбран", time),
        Err(e) => println!("❌ {}", e),
    }
    Ok(())
}

/* ---------- Зал ---------- */

async fn pick_seats(form: &mut BookingForm, hall: &Hall, input: &mut Input) -> Result<()> {
    loop {
        render_hall(hall, &form.selection);
        println!(
            "Билетов: {} (от {} до {}) • Выбрано мест: {}",
            form.selection.ticket_count(),
            MIN_TICKETS,
            MAX_TICKETS,
            seat_list(form.selection.selected())
        );

        let Some(cmd) =
            prompt(input, "Номер места, 'б N' — число билетов, Enter — назад:").await?
        else {
            return Ok(());
        };
        if cmd.is_empty() {
            return Ok(());
        }

        if let Some(rest) = cmd.strip_prefix('б').or_else(|| cmd.strip_prefix('b')) {
            match rest.trim().parse::<u32>() {
                Ok(n) => form.selection.set_ticket_count(n),
                Err(_) => println!("❌ Укажите число билетов, например: б 2"),
            }
            continue;
        }

        match cmd.parse::<u32>() {
            Ok(number) => match form.selection.toggle_seat(hall, number) {
                SeatToggle::Selected => println!("✅ Место {} выбрано", seat_label(number)),
                SeatToggle::Deselected => println!(
                    "Место {} снято, билетов теперь {}",
                    seat_label(number),
                    form.selection.ticket_count()
                ),
                SeatToggle::Occupied => println!("❌ Место {} уже занято", seat_label(number)),
                SeatToggle::SelectionFull => println!(
                    "❌ Уже выбрано {} мест — увеличьте число билетов",
                    form.selection.selected().len()
                ),
                SeatToggle::UnknownSeat => println!("❌ В зале нет места с номером {}", number),
            },
            Err(_) => println!("❌ Не понял команду: {}", cmd),
        }
    }
}

fn render_hall(hall: &Hall, selection: &SelectionState) {
    println!("\n              ЭКРАН");
    println!("  {}", "─".repeat(42));
    for row in 0..seat::ROWS {
        let first = row * seat::SEATS_PER_ROW + 1;
        let mut line = format!("{}  ", seat::row_letter(first));
        for s in 0..seat::SEATS_PER_ROW {
            let number = first + s;
            let cell = if hall.is_occupied(number) {
                "  × ".to_string()
            } else if selection.is_selected(number) {
                format!("[{:>2}]", number)
            } else {
                format!(" {:>2} ", number)
            };
            line.push_str(&cell);
        }
        println!("{}", line);
    }
    println!("  × — занято, [n] — выбрано");
}

/* ---------- Покупка ---------- */

async fn buy(
    form: &mut BookingForm,
    auth: &mut AuthFlow,
    session: &mut SessionStore,
    state: &AppState,
    input: &mut Input,
) -> Result<()> {
    let movie = &state.config.movie;

    println!("\nПокупка билета");
    println!("  Фильм:  {}", movie.title);
    println!(
        "  Время:  {}",
        form.selected_time().unwrap_or("не выбрано")
    );
    println!("  Дата:   {}", format_date_ru(movie.show_date));
    println!("  Места:  {}", seat_list(form.selection.selected()));
    println!(
        "  Итого:  {} ₽",
        i64::from(form.selection.ticket_count()) * TICKET_PRICE
    );

    let Some(answer) = prompt(input, "Подтвердить покупку? (д/н):").await? else {
        return Ok(());
    };
    if !matches!(answer.to_lowercase().as_str(), "д" | "да" | "y" | "yes") {
        println!("Покупка отменена");
        return Ok(());
    }

    let result = form
        .submit(session.token(), &state.orders_api, movie)
        .await;

    match result {
        Err(AppError::AuthRequired) => {
            println!("Требуется авторизация — войдите, чтобы продолжить");
            run_auth_dialog(auth, session, state, input).await?;
            if session.is_authenticated() {
                let retry = form
                    .submit(session.token(), &state.orders_api, movie)
                    .await;
                report_purchase(retry);
            }
        }
        other => report_purchase(other),
    }
    Ok(())
}

fn report_purchase(result: std::result::Result<PurchaseConfirmation, AppError>) {
    match result {
        Ok(confirmation) => {
            println!("✅ Вы успешно купили билет!");
            println!(
                "Места: {} • Билетов: {} • Итого: {} ₽",
                seat_list(&confirmation.seats),
                confirmation.ticket_count,
                confirmation.total_price
            );
            if let Some(order) = confirmation.order {
                println!("Номер заказа: {} ({})", order.id, order.status_label());
            }
        }
        Err(e) => println!("❌ {}", e),
    }
}

/* ---------- Вход ---------- */

async fn run_auth_dialog(
    auth: &mut AuthFlow,
    session: &mut SessionStore,
    state: &AppState,
    input: &mut Input,
) -> Result<()> {
    auth.open();
    println!("\nВход в аккаунт");

    while auth.is_open() {
        match auth.step() {
            AuthStep::PhoneEntry => {
                let Some(phone) =
                    prompt(input, "Номер телефона, например +79991234567 (Enter — отмена):")
                        .await?
                else {
                    auth.close();
                    break;
                };
                if phone.is_empty() {
                    auth.close();
                    break;
                }
                auth.phone = phone;

                match auth.request_code(&state.auth_api).await {
                    Ok(_) => {
                        println!("✅ Код отправлен!");
                        if let Some(code) = auth.dev_code() {
                            println!("Демо-режим: ваш код {}", code);
                        }
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }
            AuthStep::CodeEntry => {
                let Some(code) = prompt(input, "Код из SMS ('н' — назад):").await? else {
                    auth.close();
                    break;
                };
                if code == "н" || code == "назад" {
                    auth.go_back();
                    continue;
                }
                auth.code = code;

                let Some(name) = prompt(input, "Ваше имя (необязательно):").await? else {
                    auth.close();
                    break;
                };
                auth.name = name;

                match auth.verify_code(&state.auth_api).await {
                    Ok(Some((user, token))) => {
                        session.save(user, token);
                        println!("✅ Вы успешно вошли!");
                    }
                    Ok(None) => {}
                    Err(e) => println!("❌ {}", e),
                }
            }
        }
    }
    Ok(())
}

/* ---------- Личный кабинет ---------- */

async fn show_profile(
    history: &mut OrderHistory,
    session: &SessionStore,
    state: &AppState,
    input: &mut Input,
) -> Result<()> {
    let Some(user) = session.user() else {
        println!("Войдите в аккаунт, чтобы открыть личный кабинет");
        return Ok(());
    };

    println!("\nЛичный кабинет");
    println!("  {} • {}", user.display_name(), user.phone);

    history.open();
    load_orders(history, session, state).await;

    loop {
        let Some(cmd) = prompt(input, "'о' — обновить историю, Enter — закрыть:").await? else {
            break;
        };
        match cmd.as_str() {
            "о" | "r" => load_orders(history, session, state).await,
            _ => break,
        }
    }

    history.close();
    Ok(())
}

async fn load_orders(history: &mut OrderHistory, session: &SessionStore, state: &AppState) {
    match history.load(session.token(), &state.orders_api).await {
        Ok(true) => print_orders(history.orders()),
        Ok(false) => {}
        // Прежний список остается как был
        Err(e) => println!("❌ {}", e),
    }
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("У вас пока нет покупок — забронируйте билеты на премьеру!");
        return;
    }

    println!("История покупок:");
    for order in orders {
        let date = order
            .show_date
            .map(format_date_ru)
            .unwrap_or_else(|| "—".to_string());
        println!(
            "  #{} {} • {} {} • {}",
            order.id,
            order.movie_title,
            date,
            order.showtime,
            order.status_label()
        );
        println!(
            "      Билеты: {} шт. • Места: {} • Сумма: {} ₽",
            order.ticket_count, order.seats, order.total_price
        );
        if let Some(created) = order.created_at {
            println!("      Куплено: {}", format_datetime_ru(created));
        }
    }
}

/* ---------- helpers ---------- */

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    print!("{} ", text);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

fn seat_label(number: u32) -> String {
    format!("{}{}", seat::row_letter(number), seat::seat_in_row(number))
}

fn seat_list(seats: &[u32]) -> String {
    if seats.is_empty() {
        return "не выбраны".to_string();
    }
    seats
        .iter()
        .map(|&n| seat_label(n))
        .collect::<Vec<_>>()
        .join(", ")
}

const MONTHS_RU: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

fn format_date_ru(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_RU[date.month0() as usize],
        date.year()
    )
}

fn format_datetime_ru(datetime: NaiveDateTime) -> String {
    format!(
        "{} {} {:02}:{:02}",
        datetime.day(),
        MONTHS_RU[datetime.month0() as usize],
        datetime.hour(),
        datetime.minute()
    )
}
