//! seats.rs
//!
//! Состояние выбора мест. Чистая машина состояний без сети и рендера:
//! все переходы — обычные функции, их можно тестировать напрямую.
//!
//! Инварианты:
//! 1. Выбрано не больше мест, чем билетов (`selected.len() <= ticket_count`).
//! 2. Занятые места и дубликаты в выбор не попадают.
//! 3. Счетчик билетов всегда в пределах 1..=6.

use crate::models::Hall;

pub const MIN_TICKETS: u32 = 1;
pub const MAX_TICKETS: u32 = 6;

/// Результат клика по месту — интерфейс по нему решает, что показать.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatToggle {
    Selected,
    Deselected,
    /// Занятое место: клик игнорируется
    Occupied,
    /// Выбрано уже столько мест, сколько билетов
    SelectionFull,
    /// Номер вне зала
    UnknownSeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    ticket_count: u32,
    // Порядок вставки важен: при уменьшении числа билетов
    // остаются первые выбранные места
    selected: Vec<u32>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            ticket_count: MIN_TICKETS,
            selected: Vec::new(),
        }
    }
}

impl SelectionState {
    pub fn ticket_count(&self) -> u32 {
        self.ticket_count
    }

    pub fn selected(&self) -> &[u32] {
        &self.selected
    }

    pub fn is_selected(&self, number: u32) -> bool {
        self.selected.contains(&number)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Меняет число билетов. Значение зажимается в 1..=6; если мест
    /// выбрано больше нового лимита, выбор усекается до первых `n`.
    pub fn set_ticket_count(&mut self, n: u32) {
        self.ticket_count = n.clamp(MIN_TICKETS, MAX_TICKETS);
        if self.selected.len() > self.ticket_count as usize {
            self.selected.truncate(self.ticket_count as usize);
        }
    }

    /// Клик по месту.
    ///
    /// Правило снятия: отмена выбранного места также уменьшает счетчик
    /// билетов (не ниже 1). Это намеренная связка выбора и счетчика,
    /// а не побочный эффект.
    pub fn toggle_seat(&mut self, hall: &Hall, number: u32) -> SeatToggle {
        if !hall.contains(number) {
            return SeatToggle::UnknownSeat;
        }
        if hall.is_occupied(number) {
            return SeatToggle::Occupied;
        }

        if let Some(pos) = self.selected.iter().position(|&n| n == number) {
            self.selected.remove(pos);
            self.ticket_count = (self.ticket_count - 1).max(MIN_TICKETS);
            return SeatToggle::Deselected;
        }

        if self.selected.len() >= self.ticket_count as usize {
            return SeatToggle::SelectionFull;
        }

        self.selected.push(number);
        SeatToggle::Selected
    }

    /// Сброс после успешной покупки.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.ticket_count = MIN_TICKETS;
    }
}
