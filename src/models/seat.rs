use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const ROWS: u32 = 5;
pub const SEATS_PER_ROW: u32 = 10;
pub const CAPACITY: u32 = ROWS * SEATS_PER_ROW;

const ROW_LETTERS: [char; ROWS as usize] = ['A', 'B', 'C', 'D', 'E'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub number: u32,
    pub row: char,
    pub seat_in_row: u32,
    pub occupied: bool,
}

// План зала на сеанс. Занятость — фиксированный набор на время сессии,
// покупки других клиентов его не меняют.
#[derive(Debug, Clone)]
pub struct Hall {
    occupied: BTreeSet<u32>,
}

impl Hall {
    pub fn new(occupied: impl IntoIterator<Item = u32>) -> Self {
        Self {
            occupied: occupied
                .into_iter()
                .filter(|n| (1..=CAPACITY).contains(n))
                .collect(),
        }
    }

    // Демо-набор занятых мест премьерного зала
    pub fn premiere() -> Self {
        Self::new([3, 7, 12, 18, 24, 25, 31, 38, 42, 45])
    }

    pub fn contains(&self, number: u32) -> bool {
        (1..=CAPACITY).contains(&number)
    }

    pub fn is_occupied(&self, number: u32) -> bool {
        self.occupied.contains(&number)
    }

    pub fn seat(&self, number: u32) -> Option<Seat> {
        if !self.contains(number) {
            return None;
        }
        Some(Seat {
            number,
            row: row_letter(number),
            seat_in_row: seat_in_row(number),
            occupied: self.is_occupied(number),
        })
    }

    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (1..=CAPACITY).filter_map(|n| self.seat(n))
    }
}

// Ряды идут подряд по 10 мест: 1..=10 — ряд A, 11..=20 — ряд B и т.д.
pub fn row_letter(number: u32) -> char {
    let idx = ((number - 1) / SEATS_PER_ROW) as usize;
    ROW_LETTERS[idx.min(ROW_LETTERS.len() - 1)]
}

pub fn seat_in_row(number: u32) -> u32 {
    (number - 1) % SEATS_PER_ROW + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_layout_matches_grid() {
        assert_eq!(row_letter(1), 'A');
        assert_eq!(seat_in_row(1), 1);
        assert_eq!(row_letter(10), 'A');
        assert_eq!(seat_in_row(10), 10);
        assert_eq!(row_letter(11), 'B');
        assert_eq!(seat_in_row(11), 1);
        assert_eq!(row_letter(50), 'E');
        assert_eq!(seat_in_row(50), 10);
    }

    #[test]
    fn hall_ignores_out_of_range_occupancy() {
        let hall = Hall::new([1, 0, 51, 200]);
        assert!(hall.is_occupied(1));
        assert!(!hall.is_occupied(51));
        assert!(!hall.contains(0));
        assert!(!hall.contains(51));
    }

    #[test]
    fn premiere_hall_has_fifty_seats() {
        let hall = Hall::premiere();
        assert_eq!(hall.seats().count(), CAPACITY as usize);
        assert!(hall.is_occupied(3));
        assert!(!hall.is_occupied(1));
    }
}
