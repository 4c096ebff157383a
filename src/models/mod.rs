pub mod user;
pub mod showtime;
pub mod seat;
pub mod order;

pub use user::User;
pub use showtime::Showtime;
pub use seat::Hall;
pub use order::Order;
