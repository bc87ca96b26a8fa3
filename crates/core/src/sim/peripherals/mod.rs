pub mod gpio;
pub mod registers;
pub mod uart;
