//! Shorthand constructors for tests.

use crate::SolarDate;

pub fn solar(year: u16, month: u8, day: u8) -> SolarDate {
    SolarDate::new(year, month, day)
        .unwrap_or_else(|e| panic!("bad test date {year}-{month}-{day}: {e}"))
}
