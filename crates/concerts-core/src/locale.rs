//! Localized display labels for the output workbook.
//!
//! The listing site and its consumers are Russian-speaking; every label that
//! reaches the spreadsheet lives here.

/// Sheet name of the output workbook.
pub const SHEET_NAME: &str = "Концерты";

/// Header row, in column order: date, city, venue, program, ticket status,
/// available seats.
pub const COLUMN_HEADERS: [&str; 6] = [
    "Дата концерта",
    "Город",
    "Площадка",
    "Программа",
    "Статус билетов",
    "Вместимость зала",
];

pub const STATUS_SOLD_OUT: &str = "Проданы";
pub const STATUS_ON_SALE: &str = "Продаются";
pub const STATUS_EVENT_PASSED: &str = "Мероприятие прошло";
