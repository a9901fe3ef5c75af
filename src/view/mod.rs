//! Presentation helpers: status badges, the generic paged table and the
//! display formats the console uses for dates and money.

use chrono::NaiveDate;

pub mod badge;
pub mod table;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_string(), format_date)
}

pub fn format_price(value: f64) -> String {
    format!("R$ {value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_for_brazilian_readers() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(format_date(date), "01/07/2024");
        assert_eq!(format_optional_date(None), "N/A");
        assert_eq!(format_price(5.5), "R$ 5.50");
        assert_eq!(format_price(80.0), "R$ 80.00");
    }
}
