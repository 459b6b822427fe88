use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct ReturnDate(Date);

impl ReturnDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::ReturnDate;

    #[test]
    fn serializes_as_iso_calendar_date() {
        let json = serde_json::to_string(&ReturnDate::new(date!(2024 - 01 - 10))).unwrap();
        assert_eq!(json, r#""2024-01-10""#);

        let parsed: ReturnDate = serde_json::from_str(r#""2024-01-11""#).unwrap();
        assert_eq!(parsed, ReturnDate::new(date!(2024 - 01 - 11)));
    }
}
