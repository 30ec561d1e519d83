use chrono::NaiveDate;

/// The parts of a MusicBrainz release needed to pick one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Release {
    pub id: String,
    pub country: Option<String>,
    pub date: Option<String>,
}

impl Release {
    /// MusicBrainz dates may omit month and day, those count as the first.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?.trim();

        match date.len() {
            4 => NaiveDate::parse_from_str(&format!("{date}-01-01"), "%Y-%m-%d").ok(),
            7 => NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d").ok(),
            _ => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(date: &str) -> Release {
        Release {
            id: "id".to_string(),
            country: None,
            date: Some(date.to_string()),
        }
    }

    #[test]
    fn parses_partial_dates() {
        assert_eq!(
            dated("1999").parsed_date(),
            NaiveDate::from_ymd_opt(1999, 1, 1)
        );
        assert_eq!(
            dated("1999-05").parsed_date(),
            NaiveDate::from_ymd_opt(1999, 5, 1)
        );
        assert_eq!(
            dated("1999-05-12").parsed_date(),
            NaiveDate::from_ymd_opt(1999, 5, 12)
        );
    }

    #[test]
    fn unparseable_dates_are_none() {
        assert_eq!(dated("").parsed_date(), None);
        assert_eq!(dated("someday").parsed_date(), None);
        assert_eq!(Release::default().parsed_date(), None);
    }
}
