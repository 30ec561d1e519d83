use crate::musicbrainz::models::Release;
use crate::preferences::{DatePreference, ReleasePreferences};

/// A preference that narrows down a set of candidate releases.
pub trait ReleaseFilter {
    fn narrow<'r>(&self, candidates: &[&'r Release]) -> Vec<&'r Release>;
}

/// Keeps releases from exactly this country, those without one never match.
pub struct CountryFilter<'a>(pub &'a str);

impl ReleaseFilter for CountryFilter<'_> {
    fn narrow<'r>(&self, candidates: &[&'r Release]) -> Vec<&'r Release> {
        candidates
            .iter()
            .filter(|r| r.country.as_deref() == Some(self.0))
            .copied()
            .collect()
    }
}

/// Keeps the earliest or latest dated releases, undated ones never match.
pub struct DateFilter(pub DatePreference);

impl ReleaseFilter for DateFilter {
    fn narrow<'r>(&self, candidates: &[&'r Release]) -> Vec<&'r Release> {
        let dated = candidates
            .iter()
            .filter_map(|r| r.parsed_date().map(|date| (date, *r)));

        let best = match self.0 {
            DatePreference::No => return candidates.to_vec(),
            DatePreference::Earlier => dated.clone().map(|(date, _)| date).min(),
            DatePreference::Later => dated.clone().map(|(date, _)| date).max(),
        };

        match best {
            Some(best) => dated
                .filter(|(date, _)| *date == best)
                .map(|(_, r)| r)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Configured filters in the order they are applied: country, then date.
pub fn filter_stages(prefs: &ReleasePreferences) -> Vec<Box<dyn ReleaseFilter + '_>> {
    let mut stages: Vec<Box<dyn ReleaseFilter + '_>> = Vec::new();

    if !prefs.prefer_musicbrainz_countries.is_empty() {
        stages.push(Box::new(CountryFilter(&prefs.prefer_musicbrainz_countries)));
    }
    if prefs.prefer_musicbrainz_date != DatePreference::No {
        stages.push(Box::new(DateFilter(prefs.prefer_musicbrainz_date)));
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(id: &str, country: Option<&str>, date: Option<&str>) -> Release {
        Release {
            id: id.to_string(),
            country: country.map(str::to_string),
            date: date.map(str::to_string),
        }
    }

    fn ids(releases: Vec<&Release>) -> Vec<&str> {
        releases.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn country_filter_skips_releases_without_country() {
        let all = [
            release("a", Some("AU"), None),
            release("b", None, Some("2000")),
            release("c", Some("US"), None),
        ];
        let refs: Vec<&Release> = all.iter().collect();

        assert_eq!(ids(CountryFilter("AU").narrow(&refs)), vec!["a"]);
        assert!(CountryFilter("NL").narrow(&refs).is_empty());
    }

    #[test]
    fn date_filter_picks_earliest_and_latest() {
        let all = [
            release("a", None, Some("1997-03-10")),
            release("b", None, None),
            release("c", None, Some("1995")),
            release("d", None, Some("not a date")),
            release("e", None, Some("2001-06")),
        ];
        let refs: Vec<&Release> = all.iter().collect();

        assert_eq!(ids(DateFilter(DatePreference::Earlier).narrow(&refs)), vec!["c"]);
        assert_eq!(ids(DateFilter(DatePreference::Later).narrow(&refs)), vec!["e"]);
        assert_eq!(DateFilter(DatePreference::No).narrow(&refs).len(), 5);
    }

    #[test]
    fn date_filter_keeps_ties() {
        let all = [
            release("a", None, Some("1995")),
            release("b", None, Some("1995-01-01")),
        ];
        let refs: Vec<&Release> = all.iter().collect();

        assert_eq!(DateFilter(DatePreference::Earlier).narrow(&refs).len(), 2);
    }

    #[test]
    fn no_preferences_means_no_stages() {
        assert!(filter_stages(&ReleasePreferences::default()).is_empty());
    }
}
