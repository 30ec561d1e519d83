use crate::musicbrainz::api::WebService;
use crate::musicbrainz::error::MusicBrainzResult;
use crate::musicbrainz::filter::filter_stages;
use crate::musicbrainz::inclusion::merge_inclusions;
use crate::musicbrainz::models::Release;
use crate::musicbrainz::parser::parse_releases;
use crate::preferences::ReleasePreferences;
use log::{debug, info, warn};
use std::fmt::Display;

pub mod api;
pub mod error;
pub mod filter;
pub mod inclusion;
pub mod models;
pub mod parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStatus {
    Ok,
    NoMatches,
    NoChoices,
    MultipleRecords,
    ChoiceNotValid(i64),
}

impl Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionStatus::Ok => write!(f, "ok"),
            ResolutionStatus::NoMatches => write!(f, "noMatches"),
            ResolutionStatus::NoChoices => write!(f, "noChoices"),
            ResolutionStatus::MultipleRecords => write!(f, "multipleRecords"),
            ResolutionStatus::ChoiceNotValid(index) => write!(f, "choiceNotValid: {index}"),
        }
    }
}

/// Turns the releases MusicBrainz knows for a disc id into a single release.
pub struct ReleaseResolver<'a> {
    prefs: &'a ReleasePreferences,
    status: ResolutionStatus,
    release: Option<Release>,
    choices: Vec<Release>,
}

impl<'a> ReleaseResolver<'a> {
    pub fn new(prefs: &'a ReleasePreferences) -> Self {
        Self {
            prefs,
            status: ResolutionStatus::NoMatches,
            release: None,
            choices: Vec::new(),
        }
    }

    pub fn status(&self) -> &ResolutionStatus {
        &self.status
    }

    pub fn release(&self) -> Option<&Release> {
        self.release.as_ref()
    }

    pub fn choices(&self) -> &[Release] {
        &self.choices
    }

    /// Fetches the releases for `lookup_path` (`discid/<id>?toc=...`) and resolves them.
    pub async fn query_disc<S: WebService>(
        &mut self,
        service: &mut S,
        lookup_path: &str,
    ) -> MusicBrainzResult<()> {
        let query = format!(
            "{}{}",
            service.path(),
            merge_inclusions(lookup_path, self.prefs.use_earliest_date)
        );

        let reply = service.get(&query).await?;
        self.resolve(parse_releases(&reply)?);

        Ok(())
    }

    pub fn resolve(&mut self, releases: Vec<Release>) {
        self.release = None;
        self.choices = Vec::new();

        match releases.len() {
            0 => self.status = ResolutionStatus::NoMatches,
            1 => {
                self.status = ResolutionStatus::Ok;
                self.release = releases.into_iter().next();
            }
            count => {
                debug!("{count} releases found, applying preferences");
                self.disambiguate(releases);
            }
        }

        info!("MusicBrainz lookup status: {}", self.status);
    }

    fn disambiguate(&mut self, releases: Vec<Release>) {
        let mut remaining: Vec<&Release> = releases.iter().collect();

        for stage in filter_stages(self.prefs) {
            let narrowed = stage.narrow(&remaining);

            match narrowed.len() {
                1 => {
                    let chosen = narrowed[0].clone();
                    self.status = ResolutionStatus::Ok;
                    self.choices = vec![chosen.clone()];
                    self.release = Some(chosen);
                    return;
                }
                0 => warn!("Preference matches none of the releases, ignoring it"),
                _ => remaining = narrowed,
            }
        }

        self.status = ResolutionStatus::MultipleRecords;
        self.choices = releases;
    }

    /// Picks one of the choices, never fails.
    pub fn choose(&mut self, index: i64) {
        if self.choices.is_empty() {
            self.status = ResolutionStatus::NoChoices;
            self.release = None;
            return;
        }

        match usize::try_from(index).ok().and_then(|i| self.choices.get(i)) {
            Some(release) => {
                self.release = Some(release.clone());
                self.status = ResolutionStatus::Ok;
            }
            None => {
                self.release = None;
                self.status = ResolutionStatus::ChoiceNotValid(index);
            }
        }
    }
}
