use crate::musicbrainz::error::MusicBrainzResult;
use crate::musicbrainz::models::Release;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Country,
    Date,
}

/// Collects the releases of a web service reply, ignoring everything else.
pub fn parse_releases(xml: &str) -> MusicBrainzResult<Vec<Release>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut releases = Vec::new();
    let mut current: Option<Release> = None;
    let mut depth = 0usize;
    let mut release_depth = 0usize;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if current.is_none() && e.name().as_ref() == b"release" {
                    current = Some(release_from_attributes(&e)?);
                    release_depth = depth;
                } else if current.is_some() && depth == release_depth + 1 {
                    field = match e.name().as_ref() {
                        b"country" => Some(Field::Country),
                        b"date" => Some(Field::Date),
                        _ => None,
                    };
                }
            }
            Event::Empty(e) => {
                if current.is_none() && e.name().as_ref() == b"release" {
                    releases.push(release_from_attributes(&e)?);
                }
            }
            Event::Text(t) => {
                if let (Some(release), Some(field)) = (current.as_mut(), field) {
                    let text = t.unescape()?.into_owned();
                    match field {
                        Field::Country => release.country = Some(text),
                        Field::Date => release.date = Some(text),
                    }
                }
            }
            Event::End(_) => {
                field = None;
                if current.is_some() && depth == release_depth {
                    releases.extend(current.take());
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(releases)
}

fn release_from_attributes(e: &BytesStart) -> MusicBrainzResult<Release> {
    let mut release = Release::default();

    for attribute in e.attributes() {
        let attribute = attribute?;
        let value = attribute.unescape_value()?.into_owned();
        match attribute.key.as_ref() {
            b"id" => release.id = value,
            b"country" => release.country = Some(value),
            b"date" => release.date = Some(value),
            _ => {}
        }
    }

    Ok(release)
}
