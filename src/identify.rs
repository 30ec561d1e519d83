use crate::commands::disc::{IdCommand, LookupCommand, ScanSource, TocCommand};
use crate::discid::DiscIdentifier;
use crate::error::DiscIdentifyResult;
use crate::musicbrainz::api::MusicBrainzApi;
use crate::musicbrainz::{ReleaseResolver, ResolutionStatus};
use crate::toc::cdrdao::CdrdaoToc;
use crate::toc::{TocModel, TocScanner, TrackRef};
use crate::util::process::{CommandRunner, Platform};
use indicatif::{MultiProgress, ProgressBar};
use log::{debug, info};
use std::time::Duration;

/// Scans the drive (or a saved report) and applies all layout corrections.
pub async fn read_disc<R: CommandRunner>(
    source: &ScanSource,
    runner: &R,
) -> DiscIdentifyResult<TocModel> {
    let corrector = source.prefs.corrector();
    let scanner = TocScanner::new(runner, corrector);

    let mut toc = match &source.toc_file {
        Some(path) => {
            debug!("Reading cdparanoia report from {path:?}");
            let query = tokio::fs::read_to_string(path).await?;
            scanner.scan_query(&source.prefs.cdrom, &query)?
        }
        None => scanner.scan(&source.prefs.cdrom)?,
    };

    if let Some(path) = &source.cdrdao_toc {
        debug!("Merging gaps from {path:?}");
        let cdrdao = CdrdaoToc::from_file(path).await?;
        corrector.merge_gaps(&mut toc, &cdrdao)?;
        cdrdao.apply_data_tracks(&mut toc);
    }

    if let Some(start) = source.data_track_start {
        let track = toc.last_audio_track() + 1;
        debug!("Data track {track} starts at sector {start}");
        toc.data_tracks.insert(track);
        toc.data_track_start.insert(track, start);
    }

    Ok(toc)
}

/// Helper programs read the drive, so a saved report is only identified by its layout.
fn identifier<'a, R: CommandRunner>(
    source: &'a ScanSource,
    toc: &'a TocModel,
    runner: &'a R,
) -> DiscIdentifier<'a> {
    match source.toc_file {
        Some(_) => DiscIdentifier::manual(toc),
        None => DiscIdentifier::new(toc, runner, &source.prefs.cdrom, Platform::current()),
    }
}

pub async fn show_toc<R: CommandRunner>(cmd: TocCommand, runner: &R) -> DiscIdentifyResult<()> {
    let toc = read_disc(&cmd.source, runner).await?;

    if let Some(name) = &toc.device_name {
        println!("Drive: {name}");
    }

    let first_key = if toc.has_hidden_track() { 0 } else { 1 };
    for key in first_key..=toc.audiotracks {
        let track = TrackRef::Track(key);
        println!(
            "Track {key:>2}: start {:>7}  length {:>7} [{}]  {} bytes",
            toc.start_sector(track).unwrap_or_default(),
            toc.length_sector(track).unwrap_or_default(),
            toc.length_text(track).unwrap_or("?"),
            toc.file_size(track).unwrap_or_default(),
        );
    }

    println!(
        "Image: start {}  length {} [{}]  {} bytes, first audio track {}",
        toc.start_sector(TrackRef::Image).unwrap_or_default(),
        toc.length_sector(TrackRef::Image).unwrap_or_default(),
        toc.length_text(TrackRef::Image).unwrap_or("?"),
        toc.file_size(TrackRef::Image).unwrap_or_default(),
        toc.first_audio_track
    );

    if !toc.data_tracks.is_empty() {
        println!("Data tracks: {:?}", toc.data_tracks);
    }
    if !toc.multiple_drive_support {
        info!("cdparanoia can only read the default drive");
    }

    Ok(())
}

pub async fn show_ids<R: CommandRunner>(cmd: IdCommand, runner: &R) -> DiscIdentifyResult<()> {
    let toc = read_disc(&cmd.source, runner).await?;
    let identifier = identifier(&cmd.source, &toc, runner);

    let freedb = identifier.freedb()?;
    let musicbrainz = identifier.musicbrainz()?;

    println!("freedb id:      {}", freedb.discid());
    println!("freedb string:  {freedb}");
    println!("MusicBrainz id: {}", musicbrainz.id);
    println!("lookup path:    {}", musicbrainz.lookup_path);

    Ok(())
}

pub async fn lookup_release<R: CommandRunner>(
    pb: MultiProgress,
    cmd: LookupCommand,
    runner: &R,
) -> DiscIdentifyResult<()> {
    let toc = read_disc(&cmd.source, runner).await?;
    let identifier = identifier(&cmd.source, &toc, runner);
    let musicbrainz = identifier.musicbrainz()?;

    let spinner = pb.add(ProgressBar::new_spinner());
    spinner.set_message(format!("Looking up {} on MusicBrainz", musicbrainz.id));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut api = MusicBrainzApi::default();
    let mut resolver = ReleaseResolver::new(&cmd.prefs);
    let queried = resolver.query_disc(&mut api, &musicbrainz.lookup_path).await;

    spinner.finish_and_clear();
    queried?;

    if *resolver.status() == ResolutionStatus::MultipleRecords {
        if let Some(index) = cmd.choose {
            resolver.choose(index);
        }
    }

    println!("Status: {}", resolver.status());

    match resolver.release() {
        Some(release) => println!(
            "Release: {} ({}, {})",
            release.id,
            release.country.as_deref().unwrap_or("unknown country"),
            release.date.as_deref().unwrap_or("unknown date")
        ),
        None => {
            for (index, choice) in resolver.choices().iter().enumerate() {
                println!(
                    "  [{index}] {} ({}, {})",
                    choice.id,
                    choice.country.as_deref().unwrap_or("-"),
                    choice.date.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::ScanPreferences;
    use crate::toc::parser::tests::QUERY;
    use crate::util::process::tests::FakeRunner;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn source(toc_file: Option<PathBuf>, cdrdao_toc: Option<PathBuf>) -> ScanSource {
        ScanSource {
            prefs: ScanPreferences {
                cdrom: "/dev/sr0".to_string(),
                rip_hidden_audio: false,
                min_length_hidden_track: 2.0,
            },
            toc_file,
            cdrdao_toc,
            data_track_start: None,
        }
    }

    #[tokio::test]
    async fn reads_saved_report_without_touching_the_drive() {
        let report = write_temp(QUERY);
        let runner = FakeRunner::default();

        let toc = read_disc(&source(Some(report.path().to_path_buf()), None), &runner)
            .await
            .unwrap();

        assert_eq!(toc.audiotracks, 3);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn merges_gaps_from_cdrdao_toc() {
        let report = write_temp(QUERY);
        let cdrdao = write_temp("TRACK AUDIO\nTRACK AUDIO\nSTART 00:02:00\nTRACK AUDIO\nTRACK MODE1\n");
        let runner = FakeRunner::default();

        let toc = read_disc(
            &source(
                Some(report.path().to_path_buf()),
                Some(cdrdao.path().to_path_buf()),
            ),
            &runner,
        )
        .await
        .unwrap();

        assert_eq!(toc.start_sector[&2], 13209 - 150);
        assert_eq!(toc.length_sector[&1], 13209 - 150);
        assert!(toc.data_tracks.contains(&4));
    }

    #[tokio::test]
    async fn queries_the_drive_without_a_saved_report() {
        let runner = FakeRunner::default().reply("cdparanoia -d /dev/sr0 -vQ", QUERY);

        let toc = read_disc(&source(None, None), &runner).await.unwrap();

        assert_eq!(toc.device_name.as_deref(), Some("HL-DT-ST DVDRAM GH22NS50 TN02"));
    }

    #[tokio::test]
    async fn saved_report_is_identified_without_helpers() {
        let report = write_temp(QUERY);
        let source = source(Some(report.path().to_path_buf()), None);
        let runner = FakeRunner {
            installed: vec!["discid", "cd-discid"],
            ..Default::default()
        }
        .reply("discid /dev/sr0", crate::discid::freedb::tests::FREEDB_STRING);

        let toc = read_disc(&source, &runner).await.unwrap();
        let freedb = identifier(&source, &toc, &runner).freedb().unwrap();

        assert_eq!(freedb.track_count, 3);
        assert_eq!(freedb.offsets, vec![150, 13359, 36689]);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn drive_scan_asks_the_helpers() {
        let runner = FakeRunner {
            installed: vec!["discid"],
            ..Default::default()
        }
        .reply("cdparanoia -d /dev/sr0 -vQ", QUERY)
        .reply("discid /dev/sr0", crate::discid::freedb::tests::FREEDB_STRING);
        let source = source(None, None);

        let toc = read_disc(&source, &runner).await.unwrap();
        let freedb = identifier(&source, &toc, &runner).freedb().unwrap();

        assert_eq!(freedb.track_count, 10);
        assert!(runner.calls().contains(&"discid /dev/sr0".to_string()));
    }

    #[tokio::test]
    async fn records_start_of_trailing_data_track() {
        let report = write_temp(QUERY);
        let mut source = source(Some(report.path().to_path_buf()), None);
        source.data_track_start = Some(80000);

        let toc = read_disc(&source, &FakeRunner::default()).await.unwrap();

        assert_eq!(toc.trailing_data_track(), Some(4));
        assert_eq!(toc.data_track_start[&4], 80000);
    }
}
