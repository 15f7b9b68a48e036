//! End-to-end tests for the generation pipeline
//!
//! Each test writes a small catalog to a temp directory, runs every stage
//! and checks the schedule and guess pool.

mod helpers;

use chrono::NaiveDate;
use helpers::{track, unplayable_track, TestCatalog};
use motif_common::config::GameConfig;
use motif_common::Error;
use motif_gen::rollover::load_snapshot;
use motif_gen::{CommittedSchedule, OutputPaths, Pipeline};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Official album O with Overture + Finale, fan album F2 citing both four
/// times, fan album A whose "Callback" cites both plus a Desynced track, and
/// Desynced album B with playable tracks of its own.
fn scenario() -> TestCatalog {
    let catalog = TestCatalog::new();
    catalog.album(
        "official-album",
        "Official Album",
        &["Official Discography"],
        &[unplayable_track("Overture"), unplayable_track("Finale")],
    );
    catalog.album(
        "fan-citers",
        "Fan Citers",
        &["Fandom"],
        &[
            track("Citer One", "Fan A", &["Overture", "Finale"]),
            track("Citer Two", "Fan B", &["Overture", "Finale"]),
            track("Citer Three", "Fan C", &["Overture", "Finale"]),
            track("Citer Four", "Fan D", &["Overture", "Finale"]),
        ],
    );
    catalog.album(
        "fan-a",
        "Fan A",
        &["Fandom"],
        &[track("Callback", "Fan E", &["Overture", "Finale", "Lost Tune"])],
    );
    catalog.album(
        "desynced-b",
        "Desynced B",
        &["Fandom", "Desynced"],
        &[
            track("Lost Tune", "Fan F", &[]),
            track("Desynced Callback", "Fan G", &["Overture", "Finale", "Citer One"]),
        ],
    );
    catalog
}

#[test]
fn test_end_to_end_schedule_and_guesses() {
    let catalog = scenario();
    let game = GameConfig::default();
    let pipeline = Pipeline::new(&game).unwrap();

    let data = pipeline
        .run_dir(catalog.album_dir(), &CommittedSchedule::default())
        .unwrap();

    let scheduled: Vec<_> = data.schedule.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(scheduled, vec!["callback"]);
    let callback = &data.schedule[0];
    assert_eq!(callback.day, Some(game.start_date));
    assert_eq!(
        callback.leitmotifs,
        vec!["track:overture", "track:finale", "track:lost-tune"]
    );
    assert!(callback.is_fandom);
    assert_eq!(callback.artist, vec!["artist:fan-e".to_string()]);

    // Desynced album never reaches the schedule but stays a guessable target
    assert!(data.schedule.iter().all(|s| s.album_name != "Desynced B"));
    let lost_tune = data
        .guesses
        .iter()
        .find(|g| g.slug == "track:lost-tune")
        .expect("desynced track is a guess");
    assert_eq!(lost_tune.rarity.get(), 1);
    assert_eq!(lost_tune.summary.album_name, "Desynced B");

    // Desynced citations are not counted: Overture is cited 5 times (rare tier)
    let overture = data
        .guesses
        .iter()
        .find(|g| g.slug == "track:overture")
        .unwrap();
    assert_eq!(overture.rarity.get(), 3);
    assert!(overture.summary.is_official);

    // Sorted by rarity desc, then name
    let order: Vec<_> = data
        .guesses
        .iter()
        .map(|g| g.summary.name.as_str())
        .collect();
    assert_eq!(order, vec!["Finale", "Overture", "Lost Tune"]);

    assert_eq!(data.report.albums_total, 4);
    assert_eq!(data.report.albums_included, 3);
    assert_eq!(data.report.newly_scheduled, 1);
}

#[test]
fn test_runs_are_byte_identical() {
    let catalog = scenario();
    // Add enough eligible songs for the shuffle to matter
    let many: Vec<String> = (0..12)
        .map(|i| {
            track(
                &format!("Medley {}", i),
                &format!("Artist {}", i),
                &["Overture", "Finale", "Citer Two"],
            )
        })
        .collect();
    catalog.album("medleys", "Medleys", &["Fandom"], &many);

    let game = GameConfig::default();
    let pipeline = Pipeline::new(&game).unwrap();

    let out_a = TempDir::new().unwrap();
    let out_b = TempDir::new().unwrap();
    for out in [&out_a, &out_b] {
        let data = pipeline
            .run_dir(catalog.album_dir(), &CommittedSchedule::default())
            .unwrap();
        data.store(&OutputPaths::new(out.path())).unwrap();
    }

    let a = OutputPaths::new(out_a.path());
    let b = OutputPaths::new(out_b.path());
    assert_eq!(
        std::fs::read(&a.songs).unwrap(),
        std::fs::read(&b.songs).unwrap()
    );
    assert_eq!(
        std::fs::read(&a.motifs).unwrap(),
        std::fs::read(&b.motifs).unwrap()
    );
}

#[test]
fn test_rollover_preserves_published_prefix() {
    let catalog = scenario();
    let medleys: Vec<String> = (0..5)
        .map(|i| {
            track(
                &format!("Medley {}", i),
                &format!("Artist {}", i),
                &["Overture", "Finale", "Citer Three"],
            )
        })
        .collect();
    catalog.album("medleys", "Medleys", &["Fandom"], &medleys);
    let output = TempDir::new().unwrap();
    let paths = OutputPaths::new(output.path());

    // First run launches on 2024-01-01
    let mut game = GameConfig {
        original_date: day(2024, 1, 1),
        start_date: day(2024, 1, 1),
        ..GameConfig::default()
    };
    let first = Pipeline::new(&game)
        .unwrap()
        .run_dir(catalog.album_dir(), &CommittedSchedule::default())
        .unwrap();
    first.store(&paths).unwrap();
    assert_eq!(first.schedule.len(), 6);

    // Second run two days later keeps the first two published days
    game.start_date = day(2024, 1, 3);
    assert!(paths.rotate_backup().unwrap());
    let snapshot = load_snapshot(&paths.backup).unwrap().unwrap();
    let committed = CommittedSchedule::carry_forward(snapshot, game.carried_day_count()).unwrap();
    assert_eq!(committed.len(), 2);

    let second = Pipeline::new(&game)
        .unwrap()
        .run_dir(catalog.album_dir(), &committed)
        .unwrap();

    assert_eq!(&second.schedule[..2], &first.schedule[..2]);
    assert_eq!(second.schedule.len(), first.schedule.len());
    for (offset, song) in second.schedule.iter().enumerate() {
        let expected = day(2024, 1, 1) + chrono::Days::new(offset as u64);
        assert_eq!(song.day, Some(expected));
    }
    let mut slugs: Vec<_> = second.schedule.iter().map(|s| s.slug.clone()).collect();
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), second.schedule.len(), "no song scheduled twice");
}

#[test]
fn test_missing_album_header_is_fatal() {
    let catalog = scenario();
    std::fs::write(
        catalog.album_dir().join("headless.yaml"),
        "Track: Orphan\nURLs: []\n",
    )
    .unwrap();

    let game = GameConfig::default();
    let result = Pipeline::new(&game)
        .unwrap()
        .run_dir(catalog.album_dir(), &CommittedSchedule::default());
    match result {
        Err(Error::MissingAlbumHeader(path)) => assert!(path.ends_with("headless.yaml")),
        other => panic!("expected MissingAlbumHeader, got {:?}", other.map(|d| d.schedule.len())),
    }
}

#[test]
fn test_invalid_config_rejected() {
    let mut game = GameConfig::default();
    game.thresholds.uncommon = game.thresholds.common;
    assert!(matches!(Pipeline::new(&game), Err(Error::Config(_))));
}

#[test]
fn test_non_yaml_files_ignored() {
    let catalog = scenario();
    std::fs::write(catalog.album_dir().join("README.md"), "# not an album").unwrap();

    let game = GameConfig::default();
    let data = Pipeline::new(&game)
        .unwrap()
        .run_dir(catalog.album_dir(), &CommittedSchedule::default())
        .unwrap();
    assert_eq!(data.report.albums_total, 4);
}

#[test]
fn test_fan_directory_does_not_capture_official_citations() {
    let catalog = TestCatalog::new();
    std::fs::write(
        catalog.album_dir().join("a-fan.yaml"),
        "Album: Fan Covers\nGroups:\n  - Fandom\n---\nTrack: Doctor\nDirectory: doctor-fan-cover\nArtists:\n  - Fan Z\nURLs:\n  - \"https://homestuck.bandcamp.com/track/x\"\n",
    )
    .unwrap();
    catalog.album(
        "z-official",
        "Official",
        &["Official Discography"],
        &[
            unplayable_track("Doctor"),
            unplayable_track("Black"),
            unplayable_track("Amen"),
        ],
    );
    let citers: Vec<String> = (0..5)
        .map(|i| {
            track(
                &format!("Citer {}", i),
                &format!("Fan {}", i),
                &["Doctor", "Black", "Amen"],
            )
        })
        .collect();
    catalog.album("m-citers", "Citers", &["Fandom"], &citers);

    let game = GameConfig::default();
    let data = Pipeline::new(&game)
        .unwrap()
        .run_dir(catalog.album_dir(), &CommittedSchedule::default())
        .unwrap();

    let pool: Vec<_> = data
        .guesses
        .iter()
        .map(|g| (g.slug.as_str(), g.summary.is_official, g.rarity.get()))
        .collect();
    assert_eq!(
        pool,
        vec![
            ("track:amen", true, 3),
            ("track:black", true, 3),
            ("track:doctor", true, 3),
        ]
    );
    // Every citer now has three official-guessable references
    assert_eq!(data.schedule.len(), 5);
}
