//! Every tournament file under demos/ must load, build and render

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, TimeZone, Utc};

use bracketry::{
    render_tournament, Manifest, MemoryStore, PropagationPolicy, RecordStore, RenderConfig,
    Stylesheet,
};

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos")
}

fn manifests() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(demos_dir())
        .expect("demos/ should exist")
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
}

fn render(path: &Path, config: &RenderConfig) -> String {
    let manifest = Manifest::from_file(path)
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    let mut store = MemoryStore::new();
    let mut rng = manifest.rng(Some(17));
    let tournament = manifest
        .apply(
            &mut store,
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            &mut rng,
            PropagationPolicy::default(),
        )
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()));

    let matches = store.list_matches(tournament.id);
    assert_eq!(matches.len(), tournament.size.entrants() - 1);

    let generated = NaiveDate::from_ymd_opt(2024, 5, 4)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    render_tournament(&store, tournament.id, config, generated).unwrap()
}

#[test]
fn test_all_demos_render() {
    let paths = manifests();
    assert!(!paths.is_empty());
    for path in paths {
        let svg = render(&path, &RenderConfig::default());
        assert!(svg.starts_with("<?xml"), "{}", path.display());
        assert!(svg.ends_with("</svg>"), "{}", path.display());
        assert!(svg.contains("Generated: 04/05/2024 12:00"));
    }
}

#[test]
fn test_demos_with_night_stylesheet() {
    let stylesheet = Stylesheet::from_file(&demos_dir().join("styles/night.toml")).unwrap();
    assert_eq!(stylesheet.name.as_deref(), Some("Night"));
    let config = RenderConfig::new().with_stylesheet(stylesheet);

    for path in manifests() {
        let svg = render(&path, &config);
        assert!(svg.contains(r##"fill="#14181f""##), "{}", path.display());
    }
}

#[test]
fn test_club_open_results_are_replayed() {
    let svg = render(&demos_dir().join("club-open.toml"), &RenderConfig::default());
    assert!(svg.contains(">6-4 3-6 7-5</text>"));
    assert!(svg.contains(">7-6 6-4</text>"));
    assert!(svg.contains(">Fábio</text>"));
}
