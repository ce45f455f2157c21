//! Integration tests for the zoneinfo client using temporary directories
//!
//! These tests exercise the root probing and TZif decoding paths against
//! real files written into tempdir-backed zoneinfo trees.

use std::fs;
use std::path::Path;

use integration_tzdata::{RawTransition, TzdataConfig, TzdataError, TzdataSource, ZoneinfoClient};
use tempfile::TempDir;

/// Minimal version-1 TZif image with the given transitions
fn tzif_image(
    times: &[i32],
    type_indexes: &[u8],
    ttinfos: &[(i32, bool, u8)],
    designations: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"TZif");
    out.push(0);
    out.extend_from_slice(&[0u8; 15]);
    out.extend_from_slice(&0u32.to_be_bytes()); // isutcnt
    out.extend_from_slice(&0u32.to_be_bytes()); // isstdcnt
    out.extend_from_slice(&0u32.to_be_bytes()); // leapcnt
    out.extend_from_slice(&u32::try_from(times.len()).unwrap().to_be_bytes());
    out.extend_from_slice(&u32::try_from(ttinfos.len()).unwrap().to_be_bytes());
    out.extend_from_slice(&u32::try_from(designations.len()).unwrap().to_be_bytes());
    for &time in times {
        out.extend_from_slice(&time.to_be_bytes());
    }
    out.extend_from_slice(type_indexes);
    for &(utoff, dst, desigidx) in ttinfos {
        out.extend_from_slice(&utoff.to_be_bytes());
        out.push(u8::from(dst));
        out.push(desigidx);
    }
    out.extend_from_slice(designations);
    out
}

/// A two-transition zone alternating between GMT and BST
fn london_image() -> Vec<u8> {
    tzif_image(
        &[100, 500],
        &[1, 0],
        &[(0, false, 0), (3600, true, 4)],
        b"GMT\0BST\0",
    )
}

/// Write `bytes` as `zone` under `root`, creating parent directories
fn write_zone(root: &Path, zone: &str, bytes: &[u8]) {
    let path = root.join(zone);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

fn client_for(roots: &[&TempDir]) -> ZoneinfoClient {
    ZoneinfoClient::new(TzdataConfig {
        zoneinfo_dirs: roots.iter().map(|dir| dir.path().to_path_buf()).collect(),
    })
}

#[tokio::test]
async fn test_loads_transitions_with_floor_record_first() {
    let root = TempDir::new().unwrap();
    write_zone(root.path(), "Europe/London", &london_image());
    let client = client_for(&[&root]);

    let transitions = client.load_transitions("Europe/London").await.unwrap();

    assert_eq!(transitions.len(), 3);
    assert_eq!(transitions[0], RawTransition::new(i64::MIN, 0, false, "GMT"));
    assert_eq!(transitions[1], RawTransition::new(100, 3600, true, "BST"));
    assert_eq!(transitions[2], RawTransition::new(500, 0, false, "GMT"));
}

#[tokio::test]
async fn test_nested_zone_paths_resolve() {
    let root = TempDir::new().unwrap();
    write_zone(
        root.path(),
        "America/Argentina/Buenos_Aires",
        &tzif_image(&[], &[], &[(-10_800, false, 0)], b"-03\0"),
    );
    let client = client_for(&[&root]);

    let transitions = client
        .load_transitions("America/Argentina/Buenos_Aires")
        .await
        .unwrap();

    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].offset_secs, -10_800);
    assert_eq!(transitions[0].abbreviation, "-03");
}

#[tokio::test]
async fn test_probes_roots_in_configured_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_zone(second.path(), "Pacific/Apia", &london_image());
    write_zone(
        second.path(),
        "Asia/Tokyo",
        &tzif_image(&[], &[], &[(32_400, false, 0)], b"JST\0"),
    );
    write_zone(
        first.path(),
        "Asia/Tokyo",
        &tzif_image(&[], &[], &[(1, false, 0)], b"XXX\0"),
    );
    let client = client_for(&[&first, &second]);

    let fallthrough = client.load_transitions("Pacific/Apia").await.unwrap();
    let shadowed = client.load_transitions("Asia/Tokyo").await.unwrap();

    assert_eq!(fallthrough.len(), 3);
    assert_eq!(shadowed[0].abbreviation, "XXX");
}

#[tokio::test]
async fn test_unknown_zone_is_not_found() {
    let root = TempDir::new().unwrap();
    let client = client_for(&[&root]);

    let result = client.load_transitions("Mars/Olympus").await;

    assert!(matches!(
        result,
        Err(TzdataError::ZoneNotFound(zone)) if zone == "Mars/Olympus"
    ));
}

#[tokio::test]
async fn test_traversal_names_are_rejected_before_any_probe() {
    let root = TempDir::new().unwrap();
    let client = client_for(&[&root]);

    let result = client.load_transitions("../secret").await;

    assert!(matches!(result, Err(TzdataError::InvalidZoneName(_))));
}

#[tokio::test]
async fn test_non_tzif_content_is_rejected() {
    let root = TempDir::new().unwrap();
    // Garbage longer than a full header, so the magic check is what fails
    let garbage = b"definitely not tzdata ".repeat(3);
    write_zone(root.path(), "Europe/Broken", &garbage);
    let client = client_for(&[&root]);

    let result = client.load_transitions("Europe/Broken").await;

    assert!(matches!(result, Err(TzdataError::NotTzif(_))));
}

#[tokio::test]
async fn test_truncated_file_is_rejected() {
    let root = TempDir::new().unwrap();
    let mut image = london_image();
    image.truncate(50);
    write_zone(root.path(), "Europe/Cut", &image);
    let client = client_for(&[&root]);

    let result = client.load_transitions("Europe/Cut").await;

    assert!(matches!(result, Err(TzdataError::Truncated)));
}

#[tokio::test]
async fn test_is_available_reflects_root_existence() {
    let root = TempDir::new().unwrap();
    let present = client_for(&[&root]);
    let absent = ZoneinfoClient::new(TzdataConfig {
        zoneinfo_dirs: vec!["/nonexistent/zoneinfo".into()],
    });

    assert!(present.is_available().await);
    assert!(!absent.is_available().await);
}
