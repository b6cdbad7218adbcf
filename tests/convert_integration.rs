use std::fs;

use micronize::release::{LocalAsset, PageOptions, Release, render_page};
use micronize::site::{convert_path, convert_text, convert_tree};
use micronize::transduce::Profile;

const SAMPLE_MD: &str = include_str!("fixtures/sample.md");
const SAMPLE_MU: &str = include_str!("fixtures/sample.mu");

#[test]
fn test_sample_document_matches_expected_page() {
    let page = convert_text(SAMPLE_MD, &Profile::document());
    assert_eq!(format!("{page}\n"), SAMPLE_MU);
}

#[test]
fn test_convert_tree_mirrors_layout() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    let out = dir.path().join("blog");
    fs::create_dir_all(content.join("2024").join("spring")).unwrap();
    fs::write(content.join("index.md"), SAMPLE_MD).unwrap();
    fs::write(content.join("2024").join("spring").join("post.md"), "## Post\n").unwrap();
    fs::write(content.join("2024").join("image.png"), [0u8, 1, 2]).unwrap();

    let report = convert_tree(&content, &out, &Profile::document()).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(fs::read_to_string(out.join("index.mu")).unwrap(), SAMPLE_MU);
    assert_eq!(
        fs::read_to_string(out.join("2024").join("spring").join("post.mu")).unwrap(),
        ">> `!Post`!\n"
    );
    assert!(!out.join("2024").join("image.mu").exists());
    assert!(!out.join("2024").join("image.png").exists());
}

#[test]
fn test_convert_tree_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let content = dir.path().join("content");
    fs::create_dir_all(&content).unwrap();
    for name in ["b.md", "a.md", "c.md"] {
        fs::write(content.join(name), "text").unwrap();
    }

    let report = convert_tree(&content, &dir.path().join("out"), &Profile::document()).unwrap();

    let names: Vec<String> = report
        .pages
        .iter()
        .map(|page| page.source.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
}

#[test]
fn test_convert_single_file_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("README.md");
    fs::write(&input, "Hello *there*\n").unwrap();

    let report = convert_path(&input, None, &Profile::document()).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("README.mu")).unwrap(),
        "Hello `*there`*\n"
    );
}

#[test]
fn test_release_page_from_github_payload() {
    let json = r###"{
        "name": "LXMFy 1.4.0",
        "tag_name": "v1.4.0",
        "published_at": "2025-06-01T09:30:00Z",
        "body": "## What's Changed\r\n* Bot commands by @dev in #12\r\n\r\n**Full Changelog**: v1.3.0...v1.4.0",
        "assets": [
            {"name": "lxmfy-1.4.0.tar.gz", "browser_download_url": "https://github.com/x", "size": 52428}
        ]
    }"###;
    let release: Release = serde_json::from_str(json).unwrap();
    let assets = vec![LocalAsset {
        name: "lxmfy-1.4.0.tar.gz".to_string(),
        size: Some(52428),
    }];
    let options = PageOptions {
        project: Some("LXMFy".to_string()),
        ..PageOptions::default()
    };

    let page = render_page(&release, &assets, &options).to_markup();

    assert_eq!(
        page,
        [
            "> `!Latest LXMFy Release: LXMFy 1.4.0 (v1.4.0)`!",
            "`!Published (UTC):` 2025-06-01 09:30:00 UTC",
            "-",
            ">> `!Release Notes`!",
            ">> `!What's Changed`!",
            "  * Bot commands by @dev in #12",
            "  **Full Changelog**: v1.3.0...v1.4.0",
            "-",
            ">> `!Assets (Local Links)`!",
            "  `!File:` lxmfy-1.4.0.tar.gz",
            "  `!Size:` 51.20 KB",
            "  `!Link:` `_`[lxmfy-1.4.0.tar.gz`/file/lxmfy-1.4.0.tar.gz]`_",
            "  -",
            "-",
        ]
        .join("\n")
    );
}
