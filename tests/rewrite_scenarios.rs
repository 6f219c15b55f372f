use std::fs;
use std::path::Path;

use mediaref::local_files::local;
use mediaref::presets;
use mediaref::rewrite::{rewrite, ExtensionSet, RewriteMode, RewriteSpec};
use mediaref::rules::{Replacement, RuleSet};
use tempfile::tempdir;

fn web_extensions() -> ExtensionSet {
    ExtensionSet::new([".html", ".md", ".js", ".css"]).unwrap()
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn logo_reference_moves_and_nothing_else_is_touched() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.html", "<img src=\"assets/media/griga-logo.jpg\">");
    write(dir.path(), "about.html", "<p>About us</p>");
    write(dir.path(), "notes.md", "assets/media/griga-logo.jpg");

    let spec = RewriteSpec::new(
        dir.path(),
        ExtensionSet::new([".html"]).unwrap(),
        RuleSet::new(vec![Replacement::new(
            "assets/media/griga-logo.jpg",
            "assets/media/logos/griga-logo.jpg",
        )]),
    );
    let result = rewrite(&local(), &spec, RewriteMode::Write).unwrap();

    assert_eq!(
        read(dir.path(), "index.html"),
        "<img src=\"assets/media/logos/griga-logo.jpg\">"
    );
    assert_eq!(read(dir.path(), "about.html"), "<p>About us</p>");
    assert_eq!(read(dir.path(), "notes.md"), "assets/media/griga-logo.jpg");
    assert_eq!(result.total_files, 1);
    assert_eq!(result.edits[0].file, "index.html");
}

#[test]
fn css_url_prefix_is_renamed() {
    let dir = tempdir().unwrap();
    write(dir.path(), "style.css", "body { background: url(assets/img/banner.jpg); }");

    let spec = RewriteSpec::new(
        dir.path(),
        web_extensions(),
        RuleSet::new(vec![Replacement::new("assets/img/", "assets/media/")]),
    );
    rewrite(&local(), &spec, RewriteMode::Write).unwrap();

    assert_eq!(
        read(dir.path(), "style.css"),
        "body { background: url(assets/media/banner.jpg); }"
    );
}

#[test]
fn ineligible_extension_stays_byte_identical() {
    let dir = tempdir().unwrap();
    write(dir.path(), "readme.txt", "see assets/img/banner.jpg\r\n");

    let spec = RewriteSpec::new(
        dir.path(),
        web_extensions(),
        RuleSet::new(vec![Replacement::new("assets/img/", "assets/media/")]),
    );
    let result = rewrite(&local(), &spec, RewriteMode::Write).unwrap();

    assert_eq!(
        fs::read(dir.path().join("readme.txt")).unwrap(),
        b"see assets/img/banner.jpg\r\n".to_vec()
    );
    assert_eq!(result.files_scanned, 0);
}

#[test]
fn unchanged_file_keeps_its_modified_time() {
    let dir = tempdir().unwrap();
    write(dir.path(), "main.js", "console.log('no media');");
    let path = dir.path().join("main.js");
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(20));

    let preset = presets::update_media();
    let spec = RewriteSpec::new(dir.path(), web_extensions(), preset.rules);
    rewrite(&local(), &spec, RewriteMode::Write).unwrap();

    let after = fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn overlapping_rules_apply_in_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.html", "assets/media/griga-logo.jpg");

    // The second rule sees the first rule's output, so it matches "logos/".
    let spec = RewriteSpec::new(
        dir.path(),
        web_extensions(),
        RuleSet::new(vec![
            Replacement::new("assets/media/griga-logo.jpg", "assets/media/logos/griga-logo.jpg"),
            Replacement::new("media/logos/", "media/brand/"),
        ]),
    );
    rewrite(&local(), &spec, RewriteMode::Write).unwrap();

    assert_eq!(read(dir.path(), "index.html"), "assets/media/brand/griga-logo.jpg");
}

#[test]
fn presets_are_idempotent_across_a_site_tree() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "index.html",
        concat!(
            "<link rel=\"icon\" href=\"assets/media/griga-logo-animated.gif\">\n",
            "<meta property=\"og:image\" content=\"https://grigaeventsfze.com/assets/media/griga-logo.jpg\">\n",
            "<img src=\"assets/img/hero.jpg\">\n",
        ),
    );
    write(
        dir.path(),
        "assets/js/events.js",
        "const flyer = 'assets/media/murima-night-flyer.jpg';\n",
    );
    write(
        dir.path(),
        "assets/css/site.css",
        ".hero { background: url('https://grigaeventsfze.com/assets/img/hero.jpg'); }\n",
    );

    for preset in [presets::relocate_media(), presets::update_media()] {
        let spec = RewriteSpec::new(dir.path(), web_extensions(), preset.rules.clone());
        rewrite(&local(), &spec, RewriteMode::Write).unwrap();
    }

    let expected_index = concat!(
        "<link rel=\"icon\" href=\"assets/media/logos/griga-logo-animated.gif\">\n",
        "<meta property=\"og:image\" content=\"https://grigaeventsfze.com/assets/media/logos/griga-logo.jpg\">\n",
        "<img src=\"assets/media/hero.jpg\">\n",
    );
    assert_eq!(read(dir.path(), "index.html"), expected_index);
    assert_eq!(
        read(dir.path(), "assets/js/events.js"),
        "const flyer = 'assets/media/images/murima-night-flyer.jpg';\n"
    );
    assert_eq!(
        read(dir.path(), "assets/css/site.css"),
        ".hero { background: url('https://grigaeventsfze.com/assets/media/hero.jpg'); }\n"
    );

    for preset in [presets::relocate_media(), presets::update_media()] {
        let spec = RewriteSpec::new(dir.path(), web_extensions(), preset.rules.clone());
        let second = rewrite(&local(), &spec, RewriteMode::Write).unwrap();
        assert!(second.edits.is_empty(), "{} changed files again", preset.name);
    }
    assert_eq!(read(dir.path(), "index.html"), expected_index);
}

#[test]
fn invalid_utf8_file_fails_with_decode_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken.md"), [0x61, 0xc3, 0x28]).unwrap();

    let spec = RewriteSpec::new(
        dir.path(),
        web_extensions(),
        RuleSet::new(vec![Replacement::new("a", "b")]),
    );
    let err = rewrite(&local(), &spec, RewriteMode::Write).unwrap_err();

    assert_eq!(err.code.as_str(), "rewrite.decode_failed");
    assert!(err.details["path"].as_str().unwrap().ends_with("broken.md"));
}

#[test]
fn missing_root_fails_with_not_found() {
    let dir = tempdir().unwrap();
    let spec = RewriteSpec::new(
        dir.path().join("missing"),
        web_extensions(),
        RuleSet::new(vec![Replacement::new("a", "b")]),
    );

    let err = rewrite(&local(), &spec, RewriteMode::Write).unwrap_err();
    assert_eq!(err.code.as_str(), "rewrite.root_not_found");
}
