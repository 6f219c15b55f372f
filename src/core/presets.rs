//! Built-in rule sets for the site's media moves.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::rules::{Replacement, RuleSet};

const SITE_URL: &str = "https://grigaeventsfze.com";

#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub rules: RuleSet,
}

/// Logos move to `assets/media/logos/`, the night flyer to `assets/media/images/`.
///
/// Relative paths come first, so they also rewrite the matching absolute URLs;
/// the URL rules only catch what the relative ones missed.
pub fn relocate_media() -> Preset {
    let moves = [
        ("griga-logo-animated.gif", "logos"),
        ("griga-logo.jpg", "logos"),
        ("murima-night-flyer.jpg", "images"),
    ];

    let relative = moves.iter().map(|(file, dir)| {
        Replacement::new(
            format!("assets/media/{}", file),
            format!("assets/media/{}/{}", dir, file),
        )
    });
    let absolute = moves.iter().map(|(file, dir)| {
        Replacement::new(
            format!("{}/assets/media/{}", SITE_URL, file),
            format!("{}/assets/media/{}/{}", SITE_URL, dir, file),
        )
    });

    Preset {
        name: "relocate-media",
        description: "Move logos and flyers into assets/media subdirectories",
        rules: RuleSet::new(relative.chain(absolute).collect()),
    }
}

/// `assets/img/` was renamed to `assets/media/`.
pub fn update_media() -> Preset {
    let absolute_img = format!("{}/assets/img/", SITE_URL);

    Preset {
        name: "update-media",
        description: "Rename the assets/img directory to assets/media",
        rules: RuleSet::new(vec![
            Replacement::new(absolute_img.clone(), format!("{}/assets/media/", SITE_URL)),
            Replacement::new("assets/img/", "assets/media/"),
        ])
        .with_markers(["assets/img/".to_string(), absolute_img]),
    }
}

pub fn all() -> Vec<Preset> {
    vec![relocate_media(), update_media()]
}

pub fn find(name: &str) -> Result<Preset> {
    all()
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::preset_not_found(name))
}
