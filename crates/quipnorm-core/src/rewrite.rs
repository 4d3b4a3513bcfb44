//! Rewriting of Quip image and video tags into portable markdown.
//!
//! `[Image: <url>]` becomes a markdown image pointing at the downloaded file;
//! `{video: <url>}` becomes an HTML `<video>` element that links the URL.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::assets::{AssetError, AssetStore};

lazy_static! {
    /// `[Image: <url>]`, where the URL contains no `]`.
    static ref IMAGE_TAG_RE: Regex = Regex::new(r"\[Image: ([^\]]+)\]").unwrap();
    /// `{video: <url>}`, where the URL contains no `}`.
    static ref VIDEO_TAG_RE: Regex = Regex::new(r"\{video: ([^\}]+)\}").unwrap();
}

/// Image URLs in order of appearance, duplicates included.
pub fn extract_image_urls(text: &str) -> Vec<String> {
    IMAGE_TAG_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Downloads every referenced image into `store`, then rewrites the tags.
///
/// If the batch cannot persist its metadata, the error is returned and no
/// text is produced. Individual images that failed to download are rewritten
/// with an empty link target.
pub fn normalize(text: &str, store: &mut AssetStore) -> Result<String, AssetError> {
    let urls = extract_image_urls(text);
    let summary = store.save_all(&urls)?;
    if !summary.failed.is_empty() {
        tracing::warn!(
            failed = summary.failed.len(),
            "some images could not be downloaded; their links will be empty"
        );
    }
    Ok(rewrite_tags(text, store))
}

/// Substitutes image and video tags using the filenames already in `store`.
pub fn rewrite_tags(text: &str, store: &AssetStore) -> String {
    let with_images = IMAGE_TAG_RE.replace_all(text, |caps: &Captures| {
        let filename = store.filename(&caps[1]).unwrap_or_default();
        image_markup(filename)
    });
    VIDEO_TAG_RE
        .replace_all(&with_images, |caps: &Captures| video_markup(&caps[1]))
        .into_owned()
}

fn image_markup(filename: &str) -> String {
    format!("\n![]({})\n\n", filename)
}

fn video_markup(url: &str) -> String {
    format!("<video src='{}' controls='true'></video>", url)
}
