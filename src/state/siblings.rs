//! Sibling resolution
//!
//! Given the image the user opened, find every image in the same folder
//! and sort them the way a file manager would (ignoring case and accents,
//! with embedded numbers compared by value).

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

use crate::error::{Result, ViewerError};

/// File extensions offered in the open dialog and accepted as siblings
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp"];

/// The sorted sibling sequence of an opened file and the file's position in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Siblings {
    pub paths: Vec<PathBuf>,
    pub index: usize,
}

/// Whether the path carries one of the allowed image extensions
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Compare two names case- and accent-insensitively, with digit runs
/// compared as numbers.
///
/// `"img2"` sorts before `"img10"` and `"Émile"` sorts with the `e`s.
/// Zero padding is ignored while walking the names and only breaks a tie
/// between otherwise equal names, so `"a1"` < `"a01"` but `"a01b"` < `"a1c"`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    let mut padding = Ordering::Equal;

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return padding,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        let ord = if l.is_ascii_digit() && r.is_ascii_digit() {
            let left_run = take_digits(&mut left);
            let right_run = take_digits(&mut right);
            if padding == Ordering::Equal {
                padding = left_run.len().cmp(&right_run.len());
            }
            compare_digit_values(&left_run, &right_run)
        } else {
            left.next();
            right.next();
            l.cmp(&r)
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Lowercase and strip diacritics (NFD, then drop combining marks)
fn fold(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_digit_values(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');

    // Without leading zeros, a longer run is a bigger number
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Ordering used for sibling sequences.
///
/// Files are compared by stem only; the extension and then the raw file
/// name only break ties so the order is total.
pub fn compare_paths(a: &Path, b: &Path) -> Ordering {
    let stem = |p: &Path| p.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = |p: &Path| p.extension().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    natural_cmp(&stem(a), &stem(b))
        .then_with(|| natural_cmp(&ext(a), &ext(b)))
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

/// List the images directly inside `folder` (no recursion), sorted.
///
/// Fails only when the folder itself cannot be read; unreadable entries
/// inside it are skipped.
pub fn list_siblings(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(ViewerError::ReadDir {
                    path: folder.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", folder.display(), err);
                continue;
            }
        };

        if entry.file_type().is_file() && is_image(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    paths.sort_by(|a, b| compare_paths(a, b));
    Ok(paths)
}

/// Build the sibling sequence for `file` and locate `file` in it.
///
/// The listing is taken once; if `file` is not part of it (removed since it
/// was picked, or not an allowed image type) this fails with
/// [`ViewerError::NotInListing`].
pub fn resolve(file: &Path) -> Result<Siblings> {
    let file = std::path::absolute(file).map_err(|_| ViewerError::NoParent {
        path: file.to_path_buf(),
    })?;

    let folder = file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .ok_or_else(|| ViewerError::NoParent { path: file.clone() })?;

    let paths = list_siblings(folder)?;
    tracing::debug!("Found {} images in {}", paths.len(), folder.display());

    let index = paths
        .iter()
        .position(|candidate| *candidate == file)
        .ok_or_else(|| ViewerError::NotInListing { path: file.clone() })?;

    Ok(Siblings { paths, index })
}
