//! One open preview and its position in the sibling sequence

use std::path::{Path, PathBuf};

use super::probe::ImageDetails;
use super::siblings::Siblings;

/// Navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Wrap a stepped index back into `[0, len)`.
///
/// Stepping before the first image lands on the last one and stepping past
/// the last lands on the first. `len` must be non-zero.
pub fn wrap_index(target: isize, len: usize) -> usize {
    if target < 0 {
        len - 1
    } else if target as usize >= len {
        0
    } else {
        target as usize
    }
}

/// An open preview
#[derive(Debug, Clone)]
pub struct Session {
    /// Sorted sibling sequence, fixed for the lifetime of the session
    paths: Vec<PathBuf>,
    /// Position of the displayed image in `paths`
    current_index: usize,
    /// Set once the preview has been closed
    disposed: bool,
    /// Metadata of the displayed image, if the probe has finished
    details: Option<ImageDetails>,
}

impl Session {
    /// Create a session from a resolved sibling sequence
    pub fn new(siblings: Siblings) -> Self {
        debug_assert!(siblings.index < siblings.paths.len());
        Self {
            paths: siblings.paths,
            current_index: siblings.index,
            disposed: false,
            details: None,
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Path of the displayed image
    pub fn current_path(&self) -> &Path {
        &self.paths[self.current_index]
    }

    /// File name of the displayed image
    pub fn current_file_name(&self) -> String {
        self.current_path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn details(&self) -> Option<&ImageDetails> {
        self.details.as_ref()
    }

    /// Store probe results, unless the session has moved on from `index`
    /// since the probe was started. Returns whether they were kept.
    pub fn set_details(&mut self, index: usize, details: ImageDetails) -> bool {
        if index != self.current_index {
            return false;
        }
        self.details = Some(details);
        true
    }

    /// Step one image in `direction`, wrapping at both ends.
    /// Returns the new index.
    pub fn step(&mut self, direction: Direction) -> usize {
        let target = self.current_index as isize + direction.offset();
        self.current_index = wrap_index(target, self.paths.len());
        self.details = None;
        self.current_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(len: usize, index: usize) -> Session {
        let paths = (0..len)
            .map(|i| PathBuf::from(format!("/pics/img{}.png", i)))
            .collect();
        Session::new(Siblings { paths, index })
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(5, 5), 0);
        assert_eq!(wrap_index(3, 5), 3);
        assert_eq!(wrap_index(0, 1), 0);
    }

    #[test]
    fn test_next_n_times_is_identity() {
        for len in 1..6 {
            for start in 0..len {
                let mut s = session(len, start);
                for _ in 0..len {
                    s.step(Direction::Next);
                }
                assert_eq!(s.current_index(), start);
            }
        }
    }

    #[test]
    fn test_previous_from_first_wraps_to_last() {
        let mut s = session(4, 0);
        assert_eq!(s.step(Direction::Previous), 3);
        assert_eq!(s.current_path(), Path::new("/pics/img3.png"));
    }

    #[test]
    fn test_next_from_last_wraps_to_first() {
        let mut s = session(4, 3);
        assert_eq!(s.step(Direction::Next), 0);
    }

    #[test]
    fn test_single_image_stays_put() {
        let mut s = session(1, 0);
        assert_eq!(s.step(Direction::Next), 0);
        assert_eq!(s.step(Direction::Previous), 0);
    }

    #[test]
    fn test_stale_details_are_dropped() {
        let mut s = session(3, 0);
        let details = ImageDetails { width: 10, height: 20, format: Some("png".to_string()), bytes: 4 };

        s.step(Direction::Next);
        assert!(!s.set_details(0, details.clone()));
        assert!(s.details().is_none());

        assert!(s.set_details(1, details.clone()));
        assert_eq!(s.details(), Some(&details));

        s.step(Direction::Next);
        assert!(s.details().is_none());
    }

    #[test]
    fn test_dispose() {
        let mut s = session(2, 1);
        assert!(!s.is_disposed());
        s.dispose();
        assert!(s.is_disposed());
    }
}
