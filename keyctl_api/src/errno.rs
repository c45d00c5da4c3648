//! Explicit errno values at the facility seam

use std::fmt;
use std::io;

/// A kernel error code captured immediately after a failing call.
///
/// errno is only meaningful at the instant a call fails, so facility
/// implementations convert it to this owned value before doing anything
/// else, and results carry it explicitly instead of reading a process
/// global later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(pub i32);

impl Errno {
    /// Returns the raw errno value
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Returns the OS-provided human-readable description of this errno
    pub fn description(self) -> String {
        io::Error::from_raw_os_error(self.0).to_string()
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Log lines read like strerror output rather than bare numbers
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_embeds_os_text() {
        let text = Errno(libc::EACCES).description();
        assert!(!text.is_empty());
        // io::Error appends "(os error N)" to the strerror text
        assert!(text.contains(&format!("(os error {})", libc::EACCES)));
    }

    #[test]
    fn test_raw_round_trip() {
        assert_eq!(Errno(libc::ENOKEY).raw(), libc::ENOKEY);
    }
}
