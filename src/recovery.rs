//! Recovery strategies for malformed by-subject lines.
//!
//! A by-subject file produced by a long pipeline occasionally carries a
//! truncated or garbled line. [`RecoveryMode`] decides whether the reader stops
//! at such a line or skips it, and [`RecoveryContext`] keeps track of what was
//! skipped.

use crate::error::{BySubjectError, Result};

/// Maximum number of skipped line numbers and messages kept in a [`RecoveryContext`].
pub const MAX_RECOVERY_MESSAGES: usize = 100;

/// Strategy for handling malformed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Strict mode: return an error at the first malformed line (default)
    #[default]
    Strict,
    /// Lenient mode: log the malformed line and continue with the next one
    Lenient,
}

/// Recovery context for handling malformed lines
#[derive(Debug, Default)]
pub struct RecoveryContext {
    /// Current recovery mode
    pub mode: RecoveryMode,
    /// Total number of lines skipped
    pub lines_skipped: usize,
    /// First skipped line numbers, in order, at most [`MAX_RECOVERY_MESSAGES`]
    pub skipped_lines: Vec<usize>,
    /// Recovery messages for the lines in `skipped_lines`
    pub recovery_messages: Vec<String>,
}

impl RecoveryContext {
    /// Create a new recovery context with the given mode
    #[must_use]
    pub fn new(mode: RecoveryMode) -> Self {
        RecoveryContext {
            mode,
            lines_skipped: 0,
            skipped_lines: Vec::new(),
            recovery_messages: Vec::new(),
        }
    }

    /// Whether any line has been skipped so far
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.lines_skipped > 0
    }

    /// Handle a malformed line according to the recovery mode.
    ///
    /// # Errors
    ///
    /// Returns [`BySubjectError::MalformedLine`] in strict mode. In lenient
    /// mode the line is counted as skipped and `Ok(())` is returned; only the
    /// first [`MAX_RECOVERY_MESSAGES`] line numbers and messages are kept.
    pub fn recover(&mut self, line: usize, id: u32) -> Result<()> {
        let error = BySubjectError::MalformedLine { line, id };
        match self.mode {
            RecoveryMode::Strict => Err(error),
            RecoveryMode::Lenient => {
                tracing::warn!(line, id, "skipping malformed by-subject line");
                self.lines_skipped += 1;
                if self.skipped_lines.len() < MAX_RECOVERY_MESSAGES {
                    self.skipped_lines.push(line);
                    self.recovery_messages.push(error.to_string());
                }
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_returns_error() {
        let mut context = RecoveryContext::new(RecoveryMode::Strict);
        let result = context.recover(3, 4);
        assert!(matches!(
            result,
            Err(BySubjectError::MalformedLine { line: 3, id: 4 })
        ));
        assert!(!context.has_errors());
    }

    #[test]
    fn test_lenient_records_skip() {
        let mut context = RecoveryContext::new(RecoveryMode::Lenient);
        context.recover(3, 4).unwrap();
        context.recover(9, 0).unwrap();
        assert!(context.has_errors());
        assert_eq!(context.skipped_lines, vec![3, 9]);
        assert_eq!(context.recovery_messages[0], "Malformed line 3 (id 4)");
    }

    #[test]
    fn test_lenient_keeps_bounded_history() {
        let mut context = RecoveryContext::new(RecoveryMode::Lenient);
        for line in 1..=MAX_RECOVERY_MESSAGES + 50 {
            context.recover(line, 0).unwrap();
        }
        assert_eq!(context.lines_skipped, MAX_RECOVERY_MESSAGES + 50);
        assert_eq!(context.skipped_lines.len(), MAX_RECOVERY_MESSAGES);
        assert_eq!(context.recovery_messages.len(), MAX_RECOVERY_MESSAGES);
        assert_eq!(context.skipped_lines.last(), Some(&MAX_RECOVERY_MESSAGES));
    }

    #[test]
    fn test_default_is_strict() {
        assert_eq!(RecoveryMode::default(), RecoveryMode::Strict);
        assert_eq!(RecoveryContext::default().mode, RecoveryMode::Strict);
    }
}
