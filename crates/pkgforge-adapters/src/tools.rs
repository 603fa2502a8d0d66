//! Executable lookup on `PATH`.

use std::path::PathBuf;

use pkgforge_core::application::ports::ToolLocator;

#[derive(Debug, Clone, Copy, Default)]
pub struct PathToolLocator;

impl PathToolLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ToolLocator for PathToolLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_is_not_found() {
        assert!(PathToolLocator::new()
            .locate("pkgforge-no-such-tool-7f3a")
            .is_none());
    }
}
