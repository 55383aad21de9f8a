use std::fmt;

/// Host operating systems the tool knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// `ip` from iproute2, dummy devices available.
    Linux,
    /// `ifconfig` aliases only.
    MacOs,
}

impl Platform {
    /// Returns the platform this binary was built for, or `None` when the host
    /// is not supported at all.
    pub fn current() -> Option<Self> {
        #[cfg(target_os = "linux")]
        {
            Some(Platform::Linux)
        }
        #[cfg(target_os = "macos")]
        {
            Some(Platform::MacOs)
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            None
        }
    }

    pub fn supports_dummy_devices(&self) -> bool {
        matches!(self, Platform::Linux)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOs => write!(f, "macOS"),
        }
    }
}
