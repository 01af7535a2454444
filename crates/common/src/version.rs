/// Build information captured at compile time of the invoking crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Capture the invoking crate's name and version from its Cargo
/// environment.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::BuildInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

pub use crate::build_info;

#[cfg(test)]
mod tests {
    #[test]
    fn test_build_info_display() {
        let info = build_info!();
        assert_eq!(info.to_string(), format!("{} {}", info.name, info.version));
    }
}
