/// Strategy flag passed through to the stitching engine.
///
/// `Panorama` assumes a wide field-of-view sweep; `Scans` assumes flatter,
/// more planar overlapping captures (document-like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StitchMode {
    #[default]
    Panorama,
    Scans,
}

impl StitchMode {
    /// Permissive parse from a free-form request field: the literal "scans"
    /// (any case) selects `Scans`, everything else falls back to `Panorama`.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("scans") {
            StitchMode::Scans
        } else {
            StitchMode::Panorama
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StitchMode::Panorama => "panorama",
            StitchMode::Scans => "scans",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_is_case_insensitive() {
        assert_eq!(StitchMode::parse("scans"), StitchMode::Scans);
        assert_eq!(StitchMode::parse("SCANS"), StitchMode::Scans);
        assert_eq!(StitchMode::parse("  Scans "), StitchMode::Scans);
    }

    #[test]
    fn everything_else_is_panorama() {
        assert_eq!(StitchMode::parse("panorama"), StitchMode::Panorama);
        assert_eq!(StitchMode::parse(""), StitchMode::Panorama);
        assert_eq!(StitchMode::parse("scan"), StitchMode::Panorama);
        assert_eq!(StitchMode::parse("garbage"), StitchMode::Panorama);
    }

    #[test]
    fn default_is_panorama() {
        assert_eq!(StitchMode::default(), StitchMode::Panorama);
    }
}
