//! Output profile discovery.
//!
//! Profiles are looked up on an ordered list of candidate paths; the first
//! one that exists wins. An explicit path bypasses the list entirely.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of a profile lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    /// A profile file was found.
    Profile(PathBuf),
    /// No usable profile; callers fall back to the direct formula.
    NoProfile,
}

impl ProfileLookup {
    /// Returns the found path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Profile(p) => Some(p),
            Self::NoProfile => None,
        }
    }
}

/// Ordered list of candidate locations for a CMYK output profile.
#[derive(Debug, Clone)]
pub struct ProfileSearch {
    candidates: Vec<PathBuf>,
}

impl ProfileSearch {
    /// The standard search list rooted at `assets_root`.
    ///
    /// Order: FOGRA39 (ISO Coated v2) and SWOP in the asset tree, then the
    /// macOS generic CMYK profile, then the Linux system ICC directory.
    pub fn standard(assets_root: &Path) -> Self {
        let color = assets_root.join("color");
        Self {
            candidates: vec![
                color.join("ISOcoated_v2_300_eci.icc"),
                color.join("USWebCoatedSWOP.icc"),
                PathBuf::from("/System/Library/ColorSync/Profiles/Generic CMYK Profile.icc"),
                PathBuf::from("/usr/share/color/icc/ISOcoated_v2_300_eci.icc"),
            ],
        }
    }

    /// A search over a caller-supplied list.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Candidate paths in lookup order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Resolves the profile to use.
    ///
    /// An explicit path is used as-is when it exists and yields
    /// [`ProfileLookup::NoProfile`] when it does not; the candidate list is
    /// only consulted when no explicit path is given.
    pub fn locate(&self, explicit: Option<&Path>) -> ProfileLookup {
        if let Some(path) = explicit {
            if path.is_file() {
                debug!(profile = %path.display(), "using explicit profile");
                return ProfileLookup::Profile(path.to_path_buf());
            }
            warn!(profile = %path.display(), "profile not found");
            return ProfileLookup::NoProfile;
        }

        match self.candidates.iter().find(|p| p.is_file()) {
            Some(found) => {
                debug!(profile = %found.display(), "located output profile");
                ProfileLookup::Profile(found.clone())
            }
            None => {
                debug!(searched = self.candidates.len(), "no output profile on search path");
                ProfileLookup::NoProfile
            }
        }
    }
}
