//! Analyzer configuration.
//!
//! Only the flags consulted by the class passes live here; option parsing
//! and everything else about the host tool's configuration is the driver's
//! concern.

use serde::{Deserialize, Serialize};

/// Flags gating the individual passes.
///
/// All coding-style passes are controlled by [`check_coding_style`]; the
/// virtual-destructor pass is heuristic and sits behind the separate
/// [`inconclusive`] flag; the const-candidate pass is additionally disabled
/// while multiple preprocessor configurations are being checked
/// ([`ifcfg`]). The memory-primitive pass is ungated.
///
/// [`check_coding_style`]: Settings::check_coding_style
/// [`inconclusive`]: Settings::inconclusive
/// [`ifcfg`]: Settings::ifcfg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable the coding-style diagnostics.
    pub check_coding_style: bool,

    /// Enable diagnostics that may over-report (virtual destructor).
    pub inconclusive: bool,

    /// Multiple preprocessor configurations are being analyzed; suppresses
    /// the const-candidate pass, which is noisy across configurations.
    pub ifcfg: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_coding_style: true,
            inconclusive: false,
            ifcfg: false,
        }
    }
}

impl Settings {
    /// Settings with every pass enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            check_coding_style: true,
            inconclusive: true,
            ifcfg: false,
        }
    }
}
