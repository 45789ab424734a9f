//! The conversion pipeline: scan, pack, stage, report.
//!
//! Per ICNS target the states are `Scanned → Staged → {Packed |
//! AwaitingExternalTool}`; both final states are terminal and only the
//! error path is a failure. ICO targets go straight from `Scanned` to
//! `Packed`.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::Layout;
use crate::error::{ForgeError, ForgeResult};
use crate::icns;
use crate::ico;
use crate::identity::IconIdentity;
use crate::scanner;

/// A platform icon container this tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionTarget {
    /// Windows ICO container, packed directly.
    Ico,
    /// macOS ICNS container, packed through the external tool.
    Icns,
}

impl ConversionTarget {
    /// Output path for an identity under this target.
    pub fn output_path(self, layout: &Layout, identity: IconIdentity) -> PathBuf {
        match self {
            ConversionTarget::Ico => layout.ico_path(identity),
            ConversionTarget::Icns => layout.icns_path(identity),
        }
    }

    /// Whether this host can finish packing for this target.
    pub fn is_available(self) -> bool {
        match self {
            ConversionTarget::Ico => true,
            ConversionTarget::Icns => icns::iconutil_available(),
        }
    }
}

impl fmt::Display for ConversionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionTarget::Ico => write!(f, "ICO"),
            ConversionTarget::Icns => write!(f, "ICNS"),
        }
    }
}

/// Terminal state of one identity/target pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The container was fully packed.
    Packed {
        /// Where the container was written.
        path: PathBuf,
    },
    /// Staging completed but the external packer is absent on this host.
    ///
    /// Deferred completion, not a failure: re-run on a host with the tool
    /// to finish the step.
    AwaitingExternalTool {
        /// The staged iconset left in place for the other host.
        staged_dir: PathBuf,
    },
}

impl TargetOutcome {
    /// True if the container was fully packed.
    pub fn is_packed(&self) -> bool {
        matches!(self, TargetOutcome::Packed { .. })
    }
}

/// One line of the run report.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Which identity was converted.
    pub identity: IconIdentity,
    /// Which container format.
    pub target: ConversionTarget,
    /// How the step ended.
    pub outcome: TargetOutcome,
}

/// Summary of a conversion run.
#[derive(Debug, Clone)]
pub struct RunReport {
    entries: Vec<ReportEntry>,
}

impl RunReport {
    /// The per-identity, per-target results.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// True if every target was fully packed on this host.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_packed())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match &entry.outcome {
                TargetOutcome::Packed { path } => writeln!(
                    f,
                    "{}: {} packed -> {}",
                    entry.identity.stem(),
                    entry.target,
                    path.display()
                )?,
                TargetOutcome::AwaitingExternalTool { staged_dir } => writeln!(
                    f,
                    "{}: {} staged at {} (awaiting {})",
                    entry.identity.stem(),
                    entry.target,
                    staged_dir.display(),
                    icns::ICONUTIL
                )?,
            }
        }
        if !self.is_complete() {
            writeln!(
                f,
                "re-run on a macOS host to finish the deferred ICNS packing"
            )?;
        }
        Ok(())
    }
}

/// Run the full conversion for both identities.
///
/// Both identities are scanned before any output path is touched, so a
/// missing identity aborts with the output tree in its previous state.
///
/// # Errors
///
/// Returns the first scanning, packing, or staging error. A host without
/// the external ICNS packer is not an error.
pub fn run(layout: &Layout) -> ForgeResult<RunReport> {
    let sets = scanner::scan_all(layout)?;

    let mut entries = Vec::new();
    for set in &sets {
        let identity = set.identity();

        fs::create_dir_all(layout.windows_out_dir())
            .map_err(|e| ForgeError::io(layout.windows_out_dir(), e))?;
        fs::create_dir_all(layout.macos_out_dir())
            .map_err(|e| ForgeError::io(layout.macos_out_dir(), e))?;

        // ICO: pack the subset the directory format can express.
        let ico_set = set.restricted_to_max(ico::MAX_PIXELS);
        if ico_set.is_empty() {
            tracing::warn!(
                identity = %identity,
                "no resolutions representable in an ICO directory; skipping ICO"
            );
        } else {
            let dest = ConversionTarget::Ico.output_path(layout, identity);
            ico::pack(&ico_set, &dest)?;
            entries.push(ReportEntry {
                identity,
                target: ConversionTarget::Ico,
                outcome: TargetOutcome::Packed { path: dest },
            });
        }

        // ICNS: stage always, pack only where the tool exists.
        let staging_dir = layout.iconset_dir(identity);
        icns::stage(set, &staging_dir)?;
        let outcome = if ConversionTarget::Icns.is_available() {
            let dest = ConversionTarget::Icns.output_path(layout, identity);
            icns::pack_with_iconutil(&staging_dir, &dest)?;
            TargetOutcome::Packed { path: dest }
        } else {
            tracing::warn!(
                identity = %identity,
                tool = icns::ICONUTIL,
                "external packer unavailable on this host; ICNS packing deferred"
            );
            TargetOutcome::AwaitingExternalTool {
                staged_dir: staging_dir,
            }
        };
        entries.push(ReportEntry {
            identity,
            target: ConversionTarget::Icns,
            outcome,
        });
    }

    Ok(RunReport { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_completeness() {
        let packed = ReportEntry {
            identity: IconIdentity::Compiler,
            target: ConversionTarget::Ico,
            outcome: TargetOutcome::Packed {
                path: PathBuf::from("out/compiler.ico"),
            },
        };
        let deferred = ReportEntry {
            identity: IconIdentity::Compiler,
            target: ConversionTarget::Icns,
            outcome: TargetOutcome::AwaitingExternalTool {
                staged_dir: PathBuf::from("out/compiler.iconset"),
            },
        };

        let complete = RunReport {
            entries: vec![packed.clone()],
        };
        assert!(complete.is_complete());
        assert!(!complete.to_string().contains("deferred"));

        let partial = RunReport {
            entries: vec![packed, deferred],
        };
        assert!(!partial.is_complete());
        let rendered = partial.to_string();
        assert!(rendered.contains("compiler: ICO packed -> out/compiler.ico"));
        assert!(rendered.contains("awaiting iconutil"));
    }

    #[test]
    fn test_ico_target_always_available() {
        assert!(ConversionTarget::Ico.is_available());
    }
}
