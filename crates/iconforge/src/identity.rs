//! The two applications that ship icons.

use std::fmt;

use crate::resolution::IconResolution;

/// One of the two toolchain applications needing its own icon set.
///
/// Each identity owns a filename stem shared by its source rasters
/// (`compiler_256.png`) and its generated containers (`compiler.ico`,
/// `compiler.icns`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconIdentity {
    /// The primary application: the compiler binary.
    Compiler,
    /// The auxiliary tool: the language-server binary.
    LanguageServer,
}

impl IconIdentity {
    /// The filename stem for this identity.
    pub const fn stem(self) -> &'static str {
        match self {
            IconIdentity::Compiler => "compiler",
            IconIdentity::LanguageServer => "lsp",
        }
    }

    /// Both identities, in conversion order.
    pub fn all() -> &'static [IconIdentity] {
        &[IconIdentity::Compiler, IconIdentity::LanguageServer]
    }

    /// The expected source file name for one ladder resolution.
    pub fn source_file_name(self, resolution: IconResolution) -> String {
        format!("{}_{}.png", self.stem(), resolution.as_pixels())
    }
}

impl fmt::Display for IconIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconIdentity::Compiler => write!(f, "compiler"),
            IconIdentity::LanguageServer => write!(f, "language server"),
        }
    }
}
