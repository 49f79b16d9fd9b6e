//! Artifact classification
//!
//! Every artifact string gets exactly one [`ArtifactKind`], decided by an
//! ordered list of tests where the first match wins:
//!
//! 1. IPv4 dotted quad, each octet in `0..=255`
//! 2. Hex digest of 32 to 128 characters (MD5 through SHA-512)
//! 3. Domain name whose top-level label is alphabetic
//! 4. File name ending in a tracked extension
//! 5. Name containing a known process
//! 6. Unknown
//!
//! The order matters: `powershell.exe` is a [`ArtifactKind::File`] because the
//! extension test runs before the process test.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// File extensions that mark an artifact as a file (matched case-insensitively)
pub const FILE_EXTENSIONS: [&str; 6] = [".exe", ".dll", ".bat", ".ps1", ".doc", ".pdf"];

/// Process names recognised anywhere inside an artifact (case-insensitive)
pub const KNOWN_PROCESSES: [&str; 5] = ["powershell", "cmd", "rundll32", "regsvr32", "svchost"];

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("Invalid IPv4 regex")
});

static HASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{32,128}$").expect("Invalid hash regex"));

static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("Invalid domain regex")
});

/// Classification bucket of an artifact
///
/// The declaration order is the order used by every projection that groups
/// artifacts by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Ip,
    Hash,
    Domain,
    File,
    Process,
    Unknown,
}

impl ArtifactKind {
    /// All kinds, in grouping order
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::Ip,
        ArtifactKind::Hash,
        ArtifactKind::Domain,
        ArtifactKind::File,
        ArtifactKind::Process,
        ArtifactKind::Unknown,
    ];

    /// Lowercase identifier, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Ip => "ip",
            ArtifactKind::Hash => "hash",
            ArtifactKind::Domain => "domain",
            ArtifactKind::File => "file",
            ArtifactKind::Process => "process",
            ArtifactKind::Unknown => "unknown",
        }
    }

    /// Title-case name used in summaries and descriptions
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Ip => "Ip",
            ArtifactKind::Hash => "Hash",
            ArtifactKind::Domain => "Domain",
            ArtifactKind::File => "File",
            ArtifactKind::Process => "Process",
            ArtifactKind::Unknown => "Unknown",
        }
    }

    /// Legend glyph shown next to artifacts of this kind
    pub fn glyph(&self) -> &'static str {
        match self {
            ArtifactKind::Ip => "🌐",
            ArtifactKind::Hash => "🔐",
            ArtifactKind::Domain => "🌍",
            ArtifactKind::File => "📄",
            ArtifactKind::Process => "⚙️",
            ArtifactKind::Unknown => "🔍",
        }
    }

    /// Fill colour a renderer may use for nodes of this kind
    pub fn color(&self) -> &'static str {
        match self {
            ArtifactKind::Ip => "#FF6B6B",
            ArtifactKind::Hash => "#4ECDC4",
            ArtifactKind::Domain => "#FFEAA7",
            ArtifactKind::File => "#45B7D1",
            ArtifactKind::Process => "#96CEB4",
            ArtifactKind::Unknown => "#DDA0DD",
        }
    }

    /// Human description of an artifact of this kind
    pub fn describe(&self, artifact: &str) -> String {
        match self {
            ArtifactKind::Ip => format!("IP address: {}", artifact),
            ArtifactKind::Hash => format!("Cryptographic hash: {}", artifact),
            ArtifactKind::Domain => format!("Domain: {}", artifact),
            ArtifactKind::File => format!("File: {}", artifact),
            ArtifactKind::Process => format!("Process: {}", artifact),
            ArtifactKind::Unknown => format!("Artifact: {}", artifact),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an artifact string. Total and pure: anything unrecognised is
/// [`ArtifactKind::Unknown`].
pub fn classify(artifact: &str) -> ArtifactKind {
    if is_ipv4(artifact) {
        ArtifactKind::Ip
    } else if is_hash(artifact) {
        ArtifactKind::Hash
    } else if is_domain(artifact) {
        ArtifactKind::Domain
    } else if is_file(artifact) {
        ArtifactKind::File
    } else if is_process(artifact) {
        ArtifactKind::Process
    } else {
        ArtifactKind::Unknown
    }
}

pub fn is_ipv4(artifact: &str) -> bool {
    IPV4_REGEX.is_match(artifact)
}

pub fn is_hash(artifact: &str) -> bool {
    HASH_REGEX.is_match(artifact)
}

/// A name whose last label is a tracked file extension is a file, not a domain.
pub fn is_domain(artifact: &str) -> bool {
    if !DOMAIN_REGEX.is_match(artifact) {
        return false;
    }
    let lower = artifact.to_ascii_lowercase();
    !FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_file(artifact: &str) -> bool {
    let lower = artifact.to_ascii_lowercase();
    lower.contains('.') && FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_process(artifact: &str) -> bool {
    let lower = artifact.to_ascii_lowercase();
    KNOWN_PROCESSES.iter().any(|proc| lower.contains(proc))
}
