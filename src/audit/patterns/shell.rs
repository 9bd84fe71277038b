use crate::audit::profile::Category;

pub(super) const SHELL_PATTERNS: &[(Category, &str, &str)] = &[
    (Category::Network, r"\bcurl\b", "curl command"),
    (Category::Network, r"\bwget\b", "wget command"),
    (Category::Network, r"\bnc\b", "netcat"),
    (Category::Network, r"\bssh\b", "SSH connection"),
    (Category::Network, r"\bscp\b", "SCP transfer"),
    (Category::Subprocess, r"\beval\b", "eval command"),
    (Category::Subprocess, r"\bsource\b", "source command"),
    (Category::Subprocess, r"\$\(", "command substitution"),
    (Category::FileWrite, r">\s*[^&]", "file redirect"),
    (Category::FileWrite, r"\brm\s", "file delete"),
    (Category::FileWrite, r"\bmkdir\b", "directory creation"),
    (Category::FileWrite, r"\bchmod\b", "permission change"),
    (Category::FileWrite, r"\bchown\b", "ownership change"),
];

/// Interpreters that make a shebang line mark a shell script.
pub(super) const SHELL_INTERPRETERS: &[&str] = &["sh", "bash", "zsh", "dash", "ksh"];
