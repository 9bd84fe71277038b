use crate::audit::profile::Category;

pub(super) const PYTHON_PATTERNS: &[(Category, &str, &str)] = &[
    (Category::Network, r"\burllib\b", "urllib import"),
    (Category::Network, r"\brequests\b", "requests library"),
    (Category::Network, r"\bhttpx\b", "httpx library"),
    (Category::Network, r"\baiohttp\b", "aiohttp library"),
    (Category::Network, r"\bsocket\b", "socket module"),
    (Category::Network, r"\bhttp\.client\b", "http.client module"),
    (Category::Network, r"\bftplib\b", "FTP library"),
    (Category::Network, r"\bsmtplib\b", "SMTP library"),
    (Category::Network, r"https?://", "hardcoded URL"),
    (Category::Subprocess, r"\bsubprocess\b", "subprocess module"),
    (Category::Subprocess, r"\bos\.system\b", "os.system call"),
    (Category::Subprocess, r"\bos\.popen\b", "os.popen call"),
    (Category::Subprocess, r"\bos\.exec", "os.exec* call"),
    (Category::Subprocess, r"\bshutil\.which\b", "binary lookup"),
    (Category::Subprocess, r"\bPopen\b", "Popen constructor"),
    (Category::FileWrite, r#"open\s*\([^)]*['"][wa]"#, "file write/append"),
    (Category::FileWrite, r"\bshutil\.copy", "file copy"),
    (Category::FileWrite, r"\bshutil\.move\b", "file move"),
    (Category::FileWrite, r"\bos\.rename\b", "file rename"),
    (Category::FileWrite, r"\bos\.remove\b", "file delete"),
    (Category::FileWrite, r"\bos\.unlink\b", "file unlink"),
    (Category::FileWrite, r"\bos\.rmdir\b", "directory remove"),
    (Category::FileWrite, r"\bshutil\.rmtree\b", "recursive delete"),
    (Category::FileWrite, r"\bos\.makedirs\b", "directory creation"),
    (Category::FileWrite, r"\bPath\b[^;]*\.write_", "pathlib write"),
    (Category::FileWrite, r"\bPath\b[^;]*\.mkdir\b", "pathlib mkdir"),
    (Category::FileWrite, r"\bPath\b[^;]*\.unlink\b", "pathlib unlink"),
    (Category::FileRead, r#"open\s*\([^)]*['"]r"#, "file read"),
    (Category::FileRead, r"\bPath\b[^;]*\.read_", "pathlib read"),
    (Category::FileRead, r"\bos\.walk\b", "directory walk"),
    (Category::FileRead, r"\bos\.listdir\b", "directory listing"),
    (Category::FileRead, r"\bglob\b", "glob pattern"),
    (Category::Environment, r"\bos\.environ\b", "env var access"),
    (Category::Environment, r"\bos\.getenv\b", "env var read"),
    (Category::Environment, r"\bos\.putenv\b", "env var write"),
    (Category::Crypto, r"\bhashlib\b", "hash computation"),
    (Category::Crypto, r"\bhmac\b", "HMAC operations"),
    (Category::Crypto, r"\bssl\b", "SSL/TLS"),
    (Category::Crypto, r"\bcryptography\b", "cryptography library"),
    (
        Category::Serialization,
        r"\bpickle\b",
        "pickle (unsafe deserialization)",
    ),
    (
        Category::Serialization,
        r"\byaml\.load\b",
        "YAML load (potentially unsafe)",
    ),
    (Category::Serialization, r"\beval\b\s*\(", "eval() call"),
    (Category::Serialization, r"\bexec\b\s*\(", "exec() call"),
    (Category::Serialization, r"\b__import__\b", "dynamic import"),
    (Category::Serialization, r"\bcompile\b\s*\(", "compile() call"),
];
