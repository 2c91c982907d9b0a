//! Global default ignore patterns applied to every collection.
//!
//! Order matters: a negated line must come after the broader rule it
//! re-includes.

pub const GLOBAL_PATTERNS: &[&str] = &[
    // Dependencies and build output
    "node_modules/",
    "bower_components/",
    "jspm_packages/",
    "dist/",
    "build/",
    "out/",
    ".next/",
    ".nuxt/",
    ".turbo/",
    ".vercel/",
    ".cache/",
    "coverage/",
    "storybook-static/",
    "target/",
    "*.tsbuildinfo",
    "*.min.js",
    "*.min.css",
    "*.map",
    // Lockfiles
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "npm-shrinkwrap.json",
    // Images and media
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.webp",
    "*.avif",
    "*.ico",
    "*.bmp",
    "*.tiff",
    "*.mp3",
    "*.mp4",
    "*.mov",
    "*.webm",
    "*.wav",
    // Fonts
    "*.woff",
    "*.woff2",
    "*.ttf",
    "*.otf",
    "*.eot",
    // Archives and binaries
    "*.zip",
    "*.tar",
    "*.gz",
    "*.tgz",
    "*.7z",
    "*.rar",
    "*.pdf",
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    "*.wasm",
    "*.node",
    // Environment secrets
    ".env",
    ".env.*",
    "!.env.example",
    "*.pem",
    "*.key",
    // IDE and OS metadata
    ".idea/",
    ".vscode/",
    "*.swp",
    "*.swo",
    ".DS_Store",
    "Thumbs.db",
    // Logs
    "*.log",
    "logs/",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
    // Source for frameworks other than React
    "*.vue",
    "*.svelte",
    "*.astro",
];

#[cfg(test)]
mod tests {
    use super::GLOBAL_PATTERNS;

    #[test]
    fn negations_follow_the_rule_they_override() {
        for (idx, line) in GLOBAL_PATTERNS.iter().enumerate() {
            if let Some(target) = line.strip_prefix('!') {
                let broader = GLOBAL_PATTERNS[..idx]
                    .iter()
                    .any(|earlier| !earlier.starts_with('!') && earlier.ends_with('*'));
                assert!(broader, "negation {} has no earlier wildcard rule", line);
                assert!(!target.is_empty());
            }
        }
    }

    #[test]
    fn patterns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for line in GLOBAL_PATTERNS {
            assert!(seen.insert(*line), "duplicate global pattern {}", line);
        }
    }
}
