//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "domain-lint.toml";

const DEFAULT_CONFIG: &str = r#"# domain-lint configuration

[analyzer]
# Project root; domain prefixes and tsconfig.json are resolved against it
# root = "."

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/coverage/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.no-cross-imports]
enabled = true
# severity = "warning"  # Override default severity

# Merge compilerOptions.paths from tsconfig.json into the domain table
use_tsconfig = true

# Also check files that belong to no domain
report_outside = true

# Domains every other domain may import
shared = []

# Domain key -> path prefix (or list of prefixes), first match wins
[rules.no-cross-imports.domains]
# "@core" = "./src/core"
# "@ui" = ["./src/ui", "./src/components"]

# Own domain -> domains it may import anyway
[rules.no-cross-imports.allowed_crossings]
# "@ui" = ["@core"]
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    run_in(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Declare your domains under [rules.no-cross-imports.domains]");
    println!("  2. Run: domain-lint check");

    Ok(())
}

fn run_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(())
}
