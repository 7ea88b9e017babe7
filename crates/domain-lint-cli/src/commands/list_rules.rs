//! List rules command implementation.

use domain_lint_rules::available_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} {:<10} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in available_rules() {
        println!(
            "{:<10} {:<25} {:<10} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  domain-lint check --rules no-cross-imports");
    println!("  domain-lint check --rules DL001");
}
