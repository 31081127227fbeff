//! Validate command - surface data quality issues without generating reports

use crate::cmd::PortfolioArgs;
use crate::core::Warning;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    portfolio: PortfolioArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    #[serde(rename = "type")]
    issue_type: String,
    message: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    currency: String,
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (portfolio, warnings) = self.portfolio.read_with_warnings()?;

        let issues: Vec<ValidationIssue> = warnings
            .iter()
            .map(|warning| ValidationIssue {
                issue_type: warning.kind().to_string(),
                message: warning.to_string(),
            })
            .collect();

        if self.json {
            self.print_json(&portfolio.currency, &issues)?;
        } else {
            self.print_text(&portfolio.currency, &issues);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, currency: &str, issues: &[ValidationIssue]) {
        println!();
        println!("VALIDATION RESULTS ({})", currency);
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", issues.len());
            println!();

            for (i, issue) in issues.iter().enumerate() {
                println!("  {}. [{}] {}", i + 1, issue.issue_type, issue.message);
            }
            println!();
        }
    }

    fn print_json(&self, currency: &str, issues: &[ValidationIssue]) -> anyhow::Result<()> {
        let output = ValidationOutput {
            currency: currency.to_string(),
            issue_count: issues.len(),
            issues: issues.to_vec(),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn issues_carry_kind_and_message() {
        let warning = Warning::PropertyValueDrift {
            id: "a-house".to_string(),
            stored: dec!(500000),
            derived: dec!(175000),
        };
        let issue = ValidationIssue {
            issue_type: warning.kind().to_string(),
            message: warning.to_string(),
        };
        assert_eq!(issue.issue_type, "PropertyValueDrift");
        assert!(issue.message.contains("a-house"));
        assert!(issue.message.contains("175000"));

        let future = Warning::FutureAcquisition {
            id: "a-next".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        };
        assert_eq!(future.kind(), "FutureAcquisition");
    }
}
