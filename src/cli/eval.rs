//! Expression CLI command

use std::path::Path;

use crate::error::AuditLensResult;
use crate::expression::evaluate_expression;
use crate::json::JsonRecord;

/// Evaluate a predicate expression against a record file and print the result
pub fn handle_eval_command(expression: &str, record: &Path) -> AuditLensResult<()> {
    let record = JsonRecord::load(record)?;
    println!("{}", evaluate_expression(&record, expression));
    Ok(())
}
