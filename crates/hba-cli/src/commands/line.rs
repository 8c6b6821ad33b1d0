//! Single rule declaration

use hba_core::{FieldValue, RuleInput, declare_rule};

use crate::error::Result;

/// Raw `line` command arguments
#[derive(Debug, Clone)]
pub struct LineArgs {
    pub connection_type: String,
    pub database: Vec<String>,
    pub user: Vec<String>,
    pub address: Option<String>,
    pub auth_method: String,
    pub order: String,
}

impl LineArgs {
    fn to_input(&self) -> RuleInput {
        RuleInput {
            description: None,
            connection_type: self.connection_type.clone(),
            database: field(&self.database),
            user: field(&self.user),
            address: self.address.clone(),
            auth_method: self.auth_method.clone(),
            order: self.order.as_str().into(),
        }
    }
}

fn field(values: &[String]) -> FieldValue {
    match values {
        [single] => FieldValue::Scalar(single.clone()),
        many => FieldValue::List(many.to_vec()),
    }
}

/// Run the line command
pub fn run_line(args: LineArgs, json: bool) -> Result<()> {
    let declared = declare_rule(&args.to_input())?;
    tracing::debug!(order = %declared.order, "declared rule");

    if json {
        println!("{}", serde_json::to_string_pretty(&declared)?);
    } else {
        println!("{}", declared.line);
    }
    Ok(())
}
