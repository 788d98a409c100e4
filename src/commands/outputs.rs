// ABOUTME: Outputs command implementation.
// ABOUTME: Prints the stack's DetailsEndpoint and WebsiteURL as JSON without deploying.

use stackdrop::aws::load_sdk_config;
use stackdrop::config::Config;
use stackdrop::error::{Error, Result};
use stackdrop::stack::{CloudFormationStacks, StackOutputs, StackQuery};

pub async fn outputs(config: Config) -> Result<()> {
    let sdk_config = load_sdk_config(&config.region).await;
    let stacks = CloudFormationStacks::from_conf(&sdk_config);

    let record = stacks
        .describe_stack(&config.stack_name)
        .await?
        .ok_or_else(|| Error::StackNotFound(config.stack_name.to_string()))?;

    let outputs = StackOutputs::from_outputs(&record.outputs);
    for key in outputs.missing_keys() {
        tracing::warn!("stack {} has no output named {}", record.name, key);
    }

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}
