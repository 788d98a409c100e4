// ABOUTME: StackQuery implementation backed by aws-sdk-cloudformation.
// ABOUTME: Treats CloudFormation's "does not exist" validation error as an absent stack.

use async_trait::async_trait;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};

use super::{StackOutput, StackQuery, StackQueryError, StackRecord};
use crate::types::StackName;

#[derive(Debug, Clone)]
pub struct CloudFormationStacks {
    client: aws_sdk_cloudformation::Client,
}

impl CloudFormationStacks {
    pub fn new(client: aws_sdk_cloudformation::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_cloudformation::Client::new(config))
    }
}

#[async_trait]
impl StackQuery for CloudFormationStacks {
    async fn describe_stack(
        &self,
        name: &StackName,
    ) -> Result<Option<StackRecord>, StackQueryError> {
        let response = match self
            .client
            .describe_stacks()
            .stack_name(name.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let missing = err.as_service_error().is_some_and(|e| {
                    e.code() == Some("ValidationError")
                        && e.message().is_some_and(|m| m.contains("does not exist"))
                });
                if missing {
                    return Ok(None);
                }
                return Err(StackQueryError::Request {
                    stack: name.to_string(),
                    message: DisplayErrorContext(&err).to_string(),
                });
            }
        };

        let Some(stack) = response.stacks().first() else {
            return Ok(None);
        };

        let outputs = stack
            .outputs()
            .iter()
            .filter_map(|o| match (o.output_key(), o.output_value()) {
                (Some(key), Some(value)) => Some(StackOutput::new(key, value)),
                _ => None,
            })
            .collect();

        Ok(Some(StackRecord {
            name: stack.stack_name().unwrap_or(name.as_str()).to_string(),
            status: stack.stack_status().map(|s| s.as_str().to_string()),
            outputs,
        }))
    }
}
