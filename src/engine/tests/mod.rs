use std::sync::Arc;

use super::*;
use crate::types::{PseudoParam, Resource};
use serde_json::{Value, json};
use strum::IntoEnumIterator;
use yare::parameterized;

const LAMBDA_TEMPLATE: &str = r#"
{
  "Resources": {
    "OrdersFunction": {
      "Type": "AWS::Lambda::Function",
      "Properties": { "Runtime": "python3.12", "Handler": "app.handler" }
    }
  }
}
"#;

const STACK_TEMPLATE: &str = r#"
{
  "AWSTemplateFormatVersion": "2010-09-09",
  "Parameters": {
    "Env": { "Type": "String", "AllowedValues": ["dev", "prod"] },
    "Subnets": { "Type": "List<AWS::EC2::Subnet::Id>" }
  },
  "Mappings": {
    "Sizes": { "dev": { "Memory": 128 }, "prod": { "Memory": 1024 } }
  },
  "Conditions": {
    "IsProd": { "Fn::Equals": [{ "Ref": "Env" }, "prod"] }
  },
  "Resources": {
    "Assets": {
      "Type": "AWS::S3::Bucket",
      "Properties": { "BucketName": { "Fn::Sub": "${AWS::StackName}-assets" } }
    },
    "Jobs": {
      "Type": "AWS::SQS::Queue",
      "Properties": {
        "DelaySeconds": { "Fn::If": ["IsProd", 0, { "Ref": "AWS::NoValue" }] }
      }
    },
    "Worker": {
      "Type": "AWS::Lambda::Function",
      "Properties": {
        "MemorySize": { "Fn::FindInMap": ["Sizes", { "Ref": "Env" }, "Memory"] },
        "Environment": {
          "Variables": {
            "BUCKET": { "Ref": "Assets" },
            "BUCKET_ARN": { "Fn::GetAtt": ["Assets", "Arn"] },
            "QUEUE_URL": { "Ref": "Jobs" },
            "SUBNETS": { "Fn::Join": [",", { "Ref": "Subnets" }] }
          }
        },
        "VpcConfig": {
          "SubnetIds": { "Ref": "Subnets" }
        }
      }
    },
    "Mapping": {
      "Type": "AWS::Lambda::EventSourceMapping",
      "Properties": {
        "EventSourceArn": { "Fn::GetAtt": ["Jobs", "Arn"] },
        "FunctionName": { "Ref": "Worker" }
      }
    },
    "Widget": {
      "Type": "Custom::Widget",
      "Properties": { "ServiceToken": { "Fn::GetAtt": ["Worker", "Arn"] } }
    }
  },
  "Outputs": {
    "WorkerArn": { "Value": { "Fn::GetAtt": ["Worker", "Arn"] } },
    "BucketRef": { "Value": { "Ref": "Assets" } }
  }
}
"#;

fn engine() -> TemplateEngine {
    TemplateEngine::new(
        ResolverConfig::default()
            .with_account_id("123456789012")
            .with_stack_name("teststack"),
    )
}

fn seeded_engine(seed: u64) -> TemplateEngine {
    TemplateEngine::new(ResolverConfig::default().with_seed(seed))
}

fn resolve_text(text: &str, params: &[UserParam]) -> ResolvedTemplate {
    let engine = engine();
    let outcome = engine.parse(text);
    assert!(!outcome.has_errors(), "{:?}", outcome.error());
    engine.resolve(&outcome, params).unwrap()
}

/// Resolve a single expression placed in the `Outputs` of an otherwise empty template.
fn resolve_expression(expr: Value, params: &[UserParam]) -> Result<Value, ResolveError> {
    let text = json!({
        "Parameters": { "Env": { "Type": "String" } },
        "Resources": {},
        "Outputs": { "Out": { "Value": expr } }
    })
    .to_string();
    let engine = engine();
    let outcome = engine.parse(&text);
    let resolved = engine.resolve(&outcome, params)?;
    Ok(resolved.template().outputs["Out"]["Value"].clone())
}

fn property<'a>(resource: &'a Resource, path: &[&str]) -> &'a Value {
    path.iter().fold(resource.properties.as_ref().unwrap(), |value, key| &value[*key])
}

include!("core.rs");
include!("resolve.rs");
