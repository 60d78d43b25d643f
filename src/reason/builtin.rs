//! Built-in reason table for StackSet instance status reasons.
//!
//! Patterns follow the templated text CloudFormation emits. Capture groups
//! mark the variable parts (account IDs, roles, resource names) and are not
//! extracted.

use std::sync::LazyLock;

use crate::error::ClassifierError;
use crate::reason::table::ReasonMap;

/// Label reported for a missing status reason.
pub const NULL_LABEL: &str = "Null";

/// Every built-in category with its patterns, in precedence order.
const BUILTIN_REASONS: &[(&str, &[&str])] = &[
    (NULL_LABEL, &[r"^null$"]),
    ("No updates", &[r"No updates are to be performed\."]),
    (
        "Initiated",
        &[r"^User initiated operation$", r"^User Initiated$"],
    ),
    ("Cancelled by failures", &[r"Cancelled since failure tolerance has exceeded"]),
    (
        "Trust missing",
        &[r"Account (.*?) should have '(.*?)' role with trust relationship to Role '(.*?)'\."],
    ),
    ("Account suspended", &[r"ACCOUNT_SUSPENDED"]),
    ("Default role creation error", &[r"^DEFAULT_ROLE_CREATION_ERROR$"]),
    ("Failed to get stack status", &[r"^Failed to get stack status$"]),
    (
        "STS not activated",
        &[r"STS is not activated in this region for account:(.*?). Your account administrator can activate STS in this region using the IAM Console\..*"],
    ),
    (
        "Denied instance operation",
        &[r"User: arn:aws:sts::(.*?):assumed-role/(stacksets-exec-.*?)/(.*?) is not authorized to perform: (.*?) on resource: arn:aws:cloudformation:(.*?):(.*?):stack/(StackSet-.*?)/\* with an explicit deny"],
    ),
    (
        "SCP denied instance operation",
        &[r"^User: arn:aws:sts::(.*?):assumed-role/(stacksets-exec-.*?)/(.*?) is not authorized to perform: (.*?) on resource: arn:aws:cloudformation:(.*?):(.*?):stack/StackSet-(.*?) with an explicit deny in a service control policy$"],
    ),
    (
        "SCP denial to resource",
        &[r"ResourceLogicalId:(.*?), ResourceType:(.*?), ResourceStatusReason:User: (.*?) is not authorized to perform: (.*?) with an explicit deny in a service control policy \(Service: (.*?); Status Code: (.*?); Error Code: (.*?); Request ID: (.*?); Proxy: (.*?)\)\..*"],
    ),
    (
        "Delivery channel limit",
        &[r"ResourceLogicalId:(.*?), ResourceType:(.*?), ResourceStatusReason:Failed to put delivery channel '(.*?)' because the maximum number of delivery channels: (.*?) is reached\. \(Service: (.*?); Status Code: (.*?); Error Code: (.*?); Request ID: (.*?); Proxy: (.*?)\)\."],
    ),
    (
        "Unupdatable",
        &[r"Stack:(.*?) is in (.*?) state and can not be updated\."],
    ),
    (
        "Resource already exists",
        &[r"ResourceLogicalId:(.*), ResourceType:(.*), ResourceStatusReason:(.*) already exists\."],
    ),
    (
        "Resource already exists in stack",
        &[r"ResourceLogicalId:(.*), ResourceType:(.*), ResourceStatusReason:(.*) already exists in stack (.*)\."],
    ),
    (
        "SSM parameter on advanced tier",
        &[r"ResourceLogicalId:(.*?), ResourceType:AWS::SSM::Parameter, ResourceStatusReason:This parameter uses the advanced-parameter tier. You can't downgrade a parameter from the advanced-parameter tier to the standard-parameter tier. If necessary, you can delete the advanced parameter and recreate it as a standard parameter. Be aware that standard parameters have a value limit of 4096 characters. \(Service: AmazonSSM; Status Code: 400; Error Code: ValidationException; Request ID: (.*?); Proxy: (.*?)\)\."],
    ),
    (
        "Invalid principal in key policy",
        &[r#"ResourceLogicalId:(.*?), ResourceType:AWS::KMS::Key, ResourceStatusReason:Resource handler returned message: "Policy contains a statement with one or more invalid principals. \(Service: Kms, Status Code: 400, Request ID: (.*?)\)" \(RequestToken: (.*?), HandlerErrorCode: InvalidRequest\)."#],
    ),
    (
        "SLR exists with different description",
        &[r"ResourceLogicalId:(.*?), ResourceType:AWS::IAM::ServiceLinkedRole, ResourceStatusReason:SLR \[(.*?)\] already exists but has a different description: \[(.*?)\]\. Please verify your SLR use case\. If you are sure the use case is correct please modify your CloudFormation template and keep SLR description consistent\.\."],
    ),
];

/// Builds a fresh copy of the built-in table.
pub fn build_reason_map() -> Result<ReasonMap, ClassifierError> {
    BUILTIN_REASONS
        .iter()
        .fold(ReasonMap::builder(), |builder, (label, patterns)| {
            builder.any_of(*label, patterns.iter().copied())
        })
        .build()
}

#[allow(clippy::expect_used)] // Compile-time constant regex patterns
static REASON_MAP: LazyLock<ReasonMap> =
    LazyLock::new(|| build_reason_map().expect("built-in reason patterns compile"));

/// Returns the process-wide built-in table.
pub fn reason_map() -> &'static ReasonMap {
    &REASON_MAP
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCP_INSTANCE: &str = "User: arn:aws:sts::111122223333:assumed-role/stacksets-exec-abc123/sess is not authorized to perform: cloudformation:CreateStack on resource: arn:aws:cloudformation:us-east-1:111122223333:stack/StackSet-guardrails-0a1b with an explicit deny in a service control policy";

    fn label(text: &str) -> Option<&'static str> {
        reason_map().summarize(text)
    }

    #[test]
    fn builds_without_error() -> anyhow::Result<()> {
        let map = build_reason_map()?;
        assert_eq!(map.len(), 19);
        Ok(())
    }

    #[test]
    fn authored_order() {
        let labels: Vec<_> = reason_map().labels().collect();
        assert_eq!(
            &labels[..5],
            &[
                "Null",
                "No updates",
                "Initiated",
                "Cancelled by failures",
                "Trust missing"
            ]
        );
        assert_eq!(labels.last(), Some(&"SLR exists with different description"));
    }

    #[test]
    fn initiated_has_two_patterns() {
        let entry = reason_map().get("Initiated").map(|e| e.patterns().len());
        assert_eq!(entry, Some(2));
    }

    // ── category samples ─────────────────────────────────────────────

    #[test]
    fn null_literal() {
        assert_eq!(label("null"), Some("Null"));
        assert_eq!(label("nullable"), None);
    }

    #[test]
    fn trust_missing() {
        assert_eq!(
            label("Account 111122223333 should have 'AWSCloudFormationStackSetExecutionRole' role with trust relationship to Role 'AWSCloudFormationStackSetAdministrationRole'."),
            Some("Trust missing")
        );
    }

    #[test]
    fn account_suspended_anywhere() {
        assert_eq!(label("Operation failed: ACCOUNT_SUSPENDED"), Some("Account suspended"));
    }

    #[test]
    fn anchored_markers() {
        assert_eq!(
            label("DEFAULT_ROLE_CREATION_ERROR"),
            Some("Default role creation error")
        );
        assert_eq!(label("DEFAULT_ROLE_CREATION_ERROR again"), None);
        assert_eq!(
            label("Failed to get stack status"),
            Some("Failed to get stack status")
        );
    }

    #[test]
    fn sts_not_activated() {
        assert_eq!(
            label("STS is not activated in this region for account:111122223333. Your account administrator can activate STS in this region using the IAM Console."),
            Some("STS not activated")
        );
    }

    #[test]
    fn denied_instance_operation_with_wildcard() {
        let text = "User: arn:aws:sts::111122223333:assumed-role/stacksets-exec-abc123/sess is not authorized to perform: cloudformation:DescribeStacks on resource: arn:aws:cloudformation:us-east-1:111122223333:stack/StackSet-guardrails-0a1b/* with an explicit deny";
        assert_eq!(label(text), Some("Denied instance operation"));
    }

    #[test]
    fn scp_denied_instance_operation() {
        assert_eq!(label(SCP_INSTANCE), Some("SCP denied instance operation"));
    }

    #[test]
    fn scp_denied_instance_operation_is_anchored() {
        let prefixed = format!("Error: {SCP_INSTANCE}");
        assert_eq!(label(&prefixed), None);
    }

    #[test]
    fn scp_denial_to_resource() {
        let text = "ResourceLogicalId:Bucket, ResourceType:AWS::S3::Bucket, ResourceStatusReason:User: arn:aws:sts::111122223333:assumed-role/exec/sess is not authorized to perform: s3:CreateBucket with an explicit deny in a service control policy (Service: Amazon S3; Status Code: 403; Error Code: AccessDenied; Request ID: ABC; Proxy: null).";
        assert_eq!(label(text), Some("SCP denial to resource"));
    }

    #[test]
    fn delivery_channel_limit() {
        let text = "ResourceLogicalId:Channel, ResourceType:AWS::Config::DeliveryChannel, ResourceStatusReason:Failed to put delivery channel 'default' because the maximum number of delivery channels: 1 is reached. (Service: AmazonConfig; Status Code: 400; Error Code: MaxNumberOfDeliveryChannelsExceededException; Request ID: XYZ; Proxy: null).";
        assert_eq!(label(text), Some("Delivery channel limit"));
    }

    #[test]
    fn unupdatable() {
        assert_eq!(
            label("Stack:arn:aws:cloudformation:us-east-1:111122223333:stack/StackSet-x/1 is in ROLLBACK_COMPLETE state and can not be updated."),
            Some("Unupdatable")
        );
    }

    #[test]
    fn resource_already_exists() {
        let text = "ResourceLogicalId:Topic, ResourceType:AWS::SNS::Topic, ResourceStatusReason:alerts already exists.";
        assert_eq!(label(text), Some("Resource already exists"));
    }

    #[test]
    fn resource_already_exists_in_stack() {
        let text = "ResourceLogicalId:Role, ResourceType:AWS::IAM::Role, ResourceStatusReason:audit-role already exists in stack arn:aws:cloudformation:us-east-1:111122223333:stack/other/1.";
        assert_eq!(label(text), Some("Resource already exists in stack"));
    }

    #[test]
    fn ssm_parameter_on_advanced_tier() {
        let text = "ResourceLogicalId:Param, ResourceType:AWS::SSM::Parameter, ResourceStatusReason:This parameter uses the advanced-parameter tier. You can't downgrade a parameter from the advanced-parameter tier to the standard-parameter tier. If necessary, you can delete the advanced parameter and recreate it as a standard parameter. Be aware that standard parameters have a value limit of 4096 characters. (Service: AmazonSSM; Status Code: 400; Error Code: ValidationException; Request ID: 1234; Proxy: null).";
        assert_eq!(label(text), Some("SSM parameter on advanced tier"));
    }

    #[test]
    fn invalid_principal_in_key_policy() {
        let text = r#"ResourceLogicalId:Key, ResourceType:AWS::KMS::Key, ResourceStatusReason:Resource handler returned message: "Policy contains a statement with one or more invalid principals. (Service: Kms, Status Code: 400, Request ID: abcd)" (RequestToken: efgh, HandlerErrorCode: InvalidRequest)."#;
        assert_eq!(label(text), Some("Invalid principal in key policy"));
    }

    #[test]
    fn slr_with_different_description() {
        let text = "ResourceLogicalId:Slr, ResourceType:AWS::IAM::ServiceLinkedRole, ResourceStatusReason:SLR [AWSServiceRoleForConfig] already exists but has a different description: [old]. Please verify your SLR use case. If you are sure the use case is correct please modify your CloudFormation template and keep SLR description consistent..";
        assert_eq!(label(text), Some("SLR exists with different description"));
    }
}
