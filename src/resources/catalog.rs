//! Resource types with a known identifier and ARN grammar.
//!
//! Patterns use `{placeholder}` segments expanded per resource:
//! `{partition}`, `{region}`, `{account}`, `{urlsuffix}`, `{stack}`, `{logical}`,
//! `{id}` and `{arn}` come from the run; `{suffix}` (12 lowercase alphanumerics),
//! `{SUFFIX}` (17 uppercase alphanumerics) and `{hex}` (17 hex digits) are random.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::random::Charset;

/// How an identifier is generated when no name property supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStyle {
    /// `{stack}-{logical}-{SUFFIX}`, shortened to `max_len`.
    Stack { max_len: usize, lowercase: bool },
    /// A fixed prefix followed by `len` random characters.
    Prefixed {
        prefix: &'static str,
        len: usize,
        charset: Charset,
    },
    Uuid,
    /// `{region}_{len alphanumerics}`
    Regional { len: usize },
    /// `{region}:{uuid}`
    RegionalUuid,
}

/// What `Ref` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStyle {
    Id,
    Arn,
    Pattern(&'static str),
}

/// What one `Fn::GetAtt` attribute returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Id,
    Arn,
    Fixed(&'static str),
    Pattern(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    pub name_property: Option<&'static str>,
    pub id_style: IdStyle,
    pub arn: &'static str,
    pub reference: RefStyle,
    pub attributes: &'static [(&'static str, Attr)],
}

impl KindSpec {
    const fn new(id_style: IdStyle, arn: &'static str) -> Self {
        Self {
            name_property: None,
            id_style,
            arn,
            reference: RefStyle::Id,
            attributes: &[],
        }
    }

    const fn named(self, property: &'static str) -> Self {
        Self {
            name_property: Some(property),
            ..self
        }
    }

    const fn refs(self, reference: RefStyle) -> Self {
        Self { reference, ..self }
    }

    const fn attrs(self, attributes: &'static [(&'static str, Attr)]) -> Self {
        Self { attributes, ..self }
    }

    pub fn attribute(&self, name: &str) -> Option<Attr> {
        self.attributes
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, attr)| *attr)
    }
}

const fn stack(max_len: usize) -> IdStyle {
    IdStyle::Stack {
        max_len,
        lowercase: false,
    }
}

const fn stack_lower(max_len: usize) -> IdStyle {
    IdStyle::Stack {
        max_len,
        lowercase: true,
    }
}

const fn prefixed(prefix: &'static str, len: usize, charset: Charset) -> IdStyle {
    IdStyle::Prefixed {
        prefix,
        len,
        charset,
    }
}

const fn hex_id(prefix: &'static str) -> IdStyle {
    prefixed(prefix, 17, Charset::Hex)
}

const fn short_id(len: usize) -> IdStyle {
    prefixed("", len, Charset::LowerAlnum)
}

const LAMBDA_ARN: &str = "arn:{partition}:lambda:{region}:{account}:function:{id}";
const API_GATEWAY_ARN: &str = "arn:{partition}:apigateway:{region}::/restapis/{id}";
const HTTP_API_ARN: &str = "arn:{partition}:apigateway:{region}::/apis/{id}";
const EXECUTE_API_URL: &str = "https://{id}.execute-api.{region}.{urlsuffix}";
const REGIONAL_DOMAIN: &str = "d-{suffix}.execute-api.{region}.{urlsuffix}";
const QUEUE_URL: &str = "https://sqs.{region}.{urlsuffix}/{account}/{id}";
const STATE_MACHINE_ARN: &str = "arn:{partition}:states:{region}:{account}:stateMachine:{id}";
const TABLE_ARN: &str = "arn:{partition}:dynamodb:{region}:{account}:table/{id}";
const LAYER_ARN: &str = "arn:{partition}:lambda:{region}:{account}:layer:{id}:1";

const ARN_ONLY: &[(&str, Attr)] = &[("Arn", Attr::Arn)];

const FUNCTION_ATTRS: &[(&str, Attr)] = &[
    ("Arn", Attr::Arn),
    ("SnapStartResponse.ApplyOn", Attr::Fixed("None")),
];
const REST_API_ATTRS: &[(&str, Attr)] = &[
    ("RestApiId", Attr::Id),
    ("RootResourceId", Attr::Pattern("{suffix}")),
];
const HTTP_API_ATTRS: &[(&str, Attr)] = &[
    ("ApiId", Attr::Id),
    ("ApiEndpoint", Attr::Pattern(EXECUTE_API_URL)),
];
const TABLE_ATTRS: &[(&str, Attr)] = &[
    ("Arn", Attr::Arn),
    ("StreamArn", Attr::Pattern("{arn}/stream/2024-01-01T00:00:00.000")),
];
const STATE_MACHINE_ATTRS: &[(&str, Attr)] = &[("Arn", Attr::Arn), ("Name", Attr::Id)];

/// Every resource type with a dedicated synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, Display)]
pub enum ResourceKind {
    #[strum(serialize = "AWS::Lambda::Function")]
    LambdaFunction,
    #[strum(serialize = "AWS::Lambda::Permission")]
    LambdaPermission,
    #[strum(serialize = "AWS::Lambda::Version")]
    LambdaVersion,
    #[strum(serialize = "AWS::Lambda::Alias")]
    LambdaAlias,
    #[strum(serialize = "AWS::Lambda::LayerVersion")]
    LambdaLayerVersion,
    #[strum(serialize = "AWS::Lambda::EventSourceMapping")]
    LambdaEventSourceMapping,
    #[strum(serialize = "AWS::Lambda::Url")]
    LambdaUrl,

    #[strum(serialize = "AWS::ApiGateway::RestApi")]
    ApiGatewayRestApi,
    #[strum(serialize = "AWS::ApiGateway::Resource")]
    ApiGatewayResource,
    #[strum(serialize = "AWS::ApiGateway::Method")]
    ApiGatewayMethod,
    #[strum(serialize = "AWS::ApiGateway::Deployment")]
    ApiGatewayDeployment,
    #[strum(serialize = "AWS::ApiGateway::Stage")]
    ApiGatewayStage,
    #[strum(serialize = "AWS::ApiGateway::ApiKey")]
    ApiGatewayApiKey,
    #[strum(serialize = "AWS::ApiGateway::UsagePlan")]
    ApiGatewayUsagePlan,
    #[strum(serialize = "AWS::ApiGateway::Authorizer")]
    ApiGatewayAuthorizer,
    #[strum(serialize = "AWS::ApiGateway::DomainName")]
    ApiGatewayDomainName,
    #[strum(serialize = "AWS::ApiGateway::BasePathMapping")]
    ApiGatewayBasePathMapping,
    #[strum(serialize = "AWS::ApiGateway::Model")]
    ApiGatewayModel,
    #[strum(serialize = "AWS::ApiGateway::RequestValidator")]
    ApiGatewayRequestValidator,

    #[strum(serialize = "AWS::ApiGatewayV2::Api")]
    ApiGatewayV2Api,
    #[strum(serialize = "AWS::ApiGatewayV2::Stage")]
    ApiGatewayV2Stage,
    #[strum(serialize = "AWS::ApiGatewayV2::Route")]
    ApiGatewayV2Route,
    #[strum(serialize = "AWS::ApiGatewayV2::Integration")]
    ApiGatewayV2Integration,
    #[strum(serialize = "AWS::ApiGatewayV2::Authorizer")]
    ApiGatewayV2Authorizer,
    #[strum(serialize = "AWS::ApiGatewayV2::DomainName")]
    ApiGatewayV2DomainName,

    #[strum(serialize = "AWS::Serverless::Function")]
    ServerlessFunction,
    #[strum(serialize = "AWS::Serverless::Api")]
    ServerlessApi,
    #[strum(serialize = "AWS::Serverless::HttpApi")]
    ServerlessHttpApi,
    #[strum(serialize = "AWS::Serverless::SimpleTable")]
    ServerlessSimpleTable,
    #[strum(serialize = "AWS::Serverless::StateMachine")]
    ServerlessStateMachine,
    #[strum(serialize = "AWS::Serverless::LayerVersion")]
    ServerlessLayerVersion,

    #[strum(serialize = "AWS::S3::Bucket")]
    S3Bucket,
    #[strum(serialize = "AWS::S3::BucketPolicy")]
    S3BucketPolicy,

    #[strum(serialize = "AWS::DynamoDB::Table")]
    DynamoDbTable,
    #[strum(serialize = "AWS::DynamoDB::GlobalTable")]
    DynamoDbGlobalTable,

    #[strum(serialize = "AWS::SNS::Topic")]
    SnsTopic,
    #[strum(serialize = "AWS::SNS::Subscription")]
    SnsSubscription,
    #[strum(serialize = "AWS::SNS::TopicPolicy")]
    SnsTopicPolicy,
    #[strum(serialize = "AWS::SQS::Queue")]
    SqsQueue,
    #[strum(serialize = "AWS::SQS::QueuePolicy")]
    SqsQueuePolicy,

    #[strum(serialize = "AWS::IAM::Role")]
    IamRole,
    #[strum(serialize = "AWS::IAM::Policy")]
    IamPolicy,
    #[strum(serialize = "AWS::IAM::ManagedPolicy")]
    IamManagedPolicy,
    #[strum(serialize = "AWS::IAM::User")]
    IamUser,
    #[strum(serialize = "AWS::IAM::Group")]
    IamGroup,
    #[strum(serialize = "AWS::IAM::InstanceProfile")]
    IamInstanceProfile,

    #[strum(serialize = "AWS::EC2::VPC")]
    Ec2Vpc,
    #[strum(serialize = "AWS::EC2::Subnet")]
    Ec2Subnet,
    #[strum(serialize = "AWS::EC2::SecurityGroup")]
    Ec2SecurityGroup,
    #[strum(serialize = "AWS::EC2::InternetGateway")]
    Ec2InternetGateway,
    #[strum(serialize = "AWS::EC2::NatGateway")]
    Ec2NatGateway,
    #[strum(serialize = "AWS::EC2::RouteTable")]
    Ec2RouteTable,
    #[strum(serialize = "AWS::EC2::EIP")]
    Ec2Eip,
    #[strum(serialize = "AWS::EC2::Instance")]
    Ec2Instance,
    #[strum(serialize = "AWS::EC2::LaunchTemplate")]
    Ec2LaunchTemplate,
    #[strum(serialize = "AWS::EC2::VPCEndpoint")]
    Ec2VpcEndpoint,

    #[strum(serialize = "AWS::Logs::LogGroup")]
    LogsLogGroup,
    #[strum(serialize = "AWS::Logs::SubscriptionFilter")]
    LogsSubscriptionFilter,
    #[strum(serialize = "AWS::Events::Rule")]
    EventsRule,
    #[strum(serialize = "AWS::Events::EventBus")]
    EventsEventBus,
    #[strum(serialize = "AWS::CloudWatch::Alarm")]
    CloudWatchAlarm,
    #[strum(serialize = "AWS::Scheduler::Schedule")]
    SchedulerSchedule,

    #[strum(serialize = "AWS::StepFunctions::StateMachine")]
    StepFunctionsStateMachine,
    #[strum(serialize = "AWS::StepFunctions::Activity")]
    StepFunctionsActivity,
    #[strum(serialize = "AWS::Kinesis::Stream")]
    KinesisStream,
    #[strum(serialize = "AWS::KinesisFirehose::DeliveryStream")]
    FirehoseDeliveryStream,

    #[strum(serialize = "AWS::KMS::Key")]
    KmsKey,
    #[strum(serialize = "AWS::KMS::Alias")]
    KmsAlias,
    #[strum(serialize = "AWS::SecretsManager::Secret")]
    SecretsManagerSecret,
    #[strum(serialize = "AWS::SSM::Parameter")]
    SsmParameter,

    #[strum(serialize = "AWS::ECS::Cluster")]
    EcsCluster,
    #[strum(serialize = "AWS::ECS::Service")]
    EcsService,
    #[strum(serialize = "AWS::ECS::TaskDefinition")]
    EcsTaskDefinition,
    #[strum(serialize = "AWS::ECR::Repository")]
    EcrRepository,

    #[strum(serialize = "AWS::ElasticLoadBalancingV2::LoadBalancer")]
    ElbLoadBalancer,
    #[strum(serialize = "AWS::ElasticLoadBalancingV2::TargetGroup")]
    ElbTargetGroup,
    #[strum(serialize = "AWS::ElasticLoadBalancingV2::Listener")]
    ElbListener,

    #[strum(serialize = "AWS::RDS::DBInstance")]
    RdsDbInstance,
    #[strum(serialize = "AWS::RDS::DBCluster")]
    RdsDbCluster,

    #[strum(serialize = "AWS::Cognito::UserPool")]
    CognitoUserPool,
    #[strum(serialize = "AWS::Cognito::UserPoolClient")]
    CognitoUserPoolClient,
    #[strum(serialize = "AWS::Cognito::IdentityPool")]
    CognitoIdentityPool,

    #[strum(serialize = "AWS::CloudFront::Distribution")]
    CloudFrontDistribution,
    #[strum(serialize = "AWS::CloudFront::CloudFrontOriginAccessIdentity")]
    CloudFrontOriginAccessIdentity,
    #[strum(serialize = "AWS::Route53::HostedZone")]
    Route53HostedZone,
    #[strum(serialize = "AWS::Route53::RecordSet")]
    Route53RecordSet,
    #[strum(serialize = "AWS::CertificateManager::Certificate")]
    AcmCertificate,

    #[strum(serialize = "AWS::AppSync::GraphQLApi")]
    AppSyncGraphQlApi,
    #[strum(serialize = "AWS::AppSync::DataSource")]
    AppSyncDataSource,
    #[strum(serialize = "AWS::OpenSearchService::Domain")]
    OpenSearchDomain,
    #[strum(serialize = "AWS::CodeBuild::Project")]
    CodeBuildProject,
    #[strum(serialize = "AWS::CodePipeline::Pipeline")]
    CodePipelinePipeline,
    #[strum(serialize = "AWS::WAFv2::WebACL")]
    Wafv2WebAcl,
    #[strum(serialize = "AWS::EFS::FileSystem")]
    EfsFileSystem,
    #[strum(serialize = "AWS::EFS::AccessPoint")]
    EfsAccessPoint,
    #[strum(serialize = "AWS::AutoScaling::AutoScalingGroup")]
    AutoScalingGroup,
}

impl ResourceKind {
    pub fn spec(self) -> KindSpec {
        use Charset::{Alnum, UpperAlnum};
        use ResourceKind::*;

        match self {
            LambdaFunction | ServerlessFunction => KindSpec::new(stack(64), LAMBDA_ARN)
                .named("FunctionName")
                .attrs(FUNCTION_ATTRS),
            LambdaPermission => KindSpec::new(
                stack(64),
                "arn:{partition}:lambda:{region}:{account}:permission:{id}",
            ),
            LambdaVersion => KindSpec::new(
                prefixed("", 1, Charset::Digits),
                "arn:{partition}:lambda:{region}:{account}:function:{stack}-{logical}:{id}",
            )
            .refs(RefStyle::Arn)
            .attrs(&[("Version", Attr::Id), ("FunctionArn", Attr::Arn)]),
            LambdaAlias => KindSpec::new(
                stack(128),
                "arn:{partition}:lambda:{region}:{account}:function:{stack}:{id}",
            )
            .named("Name")
            .refs(RefStyle::Arn)
            .attrs(&[("AliasArn", Attr::Arn)]),
            LambdaLayerVersion | ServerlessLayerVersion => KindSpec::new(stack(140), LAYER_ARN)
                .named("LayerName")
                .refs(RefStyle::Arn)
                .attrs(&[("LayerVersionArn", Attr::Arn)]),
            LambdaEventSourceMapping => KindSpec::new(
                IdStyle::Uuid,
                "arn:{partition}:lambda:{region}:{account}:event-source-mapping:{id}",
            )
            .attrs(&[("Id", Attr::Id), ("EventSourceMappingArn", Attr::Arn)]),
            LambdaUrl => KindSpec::new(short_id(32), LAMBDA_ARN)
                .refs(RefStyle::Arn)
                .attrs(&[
                    ("FunctionArn", Attr::Arn),
                    (
                        "FunctionUrl",
                        Attr::Pattern("https://{id}.lambda-url.{region}.on.aws/"),
                    ),
                ]),

            ApiGatewayRestApi | ServerlessApi => {
                KindSpec::new(short_id(10), API_GATEWAY_ARN).attrs(REST_API_ATTRS)
            }
            ApiGatewayResource => KindSpec::new(
                short_id(6),
                "arn:{partition}:apigateway:{region}::/resources/{id}",
            )
            .attrs(&[("ResourceId", Attr::Id)]),
            ApiGatewayMethod => KindSpec::new(
                stack(128),
                "arn:{partition}:apigateway:{region}::/methods/{id}",
            ),
            ApiGatewayDeployment => KindSpec::new(
                short_id(6),
                "arn:{partition}:apigateway:{region}::/deployments/{id}",
            )
            .attrs(&[("DeploymentId", Attr::Id)]),
            ApiGatewayStage => KindSpec::new(
                stack(128),
                "arn:{partition}:apigateway:{region}::/stages/{id}",
            )
            .named("StageName"),
            ApiGatewayApiKey => KindSpec::new(
                prefixed("", 10, Alnum),
                "arn:{partition}:apigateway:{region}::/apikeys/{id}",
            )
            .attrs(&[("APIKeyId", Attr::Id)]),
            ApiGatewayUsagePlan => KindSpec::new(
                short_id(6),
                "arn:{partition}:apigateway:{region}::/usageplans/{id}",
            )
            .attrs(&[("Id", Attr::Id)]),
            ApiGatewayAuthorizer => KindSpec::new(
                short_id(6),
                "arn:{partition}:apigateway:{region}::/authorizers/{id}",
            )
            .attrs(&[("AuthorizerId", Attr::Id)]),
            ApiGatewayDomainName => KindSpec::new(
                stack_lower(253),
                "arn:{partition}:apigateway:{region}::/domainnames/{id}",
            )
            .named("DomainName")
            .attrs(&[
                ("DistributionDomainName", Attr::Pattern("d{suffix}.cloudfront.net")),
                ("DistributionHostedZoneId", Attr::Fixed("Z2FDTNDATAQYW2")),
                ("RegionalDomainName", Attr::Pattern(REGIONAL_DOMAIN)),
                ("RegionalHostedZoneId", Attr::Fixed("Z1UJRXOUMOOFQ8")),
            ]),
            ApiGatewayBasePathMapping => KindSpec::new(
                stack(128),
                "arn:{partition}:apigateway:{region}::/basepathmappings/{id}",
            ),
            ApiGatewayModel => KindSpec::new(
                stack(128),
                "arn:{partition}:apigateway:{region}::/models/{id}",
            )
            .named("Name"),
            ApiGatewayRequestValidator => KindSpec::new(
                short_id(6),
                "arn:{partition}:apigateway:{region}::/requestvalidators/{id}",
            )
            .attrs(&[("RequestValidatorId", Attr::Id)]),

            ApiGatewayV2Api | ServerlessHttpApi => {
                KindSpec::new(short_id(10), HTTP_API_ARN).attrs(HTTP_API_ATTRS)
            }
            ApiGatewayV2Stage => KindSpec::new(
                stack(128),
                "arn:{partition}:apigateway:{region}::/stages/{id}",
            )
            .named("StageName"),
            ApiGatewayV2Route => KindSpec::new(
                short_id(7),
                "arn:{partition}:apigateway:{region}::/routes/{id}",
            )
            .attrs(&[("RouteId", Attr::Id)]),
            ApiGatewayV2Integration => KindSpec::new(
                short_id(7),
                "arn:{partition}:apigateway:{region}::/integrations/{id}",
            )
            .attrs(&[("IntegrationId", Attr::Id)]),
            ApiGatewayV2Authorizer => KindSpec::new(
                short_id(6),
                "arn:{partition}:apigateway:{region}::/authorizers/{id}",
            )
            .attrs(&[("AuthorizerId", Attr::Id)]),
            ApiGatewayV2DomainName => KindSpec::new(
                stack_lower(253),
                "arn:{partition}:apigateway:{region}::/domainnames/{id}",
            )
            .named("DomainName")
            .attrs(&[
                ("RegionalDomainName", Attr::Pattern(REGIONAL_DOMAIN)),
                ("RegionalHostedZoneId", Attr::Fixed("Z1UJRXOUMOOFQ8")),
            ]),

            ServerlessSimpleTable | DynamoDbTable | DynamoDbGlobalTable => {
                KindSpec::new(stack(255), TABLE_ARN)
                    .named("TableName")
                    .attrs(TABLE_ATTRS)
            }
            ServerlessStateMachine => KindSpec::new(stack(80), STATE_MACHINE_ARN)
                .named("Name")
                .refs(RefStyle::Arn)
                .attrs(STATE_MACHINE_ATTRS),
            StepFunctionsStateMachine => KindSpec::new(stack(80), STATE_MACHINE_ARN)
                .named("StateMachineName")
                .refs(RefStyle::Arn)
                .attrs(STATE_MACHINE_ATTRS),
            StepFunctionsActivity => KindSpec::new(
                stack(80),
                "arn:{partition}:states:{region}:{account}:activity:{id}",
            )
            .named("Name")
            .refs(RefStyle::Arn)
            .attrs(&[("Name", Attr::Id)]),

            S3Bucket => KindSpec::new(stack_lower(63), "arn:{partition}:s3:::{id}")
                .named("BucketName")
                .attrs(&[
                    ("Arn", Attr::Arn),
                    ("DomainName", Attr::Pattern("{id}.s3.{urlsuffix}")),
                    ("RegionalDomainName", Attr::Pattern("{id}.s3.{region}.{urlsuffix}")),
                    (
                        "DualStackDomainName",
                        Attr::Pattern("{id}.s3.dualstack.{region}.{urlsuffix}"),
                    ),
                    (
                        "WebsiteURL",
                        Attr::Pattern("http://{id}.s3-website-{region}.{urlsuffix}"),
                    ),
                ]),
            S3BucketPolicy => KindSpec::new(stack(128), "arn:{partition}:s3:::{id}/policy"),

            SnsTopic => KindSpec::new(stack(256), "arn:{partition}:sns:{region}:{account}:{id}")
                .named("TopicName")
                .refs(RefStyle::Arn)
                .attrs(&[("TopicArn", Attr::Arn), ("TopicName", Attr::Id)]),
            SnsSubscription => KindSpec::new(
                IdStyle::Uuid,
                "arn:{partition}:sns:{region}:{account}:{stack}-{logical}:{id}",
            )
            .refs(RefStyle::Arn)
            .attrs(&[("Arn", Attr::Arn)]),
            SnsTopicPolicy => KindSpec::new(
                stack(128),
                "arn:{partition}:sns:{region}:{account}:{id}/policy",
            ),
            SqsQueue => KindSpec::new(stack(80), "arn:{partition}:sqs:{region}:{account}:{id}")
                .named("QueueName")
                .refs(RefStyle::Pattern(QUEUE_URL))
                .attrs(&[
                    ("Arn", Attr::Arn),
                    ("QueueName", Attr::Id),
                    ("QueueUrl", Attr::Pattern(QUEUE_URL)),
                ]),
            SqsQueuePolicy => KindSpec::new(
                stack(128),
                "arn:{partition}:sqs:{region}:{account}:{id}/policy",
            ),

            IamRole => KindSpec::new(stack(64), "arn:{partition}:iam::{account}:role/{id}")
                .named("RoleName")
                .attrs(&[("Arn", Attr::Arn), ("RoleId", Attr::Pattern("AROA{SUFFIX}"))]),
            IamPolicy => KindSpec::new(stack(128), "arn:{partition}:iam::{account}:policy/{id}")
                .named("PolicyName"),
            IamManagedPolicy => {
                KindSpec::new(stack(128), "arn:{partition}:iam::{account}:policy/{id}")
                    .named("ManagedPolicyName")
                    .refs(RefStyle::Arn)
                    .attrs(&[("PolicyArn", Attr::Arn), ("PolicyId", Attr::Pattern("ANPA{SUFFIX}"))])
            }
            IamUser => KindSpec::new(stack(64), "arn:{partition}:iam::{account}:user/{id}")
                .named("UserName")
                .attrs(ARN_ONLY),
            IamGroup => KindSpec::new(stack(128), "arn:{partition}:iam::{account}:group/{id}")
                .named("GroupName")
                .attrs(ARN_ONLY),
            IamInstanceProfile => KindSpec::new(
                stack(128),
                "arn:{partition}:iam::{account}:instance-profile/{id}",
            )
            .named("InstanceProfileName")
            .attrs(ARN_ONLY),

            Ec2Vpc => KindSpec::new(
                hex_id("vpc-"),
                "arn:{partition}:ec2:{region}:{account}:vpc/{id}",
            )
            .attrs(&[
                ("VpcId", Attr::Id),
                ("CidrBlock", Attr::Fixed("10.0.0.0/16")),
                ("DefaultSecurityGroup", Attr::Pattern("sg-{hex}")),
                ("DefaultNetworkAcl", Attr::Pattern("acl-{hex}")),
            ]),
            Ec2Subnet => KindSpec::new(
                hex_id("subnet-"),
                "arn:{partition}:ec2:{region}:{account}:subnet/{id}",
            )
            .attrs(&[
                ("SubnetId", Attr::Id),
                ("AvailabilityZone", Attr::Pattern("{region}a")),
            ]),
            Ec2SecurityGroup => KindSpec::new(
                hex_id("sg-"),
                "arn:{partition}:ec2:{region}:{account}:security-group/{id}",
            )
            .attrs(&[("GroupId", Attr::Id), ("VpcId", Attr::Pattern("vpc-{hex}"))]),
            Ec2InternetGateway => KindSpec::new(
                hex_id("igw-"),
                "arn:{partition}:ec2:{region}:{account}:internet-gateway/{id}",
            )
            .attrs(&[("InternetGatewayId", Attr::Id)]),
            Ec2NatGateway => KindSpec::new(
                hex_id("nat-"),
                "arn:{partition}:ec2:{region}:{account}:natgateway/{id}",
            )
            .attrs(&[("NatGatewayId", Attr::Id)]),
            Ec2RouteTable => KindSpec::new(
                hex_id("rtb-"),
                "arn:{partition}:ec2:{region}:{account}:route-table/{id}",
            )
            .attrs(&[("RouteTableId", Attr::Id)]),
            Ec2Eip => KindSpec::new(
                hex_id("eipalloc-"),
                "arn:{partition}:ec2:{region}:{account}:elastic-ip/{id}",
            )
            .attrs(&[
                ("AllocationId", Attr::Id),
                ("PublicIp", Attr::Fixed("203.0.113.10")),
            ]),
            Ec2Instance => KindSpec::new(
                hex_id("i-"),
                "arn:{partition}:ec2:{region}:{account}:instance/{id}",
            )
            .attrs(&[
                ("AvailabilityZone", Attr::Pattern("{region}a")),
                ("PrivateIp", Attr::Fixed("10.0.0.10")),
                ("PublicIp", Attr::Fixed("203.0.113.20")),
                (
                    "PrivateDnsName",
                    Attr::Pattern("ip-10-0-0-10.{region}.compute.internal"),
                ),
            ]),
            Ec2LaunchTemplate => KindSpec::new(
                hex_id("lt-"),
                "arn:{partition}:ec2:{region}:{account}:launch-template/{id}",
            )
            .attrs(&[
                ("LaunchTemplateId", Attr::Id),
                ("DefaultVersionNumber", Attr::Fixed("1")),
                ("LatestVersionNumber", Attr::Fixed("1")),
            ]),
            Ec2VpcEndpoint => KindSpec::new(
                hex_id("vpce-"),
                "arn:{partition}:ec2:{region}:{account}:vpc-endpoint/{id}",
            )
            .attrs(&[("Id", Attr::Id)]),

            LogsLogGroup => KindSpec::new(
                stack(512),
                "arn:{partition}:logs:{region}:{account}:log-group:{id}:*",
            )
            .named("LogGroupName")
            .attrs(ARN_ONLY),
            LogsSubscriptionFilter => KindSpec::new(
                stack(512),
                "arn:{partition}:logs:{region}:{account}:subscription-filter:{id}",
            )
            .named("FilterName"),
            EventsRule => KindSpec::new(
                stack(64),
                "arn:{partition}:events:{region}:{account}:rule/{id}",
            )
            .named("Name")
            .attrs(ARN_ONLY),
            EventsEventBus => KindSpec::new(
                stack(256),
                "arn:{partition}:events:{region}:{account}:event-bus/{id}",
            )
            .named("Name")
            .attrs(&[("Arn", Attr::Arn), ("Name", Attr::Id)]),
            CloudWatchAlarm => KindSpec::new(
                stack(255),
                "arn:{partition}:cloudwatch:{region}:{account}:alarm:{id}",
            )
            .named("AlarmName")
            .attrs(ARN_ONLY),
            SchedulerSchedule => KindSpec::new(
                stack(64),
                "arn:{partition}:scheduler:{region}:{account}:schedule/default/{id}",
            )
            .named("Name")
            .attrs(ARN_ONLY),

            KinesisStream => KindSpec::new(
                stack(128),
                "arn:{partition}:kinesis:{region}:{account}:stream/{id}",
            )
            .named("Name")
            .attrs(ARN_ONLY),
            FirehoseDeliveryStream => KindSpec::new(
                stack(64),
                "arn:{partition}:firehose:{region}:{account}:deliverystream/{id}",
            )
            .named("DeliveryStreamName")
            .attrs(ARN_ONLY),

            KmsKey => KindSpec::new(
                IdStyle::Uuid,
                "arn:{partition}:kms:{region}:{account}:key/{id}",
            )
            .attrs(&[("Arn", Attr::Arn), ("KeyId", Attr::Id)]),
            KmsAlias => KindSpec::new(stack(256), "arn:{partition}:kms:{region}:{account}:{id}")
                .named("AliasName"),
            SecretsManagerSecret => KindSpec::new(
                stack(512),
                "arn:{partition}:secretsmanager:{region}:{account}:secret:{id}-{suffix}",
            )
            .named("Name")
            .refs(RefStyle::Arn)
            .attrs(&[("Id", Attr::Arn)]),
            SsmParameter => KindSpec::new(
                stack(1011),
                "arn:{partition}:ssm:{region}:{account}:parameter/{id}",
            )
            .named("Name")
            .attrs(&[("Type", Attr::Fixed("String"))]),

            EcsCluster => KindSpec::new(
                stack(255),
                "arn:{partition}:ecs:{region}:{account}:cluster/{id}",
            )
            .named("ClusterName")
            .attrs(ARN_ONLY),
            EcsService => KindSpec::new(
                stack(255),
                "arn:{partition}:ecs:{region}:{account}:service/{id}",
            )
            .named("ServiceName")
            .refs(RefStyle::Arn)
            .attrs(&[("ServiceArn", Attr::Arn), ("Name", Attr::Id)]),
            EcsTaskDefinition => KindSpec::new(
                stack(255),
                "arn:{partition}:ecs:{region}:{account}:task-definition/{id}:1",
            )
            .named("Family")
            .refs(RefStyle::Arn)
            .attrs(&[("TaskDefinitionArn", Attr::Arn)]),
            EcrRepository => KindSpec::new(
                stack_lower(256),
                "arn:{partition}:ecr:{region}:{account}:repository/{id}",
            )
            .named("RepositoryName")
            .attrs(&[
                ("Arn", Attr::Arn),
                (
                    "RepositoryUri",
                    Attr::Pattern("{account}.dkr.ecr.{region}.{urlsuffix}/{id}"),
                ),
            ]),

            ElbLoadBalancer => KindSpec::new(
                stack(32),
                "arn:{partition}:elasticloadbalancing:{region}:{account}:loadbalancer/app/{id}/{hex}",
            )
            .named("Name")
            .refs(RefStyle::Arn)
            .attrs(&[
                ("LoadBalancerArn", Attr::Arn),
                ("LoadBalancerName", Attr::Id),
                ("DNSName", Attr::Pattern("{id}.{region}.elb.{urlsuffix}")),
                ("CanonicalHostedZoneID", Attr::Fixed("Z35SXDOTRQ7X7K")),
            ]),
            ElbTargetGroup => KindSpec::new(
                stack(32),
                "arn:{partition}:elasticloadbalancing:{region}:{account}:targetgroup/{id}/{hex}",
            )
            .named("Name")
            .refs(RefStyle::Arn)
            .attrs(&[("TargetGroupArn", Attr::Arn), ("TargetGroupName", Attr::Id)]),
            ElbListener => KindSpec::new(
                stack(128),
                "arn:{partition}:elasticloadbalancing:{region}:{account}:listener/app/{id}/{hex}",
            )
            .refs(RefStyle::Arn)
            .attrs(&[("ListenerArn", Attr::Arn)]),

            RdsDbInstance => KindSpec::new(
                stack_lower(63),
                "arn:{partition}:rds:{region}:{account}:db:{id}",
            )
            .named("DBInstanceIdentifier")
            .attrs(&[
                ("DBInstanceArn", Attr::Arn),
                (
                    "Endpoint.Address",
                    Attr::Pattern("{id}.{suffix}.{region}.rds.{urlsuffix}"),
                ),
                ("Endpoint.Port", Attr::Fixed("5432")),
            ]),
            RdsDbCluster => KindSpec::new(
                stack_lower(63),
                "arn:{partition}:rds:{region}:{account}:cluster:{id}",
            )
            .named("DBClusterIdentifier")
            .attrs(&[
                ("DBClusterArn", Attr::Arn),
                (
                    "Endpoint.Address",
                    Attr::Pattern("{id}.cluster-{suffix}.{region}.rds.{urlsuffix}"),
                ),
                (
                    "ReadEndpoint.Address",
                    Attr::Pattern("{id}.cluster-ro-{suffix}.{region}.rds.{urlsuffix}"),
                ),
                ("Endpoint.Port", Attr::Fixed("5432")),
            ]),

            CognitoUserPool => KindSpec::new(
                IdStyle::Regional { len: 9 },
                "arn:{partition}:cognito-idp:{region}:{account}:userpool/{id}",
            )
            .attrs(&[
                ("Arn", Attr::Arn),
                ("UserPoolId", Attr::Id),
                ("ProviderName", Attr::Pattern("cognito-idp.{region}.{urlsuffix}/{id}")),
                (
                    "ProviderURL",
                    Attr::Pattern("https://cognito-idp.{region}.{urlsuffix}/{id}"),
                ),
            ]),
            CognitoUserPoolClient => KindSpec::new(
                short_id(26),
                "arn:{partition}:cognito-idp:{region}:{account}:userpoolclient/{id}",
            )
            .attrs(&[
                ("ClientId", Attr::Id),
                ("ClientSecret", Attr::Pattern("{suffix}{suffix}")),
            ]),
            CognitoIdentityPool => KindSpec::new(
                IdStyle::RegionalUuid,
                "arn:{partition}:cognito-identity:{region}:{account}:identitypool/{id}",
            )
            .attrs(&[("Id", Attr::Id), ("Name", Attr::Pattern("{stack}-{logical}"))]),

            CloudFrontDistribution => KindSpec::new(
                prefixed("E", 13, UpperAlnum),
                "arn:{partition}:cloudfront::{account}:distribution/{id}",
            )
            .attrs(&[
                ("Id", Attr::Id),
                ("DomainName", Attr::Pattern("d{suffix}.cloudfront.net")),
            ]),
            CloudFrontOriginAccessIdentity => KindSpec::new(
                prefixed("E", 13, UpperAlnum),
                "arn:{partition}:cloudfront::{account}:origin-access-identity/{id}",
            )
            .attrs(&[
                ("Id", Attr::Id),
                ("S3CanonicalUserId", Attr::Pattern("{hex}{hex}{hex}")),
            ]),
            Route53HostedZone => KindSpec::new(
                prefixed("Z", 20, UpperAlnum),
                "arn:{partition}:route53:::hostedzone/{id}",
            )
            .attrs(&[("Id", Attr::Id)]),
            Route53RecordSet => KindSpec::new(
                stack_lower(255),
                "arn:{partition}:route53:::recordset/{id}",
            )
            .named("Name"),
            AcmCertificate => KindSpec::new(
                IdStyle::Uuid,
                "arn:{partition}:acm:{region}:{account}:certificate/{id}",
            )
            .refs(RefStyle::Arn),

            AppSyncGraphQlApi => KindSpec::new(
                short_id(26),
                "arn:{partition}:appsync:{region}:{account}:apis/{id}",
            )
            .refs(RefStyle::Arn)
            .attrs(&[
                ("ApiId", Attr::Id),
                ("Arn", Attr::Arn),
                (
                    "GraphQLUrl",
                    Attr::Pattern("https://{suffix}.appsync-api.{region}.{urlsuffix}/graphql"),
                ),
            ]),
            AppSyncDataSource => KindSpec::new(
                stack(65),
                "arn:{partition}:appsync:{region}:{account}:apis/{stack}/datasources/{id}",
            )
            .named("Name")
            .refs(RefStyle::Arn)
            .attrs(&[("DataSourceArn", Attr::Arn), ("Name", Attr::Id)]),
            OpenSearchDomain => KindSpec::new(
                stack_lower(28),
                "arn:{partition}:es:{region}:{account}:domain/{id}",
            )
            .named("DomainName")
            .attrs(&[
                ("Arn", Attr::Arn),
                ("DomainArn", Attr::Arn),
                (
                    "DomainEndpoint",
                    Attr::Pattern("search-{id}-{suffix}.{region}.es.{urlsuffix}"),
                ),
            ]),
            CodeBuildProject => KindSpec::new(
                stack(255),
                "arn:{partition}:codebuild:{region}:{account}:project/{id}",
            )
            .named("Name")
            .attrs(ARN_ONLY),
            CodePipelinePipeline => KindSpec::new(
                stack(100),
                "arn:{partition}:codepipeline:{region}:{account}:{id}",
            )
            .named("Name")
            .attrs(&[("Version", Attr::Fixed("1"))]),
            Wafv2WebAcl => KindSpec::new(
                stack(128),
                "arn:{partition}:wafv2:{region}:{account}:regional/webacl/{id}/{suffix}",
            )
            .named("Name")
            .attrs(&[("Arn", Attr::Arn), ("Id", Attr::Id)]),
            EfsFileSystem => KindSpec::new(
                hex_id("fs-"),
                "arn:{partition}:elasticfilesystem:{region}:{account}:file-system/{id}",
            )
            .attrs(&[("Arn", Attr::Arn), ("FileSystemId", Attr::Id)]),
            EfsAccessPoint => KindSpec::new(
                hex_id("fsap-"),
                "arn:{partition}:elasticfilesystem:{region}:{account}:access-point/{id}",
            )
            .attrs(&[("Arn", Attr::Arn), ("AccessPointId", Attr::Id)]),
            AutoScalingGroup => KindSpec::new(
                stack(255),
                "arn:{partition}:autoscaling:{region}:{account}:autoScalingGroup:{suffix}:autoScalingGroupName/{id}",
            )
            .named("AutoScalingGroupName"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_catalog_size() {
        assert!(ResourceKind::iter().count() >= 80);
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in ResourceKind::iter() {
            assert!(kind.as_ref().starts_with("AWS::"), "{kind}");
            assert_eq!(ResourceKind::from_str(kind.as_ref()).unwrap(), kind);
        }
    }

    #[test]
    fn test_every_arn_pattern_is_an_arn() {
        for kind in ResourceKind::iter() {
            let spec = kind.spec();
            assert!(spec.arn.starts_with("arn:{partition}:"), "{kind}: {}", spec.arn);
            assert!(
                spec.arn.contains("{id}"),
                "{kind}: ARN should embed the identifier"
            );
        }
    }

    #[test]
    fn test_attribute_lookup() {
        let spec = ResourceKind::SqsQueue.spec();
        assert_eq!(spec.attribute("Arn"), Some(Attr::Arn));
        assert_eq!(spec.attribute("QueueUrl"), Some(Attr::Pattern(QUEUE_URL)));
        assert_eq!(spec.attribute("Nope"), None);
        assert_eq!(spec.reference, RefStyle::Pattern(QUEUE_URL));
        assert_eq!(spec.name_property, Some("QueueName"));
    }
}
