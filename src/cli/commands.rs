//! CLI commands and argument parsing

use crate::config::Profile;
use crate::resources::apitokens::TokenRoleId;
use crate::resources::projects::ProjectState;
use crate::resources::users::UserRole;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cloud control-plane CLI
#[derive(Parser, Debug)]
#[command(name = "gcloud")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Profile file (YAML); defaults to ~/.gcloud/config.yaml when present
    #[arg(short = 'C', long, global = true, env = "GCLOUD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings that override the profile file
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Base URL of the cloud API
    #[arg(long, global = true, env = "GCLOUD_API_URL")]
    pub api_url: Option<String>,

    /// Base URL of the auth service
    #[arg(long, global = true, env = "GCLOUD_AUTH_URL")]
    pub auth_url: Option<String>,

    /// Project ID
    #[arg(long, global = true, env = "GCLOUD_PROJECT_ID")]
    pub project: Option<u64>,

    /// Region ID
    #[arg(long, global = true, env = "GCLOUD_REGION_ID")]
    pub region: Option<u64>,

    /// Client (account) ID
    #[arg(long, global = true, env = "GCLOUD_CLIENT_ID")]
    pub client_id: Option<u64>,

    #[arg(long, global = true, env = "GCLOUD_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "GCLOUD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Permanent API token
    #[arg(long, global = true, env = "GCLOUD_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    #[arg(long, global = true, env = "GCLOUD_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, global = true, env = "GCLOUD_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "GCLOUD_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl ProfileArgs {
    /// Flags as a profile layer to merge over the file
    pub fn to_profile(&self) -> Profile {
        Profile {
            api_url: self.api_url.clone(),
            auth_url: self.auth_url.clone(),
            project_id: self.project,
            region_id: self.region,
            client_id: self.client_id,
            username: self.username.clone(),
            password: self.password.clone(),
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            api_token: self.api_token.clone(),
            timeout_seconds: self.timeout,
            ..Profile::default()
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Manage permanent API tokens
    Tokens {
        #[command(subcommand)]
        command: TokenCommand,
    },

    /// Show quotas and manage quota increase requests
    Quotas {
        #[command(subcommand)]
        command: QuotaCommand,
    },

    /// Show free bare-metal nodes per flavor
    Capacity,

    /// Inference flavors
    Flavors {
        #[command(subcommand)]
        command: FlavorCommand,
    },

    /// Inference registry credentials
    Registries {
        #[command(subcommand)]
        command: RegistryCommand,
    },

    /// Orchestration stack resources
    Heat {
        #[command(subcommand)]
        command: HeatCommand,
    },

    /// User role assignments
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Background tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List projects
    List {
        /// Filter by name
        #[arg(long)]
        name: Option<String>,

        /// Include deleted projects
        #[arg(long)]
        include_deleted: bool,

        /// Sort order, e.g. `created_at.desc`
        #[arg(long)]
        order_by: Option<String>,
    },

    /// Show one project
    Show { id: u64 },

    /// Create a project
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        state: Option<ProjectState>,
    },

    /// Rename or re-describe a project
    Update {
        id: u64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a project
    Delete {
        id: u64,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// List tokens of the client
    List {
        /// Role ID filter
        #[arg(long, value_parser = parse_token_role)]
        role: Option<TokenRoleId>,

        #[arg(long)]
        issued_by: Option<u64>,

        #[arg(long)]
        not_issued_by: Option<u64>,

        /// Include deleted tokens
        #[arg(long)]
        deleted: bool,
    },

    /// Show one token
    Show { id: u64 },

    /// Create a token; the secret is printed once
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Role ID (1 Administrators, 2 Users, 3 Engineers, 5/6 Purge and Prefetch)
        #[arg(long, value_parser = parse_token_role)]
        role: TokenRoleId,

        /// Expiry as RFC 3339; omit for a token that never expires
        #[arg(long)]
        exp_date: Option<DateTime<Utc>>,
    },

    /// Delete a token
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum QuotaCommand {
    /// Show quotas of the client
    Show {
        #[arg(long, value_enum, default_value = "combined")]
        scope: QuotaScope,
    },

    /// List quota increase requests
    List,

    /// Show one increase request
    Request { id: u64 },

    /// Ask for a quota increase
    Create {
        #[arg(long)]
        description: String,

        /// Global limit as NAME=VALUE (repeatable)
        #[arg(long = "limit", value_parser = parse_limit)]
        limits: Vec<(String, i64)>,

        /// Limit in the configured region as NAME=VALUE (repeatable)
        #[arg(long = "region-limit", value_parser = parse_limit)]
        region_limits: Vec<(String, i64)>,
    },

    /// Delete an increase request
    Delete { id: u64 },
}

/// Which quotas to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum QuotaScope {
    Combined,
    Global,
    Regional,
}

#[derive(Subcommand, Debug)]
pub enum FlavorCommand {
    /// List flavors
    List,

    /// Show one flavor
    Show { name: String },
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// List registry credentials
    List,

    /// Show one credential
    Show { name: String },

    /// Store a credential
    Create {
        name: String,

        /// Registry login
        #[arg(long)]
        registry_user: String,

        #[arg(long, env = "GCLOUD_REGISTRY_PASSWORD", hide_env_values = true)]
        registry_password: String,

        #[arg(long)]
        registry_url: String,
    },

    /// Replace a credential
    Update {
        name: String,

        /// Registry login
        #[arg(long)]
        registry_user: String,

        #[arg(long, env = "GCLOUD_REGISTRY_PASSWORD", hide_env_values = true)]
        registry_password: String,

        #[arg(long)]
        registry_url: String,
    },

    /// Delete a credential
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum HeatCommand {
    /// List resources of a stack
    List {
        stack_id: String,

        #[arg(long)]
        nested_depth: Option<u32>,

        #[arg(long = "type")]
        resource_type: Option<String>,

        #[arg(long = "status")]
        resource_status: Option<String>,
    },

    /// Show one resource
    Show { stack_id: String, name: String },

    /// Show resource metadata
    Metadata { stack_id: String, name: String },

    /// Signal a resource with a JSON payload
    Signal {
        stack_id: String,
        name: String,

        #[arg(long, default_value = "{}")]
        data: String,
    },

    /// Mark a resource unhealthy, or clear the mark with --clear
    MarkUnhealthy {
        stack_id: String,
        name: String,

        #[arg(long, default_value = "")]
        reason: String,

        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List role assignments
    List {
        #[arg(long)]
        user_id: Option<u64>,

        /// Filter by project (not the global --project)
        #[arg(long = "in-project")]
        project_id: Option<u64>,
    },

    /// Grant a role
    Assign(AssignArgs),

    /// Replace an assignment
    Update {
        id: u64,

        #[command(flatten)]
        args: AssignArgs,
    },

    /// Revoke an assignment
    Unassign { id: u64 },
}

#[derive(Args, Debug, Clone)]
pub struct AssignArgs {
    #[arg(long)]
    pub role: UserRole,

    #[arg(long)]
    pub user_id: u64,

    /// Project the role applies to
    #[arg(long = "in-project")]
    pub project_id: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Show one task
    Show { id: String },

    /// Wait until a task finishes
    Wait {
        id: String,

        /// Seconds between polls
        #[arg(long, default_value = "2")]
        interval: u64,

        /// Give up after this many seconds
        #[arg(long, default_value = "300")]
        wait_timeout: u64,
    },
}

/// Polling flags for deletes
#[derive(Args, Debug, Clone, Copy)]
pub struct WaitArgs {
    /// Wait until the resource is gone
    #[arg(long)]
    pub wait: bool,

    /// Give up waiting after this many seconds
    #[arg(long, default_value = "300")]
    pub wait_timeout: u64,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    Table,
    /// Pretty-printed JSON
    Json,
}

fn parse_token_role(s: &str) -> Result<TokenRoleId, String> {
    let id: u64 = s.parse().map_err(|_| format!("'{s}' is not a role ID"))?;
    TokenRoleId::try_from(id).map_err(|e| e.to_string())
}

fn parse_limit(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not an integer"))?;
    Ok((name.trim().to_string(), value))
}
