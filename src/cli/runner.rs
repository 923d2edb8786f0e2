//! CLI runner - executes commands

use super::commands::{
    AssignArgs, Cli, Commands, FlavorCommand, HeatCommand, OutputFormat, ProjectCommand,
    QuotaCommand, QuotaScope, RegistryCommand, TaskCommand, TokenCommand, UserCommand, WaitArgs,
};
use super::display::{
    format_done, format_key_values, render_combined_quota, render_list, render_one,
    render_quota, render_value,
};
use crate::config::Profile;
use crate::error::{Error, Result, ResultExt};
use crate::http::ServiceClient;
use crate::resources::{
    apitokens, bmcapacity, heat, inference, projects, quotas, tasks, users, PollOpts,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Profile file (explicit path, else the default one when present)
    /// with command-line flags merged on top
    pub fn profile(&self) -> Result<Profile> {
        let base = match &self.cli.config {
            Some(path) => Profile::from_file(path)?,
            None => match Profile::default_path() {
                Some(path) if path.exists() => {
                    debug!("Using profile {}", path.display());
                    Profile::from_file(path)?
                }
                _ => Profile::default(),
            },
        };
        Ok(base.merge(self.cli.profile.to_profile()))
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let profile = self.profile()?;
        let client = profile.clone().into_client()?;
        debug!(
            "Client for {} (project {:?}, region {:?})",
            client.config().api_url,
            profile.project_id,
            profile.region_id
        );
        let output = self.execute(&client, &profile).await?;
        print!("{output}");
        Ok(())
    }

    /// Run the CLI command against `client`, returning the rendered output
    pub async fn execute(&self, client: &ServiceClient, profile: &Profile) -> Result<String> {
        let format = self.cli.format;

        match &self.cli.command {
            Commands::Projects { command } => {
                run_projects(client, profile.client_id, command, format).await
            }
            Commands::Tokens { command } => {
                run_tokens(client, client_id(profile)?, command, format).await
            }
            Commands::Quotas { command } => {
                run_quotas(client, client_id(profile)?, command, format).await
            }
            Commands::Capacity => {
                let nodes = bmcapacity::list(client).await?;
                render_value(format, &serde_json::to_value(&nodes)?)
            }
            Commands::Flavors { command } => run_flavors(client, command, format).await,
            Commands::Registries { command } => run_registries(client, command, format).await,
            Commands::Heat { command } => run_heat(client, command, format).await,
            Commands::Users { command } => {
                run_users(client, client_id(profile)?, command, format).await
            }
            Commands::Tasks { command } => run_tasks(client, command, format).await,
        }
    }
}

fn client_id(profile: &Profile) -> Result<u64> {
    profile
        .client_id
        .ok_or_else(|| Error::missing_field("client_id"))
}

fn poll_opts(wait: &WaitArgs) -> PollOpts {
    PollOpts::with_timeout(
        PollOpts::default().interval,
        Duration::from_secs(wait.wait_timeout),
    )
}

async fn run_projects(
    client: &ServiceClient,
    client_id: Option<u64>,
    command: &ProjectCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        ProjectCommand::List {
            name,
            include_deleted,
            order_by,
        } => {
            let opts = projects::ListOpts {
                client_id,
                name: name.clone(),
                include_deleted: *include_deleted,
                order_by: order_by.clone(),
            };
            render_list(format, &projects::list(client, &opts).await?)
        }
        ProjectCommand::Show { id } => render_one(format, &projects::get(client, *id).await?),
        ProjectCommand::Create {
            name,
            description,
            state,
        } => {
            let opts = projects::CreateOpts {
                client_id: None,
                name: name.clone(),
                description: description.clone(),
                state: *state,
            };
            render_one(format, &projects::create(client, &opts).await?)
        }
        ProjectCommand::Update {
            id,
            name,
            description,
        } => {
            let opts = projects::UpdateOpts {
                name: name.clone(),
                description: description.clone(),
            };
            render_one(format, &projects::update(client, *id, &opts).await?)
        }
        ProjectCommand::Delete { id, wait } => {
            if wait.wait {
                projects::delete_and_wait(client, *id, &poll_opts(wait)).await?;
                return Ok(format_done("Deleted", "project", &id.to_string()));
            }
            let started = projects::delete(client, *id).await?;
            match format {
                OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&started)?)),
                OutputFormat::Table => Ok(format_key_values(
                    started.tasks.iter().map(|task| ("task", task.as_str())),
                )),
            }
        }
    }
}

async fn run_tokens(
    client: &ServiceClient,
    client_id: u64,
    command: &TokenCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        TokenCommand::List {
            role,
            issued_by,
            not_issued_by,
            deleted,
        } => {
            let opts = apitokens::ListOpts {
                role_id: *role,
                issued_by: *issued_by,
                not_issued_by: *not_issued_by,
                deleted: *deleted,
            };
            render_list(format, &apitokens::list(client, client_id, &opts).await?)
        }
        TokenCommand::Show { id } => {
            render_one(format, &apitokens::get(client, client_id, *id).await?)
        }
        TokenCommand::Create {
            name,
            description,
            role,
            exp_date,
        } => {
            let opts = apitokens::CreateOpts {
                name: name.clone(),
                description: description.clone(),
                role_id: *role,
                exp_date: *exp_date,
            };
            let created = apitokens::create(client, client_id, &opts).await?;
            render_value(format, &serde_json::to_value(&created)?)
        }
        TokenCommand::Delete { id } => {
            apitokens::delete(client, client_id, *id).await?;
            Ok(format_done("Deleted", "token", &id.to_string()))
        }
    }
}

async fn run_quotas(
    client: &ServiceClient,
    client_id: u64,
    command: &QuotaCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        QuotaCommand::Show { scope } => match scope {
            QuotaScope::Combined => {
                render_combined_quota(format, &quotas::get_combined(client, client_id).await?)
            }
            QuotaScope::Global => render_quota(format, &quotas::get_global(client, client_id).await?),
            QuotaScope::Regional => {
                let region_id = client.region_id()?;
                render_quota(
                    format,
                    &quotas::get_regional(client, client_id, region_id).await?,
                )
            }
        },
        QuotaCommand::List => render_list(format, &quotas::list_limit_requests(client).await?),
        QuotaCommand::Request { id } => {
            render_one(format, &quotas::get_limit_request(client, *id).await?)
        }
        QuotaCommand::Create {
            description,
            limits,
            region_limits,
        } => {
            let mut regional_limits = Vec::new();
            if !region_limits.is_empty() {
                regional_limits.push(quotas::RegionalQuota {
                    region_id: client.region_id()?,
                    limits: region_limits.iter().cloned().collect(),
                });
            }
            let opts = quotas::CreateLimitRequestOpts {
                description: description.clone(),
                requested_limits: quotas::RequestedLimits {
                    global_limits: limits.iter().cloned().collect::<BTreeMap<_, _>>(),
                    regional_limits,
                },
            };
            render_one(format, &quotas::create_limit_request(client, &opts).await?)
        }
        QuotaCommand::Delete { id } => {
            quotas::delete_limit_request(client, *id).await?;
            Ok(format_done("Deleted", "limit request", &id.to_string()))
        }
    }
}

async fn run_flavors(
    client: &ServiceClient,
    command: &FlavorCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        FlavorCommand::List => render_list(format, &inference::flavors::list(client).await?),
        FlavorCommand::Show { name } => {
            render_one(format, &inference::flavors::get(client, name).await?)
        }
    }
}

async fn run_registries(
    client: &ServiceClient,
    command: &RegistryCommand,
    format: OutputFormat,
) -> Result<String> {
    use inference::credentials;

    match command {
        RegistryCommand::List => render_list(format, &credentials::list(client).await?),
        RegistryCommand::Show { name } => render_one(format, &credentials::get(client, name).await?),
        RegistryCommand::Create {
            name,
            registry_user,
            registry_password,
            registry_url,
        } => {
            let opts = inference::CreateCredentialOpts {
                name: name.clone(),
                username: registry_user.clone(),
                password: registry_password.clone(),
                registry_url: registry_url.clone(),
            };
            render_one(format, &credentials::create(client, &opts).await?)
        }
        RegistryCommand::Update {
            name,
            registry_user,
            registry_password,
            registry_url,
        } => {
            let opts = inference::UpdateCredentialOpts {
                username: registry_user.clone(),
                password: registry_password.clone(),
                registry_url: registry_url.clone(),
            };
            render_one(format, &credentials::update(client, name, &opts).await?)
        }
        RegistryCommand::Delete { name } => {
            credentials::delete(client, name).await?;
            Ok(format_done("Deleted", "registry credential", name))
        }
    }
}

async fn run_heat(
    client: &ServiceClient,
    command: &HeatCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        HeatCommand::List {
            stack_id,
            nested_depth,
            resource_type,
            resource_status,
        } => {
            let opts = heat::ListOpts {
                nested_depth: *nested_depth,
                resource_type: resource_type.clone(),
                resource_status: resource_status.clone(),
                ..heat::ListOpts::default()
            };
            render_list(format, &heat::list(client, stack_id, &opts).await?)
        }
        HeatCommand::Show { stack_id, name } => {
            render_one(format, &heat::get(client, stack_id, name).await?)
        }
        HeatCommand::Metadata { stack_id, name } => {
            let metadata = heat::metadata(client, stack_id, name).await?;
            render_value(format, &Value::Object(metadata))
        }
        HeatCommand::Signal {
            stack_id,
            name,
            data,
        } => {
            let payload: Value = serde_json::from_str(data).context("Invalid --data JSON")?;
            heat::signal(client, stack_id, name, payload).await?;
            Ok(format_done("Signalled", "resource", name))
        }
        HeatCommand::MarkUnhealthy {
            stack_id,
            name,
            reason,
            clear,
        } => {
            let opts = heat::MarkUnhealthyOpts {
                mark_unhealthy: !*clear,
                resource_status_reason: reason.clone(),
            };
            heat::mark_unhealthy(client, stack_id, name, &opts).await?;
            let action = if *clear { "Cleared" } else { "Marked unhealthy" };
            Ok(format_done(action, "resource", name))
        }
    }
}

fn assign_opts(client_id: u64, args: &AssignArgs) -> users::AssignOpts {
    users::AssignOpts {
        role: args.role,
        user_id: args.user_id,
        client_id,
        project_id: args.project_id,
    }
}

async fn run_users(
    client: &ServiceClient,
    client_id: u64,
    command: &UserCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        UserCommand::List {
            user_id,
            project_id,
        } => {
            let opts = users::ListOpts {
                user_id: *user_id,
                project_id: *project_id,
            };
            render_list(format, &users::list(client, &opts).await?)
        }
        UserCommand::Assign(args) => {
            render_one(format, &users::assign(client, &assign_opts(client_id, args)).await?)
        }
        UserCommand::Update { id, args } => render_one(
            format,
            &users::update(client, *id, &assign_opts(client_id, args)).await?,
        ),
        UserCommand::Unassign { id } => {
            users::unassign(client, *id).await?;
            Ok(format_done("Unassigned", "role assignment", &id.to_string()))
        }
    }
}

async fn run_tasks(
    client: &ServiceClient,
    command: &TaskCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        TaskCommand::Show { id } => render_one(format, &tasks::get(client, id).await?),
        TaskCommand::Wait {
            id,
            interval,
            wait_timeout,
        } => {
            let poll = PollOpts::with_timeout(
                Duration::from_secs(*interval),
                Duration::from_secs(*wait_timeout),
            );
            render_one(format, &tasks::wait_for_task(client, id, &poll).await?)
        }
    }
}
