//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::resource::{plan, Plan, PlanAction, Resource};
use crate::state::{ResourceData, ResourceRecord, StateManager};
use crate::types::JsonValue;
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};

/// Provider config read when `--provider-config` is not given, if present
const DEFAULT_PROVIDER_CONFIG: &str = "gitlab-provider.yaml";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Schema => self.schema(),
            Commands::Plan {
                name,
                config,
                resource_type,
            } => self.plan(name, config, resource_type).await,
            Commands::Apply {
                name,
                config,
                resource_type,
            } => self.apply(name, config, resource_type).await,
            Commands::Refresh { name } => self.refresh(name).await,
            Commands::Show {
                name,
                show_sensitive,
            } => self.show(name, *show_sensitive).await,
            Commands::Import {
                name,
                id,
                resource_type,
            } => self.import(name, id, resource_type).await,
            Commands::Destroy { name } => self.destroy(name).await,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Provider configuration from file, then environment
    fn provider_config(&self) -> Result<ProviderConfig> {
        let config = match &self.cli.provider_config {
            Some(path) => ProviderConfig::from_file(path)?,
            None if Path::new(DEFAULT_PROVIDER_CONFIG).exists() => {
                ProviderConfig::from_file(DEFAULT_PROVIDER_CONFIG)?
            }
            None => ProviderConfig::default(),
        };
        Ok(config.with_env())
    }

    /// Provider able to reach GitLab
    fn provider(&self) -> Result<Provider> {
        let config = self.provider_config()?;
        Provider::new(&config)
    }

    fn load_state(&self) -> Result<StateManager> {
        StateManager::from_file(&self.cli.state)
    }

    /// Desired attributes from a YAML or JSON file
    fn load_desired(path: &Path) -> Result<ResourceData> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        match serde_yaml::from_str::<JsonValue>(&contents)? {
            JsonValue::Object(attributes) => Ok(ResourceData::from_attributes(attributes)),
            JsonValue::Null => Ok(ResourceData::new()),
            other => Err(Error::config(format!(
                "Expected a mapping of attributes in {}, got {other}",
                path.display()
            ))),
        }
    }

    /// Managed resource by name, or an error naming it
    async fn managed(state: &StateManager, name: &str) -> Result<ResourceRecord> {
        state
            .get(name)
            .await
            .ok_or_else(|| Error::state(format!("Resource '{name}' is not in state")))
    }

    /// Desired state with defaults filled and validated, plus the plan
    async fn diff(
        &self,
        resource: &dyn Resource,
        state: &StateManager,
        name: &str,
        config: &Path,
        resource_type: &str,
    ) -> Result<(Option<ResourceRecord>, ResourceData, Plan)> {
        let prior = state.get(name).await;
        if let Some(record) = &prior {
            if record.resource_type != resource_type {
                return Err(Error::state(format!(
                    "Resource '{name}' is a {}, not a {resource_type}",
                    record.resource_type
                )));
            }
        }

        let mut desired = Self::load_desired(config)?;
        let schema = resource.schema();
        schema.apply_defaults(&mut desired);
        schema.validate(&desired)?;

        let plan = plan(schema, prior.as_ref().map(|r| &r.data), Some(&desired));
        Ok((prior, desired, plan))
    }

    /// Create the resource. Once an ID is assigned the remote object exists,
    /// so the record is kept even when the read-back fails.
    async fn create_tracked(
        state: &StateManager,
        name: &str,
        resource_type: &str,
        resource: &dyn Resource,
        desired: &mut ResourceData,
    ) -> Result<()> {
        if let Err(e) = resource.create(desired).await {
            if desired.id().is_some() {
                warn!(
                    resource = %name,
                    error = %e,
                    "created but read-back failed, keeping ID in state"
                );
                state.put(name, resource_type, desired.clone()).await?;
            }
            return Err(e);
        }
        Ok(())
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn schema(&self) -> Result<()> {
        let provider = Provider::unconfigured();
        let schemas = provider.schemas();
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "SCHEMA",
                "schema": schemas,
            })),
            OutputFormat::Pretty => {
                for (resource_type, schema) in &schemas {
                    println!("{resource_type} (schema version {})", schema.version);
                    for (name, attribute) in &schema.attributes {
                        let mut flags = vec![if attribute.required {
                            "required"
                        } else {
                            "optional"
                        }];
                        if attribute.force_new {
                            flags.push("force new");
                        }
                        if attribute.sensitive {
                            flags.push("sensitive");
                        }
                        print!("  {name}: {} ({})", attribute.attr_type, flags.join(", "));
                        if let Some(default) = &attribute.default {
                            print!(" default {default}");
                        }
                        println!();
                    }
                }
            }
        }
        Ok(())
    }

    async fn plan(&self, name: &str, config: &Path, resource_type: &str) -> Result<()> {
        let provider = Provider::unconfigured();
        let resource = provider.resource(resource_type)?;
        let state = self.load_state()?;

        let (_, _, plan) = self
            .diff(resource.as_ref(), &state, name, config, resource_type)
            .await?;
        self.report_plan(name, &plan);
        Ok(())
    }

    async fn apply(&self, name: &str, config: &Path, resource_type: &str) -> Result<()> {
        let provider = self.provider()?;
        let resource = provider.resource(resource_type)?;
        let state = self.load_state()?;

        let (prior, mut desired, plan) = self
            .diff(resource.as_ref(), &state, name, config, resource_type)
            .await?;
        self.report_plan(name, &plan);
        let prior = prior.map(|r| r.data);

        match plan.action {
            // Desired is always present here, so Delete cannot be planned.
            PlanAction::NoOp | PlanAction::Delete => return Ok(()),
            PlanAction::Create => {
                Self::create_tracked(&state, name, resource_type, resource.as_ref(), &mut desired)
                    .await?;
            }
            PlanAction::Update => {
                let id = prior
                    .as_ref()
                    .and_then(ResourceData::id)
                    .ok_or_else(|| Error::state(format!("Resource '{name}' has no ID in state")))?;
                desired.set_id(id);
                resource.update(&mut desired).await?;
            }
            PlanAction::Replace => {
                let prior = prior
                    .ok_or_else(|| Error::state(format!("Resource '{name}' is not in state")))?;
                warn!(resource = %name, "replacing resource, a force-new attribute changed");
                resource.delete(&prior).await?;
                state.remove(name).await?;
                Self::create_tracked(&state, name, resource_type, resource.as_ref(), &mut desired)
                    .await?;
            }
        }

        info!(resource = %name, action = %plan.action, "apply complete");
        self.report_record(name, resource.as_ref(), &desired, false);
        state.put(name, resource_type, desired).await
    }

    async fn refresh(&self, name: &str) -> Result<()> {
        let state = self.load_state()?;
        let mut record = Self::managed(&state, name).await?;
        let provider = self.provider()?;
        let resource = provider.resource(&record.resource_type)?;

        resource.read(&mut record.data).await?;

        info!(resource = %name, "refreshed");
        self.report_record(name, resource.as_ref(), &record.data, false);
        state.put(name, record.resource_type, record.data).await
    }

    async fn show(&self, name: &str, show_sensitive: bool) -> Result<()> {
        let state = self.load_state()?;
        let record = Self::managed(&state, name).await?;
        let provider = Provider::unconfigured();
        let resource = provider.resource(&record.resource_type)?;

        self.report_record(name, resource.as_ref(), &record.data, show_sensitive);
        Ok(())
    }

    async fn import(&self, name: &str, id: &str, resource_type: &str) -> Result<()> {
        let state = self.load_state()?;
        if state.get(name).await.is_some() {
            return Err(Error::state(format!(
                "Resource '{name}' is already managed; destroy or rename it first"
            )));
        }

        let provider = self.provider()?;
        let resource = provider.resource(resource_type)?;

        let imported = resource.import(id).await?;
        let mut data = match <[ResourceData; 1]>::try_from(imported) {
            Ok([data]) => data,
            Err(all) => {
                return Err(Error::state(format!(
                    "Import of {id:?} returned {} resources, expected one",
                    all.len()
                )))
            }
        };
        resource.read(&mut data).await?;

        info!(resource = %name, id = %id, "imported");
        self.report_record(name, resource.as_ref(), &data, false);
        state.put(name, resource_type, data).await
    }

    async fn destroy(&self, name: &str) -> Result<()> {
        let state = self.load_state()?;
        let record = Self::managed(&state, name).await?;
        let provider = self.provider()?;
        let resource = provider.resource(&record.resource_type)?;

        resource.delete(&record.data).await?;
        state.remove(name).await?;

        info!(resource = %name, "destroyed");
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "DESTROYED",
                "name": name,
                "id": record.data.id(),
            })),
            OutputFormat::Pretty => println!("{name}: destroyed"),
        }
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn report_plan(&self, name: &str, plan: &Plan) {
        match self.cli.format {
            OutputFormat::Json => {
                // Plan serializes raw values; mask sensitive ones first.
                let changes: Vec<_> = plan
                    .changes
                    .iter()
                    .map(|c| {
                        let mask = |v: &Option<JsonValue>| match v {
                            Some(_) if c.sensitive => json!(crate::schema::SENSITIVE_PLACEHOLDER),
                            Some(v) => v.clone(),
                            None => JsonValue::Null,
                        };
                        json!({
                            "name": c.name,
                            "before": mask(&c.before),
                            "after": mask(&c.after),
                            "forces_replacement": c.forces_replacement,
                        })
                    })
                    .collect();
                self.output_message(&json!({
                    "type": "PLAN",
                    "name": name,
                    "action": plan.action,
                    "changes": changes,
                }));
            }
            OutputFormat::Pretty => print!("{name}: {plan}"),
        }
    }

    fn report_record(
        &self,
        name: &str,
        resource: &dyn Resource,
        data: &ResourceData,
        show_sensitive: bool,
    ) {
        let attributes = if show_sensitive {
            data.attributes().clone()
        } else {
            resource.schema().redact(data)
        };

        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "RESOURCE",
                "name": name,
                "resource_type": resource.type_name(),
                "id": data.id(),
                "attributes": attributes,
            })),
            OutputFormat::Pretty => {
                println!(
                    "{name} ({}) id={}",
                    resource.type_name(),
                    data.id().unwrap_or("-")
                );
                for (key, value) in &attributes {
                    println!("  {key} = {value}");
                }
            }
        }
    }

    /// Output a message as a single JSON line
    fn output_message(&self, msg: &JsonValue) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner").field("command", &self.cli.command).finish()
    }
}
