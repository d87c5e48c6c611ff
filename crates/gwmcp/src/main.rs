mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gwmcp_policy::{
    allowed_tools, compose_scopes, default_policy_path, evaluate, scope_param, Layered,
    PolicyConfig, ServiceId, ToolCatalog, ToolRegistry,
};
use tracing_subscriber::EnvFilter;

use report::{CheckReport, ConfigReport, ToolReport};

#[derive(Parser, Debug)]
#[command(name = "gwmcp", version, about = "Inspect the Google Workspace MCP access policy")]
struct Args {
    /// Policy file (JSON object keyed by GOOGLE_MCP_* names)
    #[arg(long, global = true, conflicts_with = "no_file")]
    config: Option<PathBuf>,

    /// Ignore the policy file and read only the environment
    #[arg(long, global = true)]
    no_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the OAuth scopes requested at login
    Scopes {
        #[arg(long)]
        json: bool,
        /// Single space-separated line, as sent in the consent request
        #[arg(long, conflicts_with = "json")]
        space: bool,
    },
    /// Check whether tools may be called; exits 1 if any is denied
    Check {
        #[arg(required = true)]
        tools: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List known tools (allowed ones unless --all)
    Tools {
        #[arg(long)]
        all: bool,
        #[arg(long, value_parser = parse_service)]
        service: Option<ServiceId>,
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration
    Config {
        #[arg(long)]
        json: bool,
    },
}

fn parse_service(raw: &str) -> Result<ServiceId, String> {
    ServiceId::from_token(&raw.trim().to_lowercase())
        .ok_or_else(|| format!("unknown service: {}", raw))
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args);
    let registry = ToolRegistry::standard();

    match args.command {
        Command::Scopes { json, space } => {
            let scopes = compose_scopes(&config);
            if json {
                println!("{}", serde_json::to_string_pretty(&scopes)?);
            } else if space {
                println!("{}", scope_param(&scopes));
            } else {
                for scope in &scopes {
                    println!("{}", scope);
                }
            }
        }
        Command::Check { tools, json } => {
            let reports: Vec<CheckReport> = tools
                .iter()
                .map(|tool| CheckReport::new(tool, evaluate(&config, registry, tool)))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{}", report);
                }
            }

            if reports.iter().any(|r| !r.allowed) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Tools { all, service, json } => {
            let reports: Vec<ToolReport> = if all {
                ToolCatalog::all()
                    .iter()
                    .map(|t| ToolReport::new(t, evaluate(&config, registry, t.name).is_allowed()))
                    .collect()
            } else {
                allowed_tools(&config, registry)
                    .into_iter()
                    .map(|t| ToolReport::new(t, true))
                    .collect()
            };
            let reports: Vec<ToolReport> = reports
                .into_iter()
                .filter(|r| service.is_none() || r.service == service)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{}", report.line(all));
                }
            }
        }
        Command::Config { json } => {
            let report = ConfigReport::from(&config);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(args: &Args) -> PolicyConfig {
    if args.no_file {
        return PolicyConfig::load(&Layered::standard(None));
    }

    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => default_policy_path()
            .map_err(|e| tracing::warn!("Skipping policy file: {}", e))
            .ok(),
    };

    if let Some(path) = &path {
        if args.config.is_some() && !path.exists() {
            tracing::warn!("Policy file not found: {:?}", path);
        }
    }

    PolicyConfig::from_env_and_file(path.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_requires_tools() {
        assert!(Args::try_parse_from(["gwmcp", "check"]).is_err());
        let args = Args::try_parse_from(["gwmcp", "check", "gmail_send", "drive_search"]).unwrap();
        match args.command {
            Command::Check { tools, json } => {
                assert_eq!(tools, vec!["gmail_send", "drive_search"]);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tools_service_filter() {
        let args = Args::try_parse_from(["gwmcp", "tools", "--all", "--service", "Gmail"]).unwrap();
        match args.command {
            Command::Tools { all, service, .. } => {
                assert!(all);
                assert_eq!(service, Some(ServiceId::Gmail));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Args::try_parse_from(["gwmcp", "tools", "--service", "photos"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let args = Args::try_parse_from(["gwmcp", "scopes", "--config", "/tmp/p.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/p.json")));
        assert!(Args::try_parse_from(["gwmcp", "--no-file", "--config", "x", "scopes"]).is_err());
        assert!(Args::try_parse_from(["gwmcp", "scopes", "--json", "--space"]).is_err());
    }

    #[test]
    fn test_load_config_with_explicit_file() {
        let path = std::env::temp_dir().join(format!("gwmcp-cli-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"GOOGLE_MCP_SCOPES": "https://example.com/scope.only"}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "gwmcp",
            "scopes",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let config = load_config(&args);
        // The environment may override, but only if it sets the same key.
        if std::env::var("GOOGLE_MCP_SCOPES").is_err() {
            let scopes = compose_scopes(&config);
            assert_eq!(scopes.len(), 1);
            assert!(scopes.contains("https://example.com/scope.only"));
        }

        std::fs::remove_file(&path).unwrap();
    }
}
