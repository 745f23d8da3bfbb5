use std::path::PathBuf;

use anyhow::Context;
use dayframe_server::{DayframeServer, ServerConfig};

use crate::cli::{Cli, Command, RegisterArgs, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config)?;
    match cli.command {
        Command::Serve(args) => serve(config, args),
        Command::Register(args) => register(config, args),
        Command::Reconcile => reconcile(config),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::from_toml_file(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let server = DayframeServer::new(config);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn register(config: ServerConfig, args: RegisterArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => std::env::var("DAYFRAME_PASSWORD")
            .context("pass --password or set DAYFRAME_PASSWORD")?,
    };
    let service = DayframeServer::new(config).build_service()?;
    let admin = service.credentials().register(&args.email, &password)?;
    println!("registered admin {} (id {})", admin.email, admin.id);
    Ok(())
}

fn reconcile(config: ServerConfig) -> anyhow::Result<()> {
    let service = DayframeServer::new(config).build_service()?;
    let created = service.run_reconciliation()?;
    println!("reconciled {created} item(s)");
    Ok(())
}
