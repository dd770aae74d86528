/// dotnet CLI adapter for the PackageManagerGateway port
mod dotnet_cli;

pub use dotnet_cli::{DotnetCli, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
